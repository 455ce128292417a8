pub mod files;
pub mod link;

use crate::database::{DbPool, get_db_conn};
use crate::ingest::{ConflictPolicy, IngestReport, ingest};
use crate::yandex::ResourceDescriptor;
use actix_web::{Error, web};
use log::error;

/// Registers the HTTP routes of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/link", web::post().to(link::submit_link))
            .route("/files", web::get().to(files::list_files))
            .route("/files/download", web::post().to(files::bulk_download))
            .route("/files/{id}", web::get().to(files::get_file))
            .route("/folder/{path:.*}", web::get().to(files::browse_folder)),
    );
}

/// Logs a database failure and turns it into a 500 response.
fn db_error(context: &str, e: diesel::result::Error) -> Error {
    error!("{}: {}", context, e);
    actix_web::error::ErrorInternalServerError(format!("{}: {}", context, e))
}

/// Runs `ingest` on the blocking pool.
async fn ingest_items(
    pool: &web::Data<DbPool>,
    items: Vec<ResourceDescriptor>,
    public_link: &str,
    policy: ConflictPolicy,
) -> Result<IngestReport, Error> {
    let pool = pool.clone();
    let public_link = public_link.to_string();

    web::block(move || {
        let mut conn = get_db_conn(&pool)?;
        ingest(&mut conn, &items, &public_link, policy)
    })
    .await?
    .map_err(|e| {
        error!("Ingest failed: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to store Yandex Disk metadata")
    })
}
