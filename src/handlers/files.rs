use crate::browse::top_level;
use crate::config::Config;
use crate::context::PublicLink;
use crate::database::DbPool;
use crate::export::{ARCHIVE_NAME, export_zip};
use crate::handlers::{db_error, ingest_items};
use crate::repositories::files::{
    find_file_by_id, find_files_by_ids, load_files_by_public_link, load_files_under_path,
};
use crate::repositories::previews::load_previews_for_file;
use crate::requests::download::BulkDownloadRequest;
use crate::yandex::YandexDiskClient;
use actix_web::{Error, HttpResponse, http::header, web};
use log::{error, info, warn};

/// GET /api/files
/// Returns the top-level folders and files of the current public link.
pub async fn list_files(
    pool: web::Data<DbPool>,
    link: PublicLink,
) -> Result<HttpResponse, Error> {
    let rows = web::block(move || load_files_by_public_link(&pool, link.as_str()))
        .await?
        .map_err(|e| db_error("Failed to load files of public link", e))?;

    Ok(HttpResponse::Ok().json(top_level(rows)))
}

/// GET /api/files/{id}
/// Returns a file record together with its previews.
pub async fn get_file(
    pool: web::Data<DbPool>,
    file_id: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let file_id = file_id.into_inner();
    let (file, previews) = web::block(move || {
        let file = find_file_by_id(&pool, file_id)?;
        let previews = load_previews_for_file(&pool, &file)?;
        Ok::<_, diesel::result::Error>((file, previews))
    })
    .await?
    .map_err(|e| match e {
        diesel::result::Error::NotFound => actix_web::error::ErrorNotFound("File not found"),
        _ => db_error("Failed to load file", e),
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "file": file,
        "previews": previews,
    })))
}

/// GET /api/folder/{path}
/// Fetches a folder of the current public link, stores its entries and returns
/// everything stored under it.
pub async fn browse_folder(
    pool: web::Data<DbPool>,
    client: web::Data<YandexDiskClient>,
    config: web::Data<Config>,
    link: PublicLink,
    folder: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let folder_path = format!("/{}", folder.into_inner().trim_matches('/'));

    let items = match client.fetch_listing(link.as_str(), &folder_path).await {
        Ok(listing) => listing.into_folder_items(),
        Err(e) => {
            warn!("Could not list folder {:?}: {}", folder_path, e);
            None
        }
    };
    let Some(items) = items else {
        return Ok(HttpResponse::NotFound().body("Folder not found."));
    };

    ingest_items(&pool, items, link.as_str(), config.conflict_policy).await?;

    let pool = pool.clone();
    let lookup_path = folder_path.clone();
    let files = web::block(move || load_files_under_path(&pool, link.as_str(), &lookup_path))
        .await?
        .map_err(|e| db_error("Failed to load folder contents", e))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "folder_path": folder_path,
        "files": files,
    })))
}

/// POST /api/files/download
/// Packs the selected files into a ZIP archive and returns it as an attachment.
pub async fn bulk_download(
    pool: web::Data<DbPool>,
    client: web::Data<YandexDiskClient>,
    body: web::Json<BulkDownloadRequest>,
) -> Result<HttpResponse, Error> {
    let selected = body.into_inner().selected_files;
    if selected.is_empty() {
        return Ok(HttpResponse::BadRequest().body("No files selected"));
    }

    let files = web::block(move || find_files_by_ids(&pool, &selected))
        .await?
        .map_err(|e| db_error("Failed to load selected files", e))?;

    info!("Exporting {} files", files.len());

    let archive = export_zip(&client, &files).await.map_err(|e| {
        error!("Failed to build archive: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to build archive")
    })?;

    Ok(HttpResponse::Ok()
        .append_header((header::CONTENT_TYPE, "application/zip"))
        .append_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", ARCHIVE_NAME),
        ))
        .body(archive))
}
