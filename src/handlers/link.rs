use crate::config::Config;
use crate::context::PublicLink;
use crate::database::DbPool;
use crate::handlers::ingest_items;
use crate::requests::link::LinkForm;
use crate::yandex::YandexDiskClient;
use actix_web::{Error, HttpResponse, http::header, web};
use log::{info, warn};

/// POST /api/link
/// Fetches the root of a public link, stores its entries and makes the link the
/// browsing context for the following requests.
pub async fn submit_link(
    pool: web::Data<DbPool>,
    client: web::Data<YandexDiskClient>,
    config: web::Data<Config>,
    form: web::Form<LinkForm>,
) -> Result<HttpResponse, Error> {
    let link = PublicLink::new(form.validate().map_err(actix_web::error::ErrorBadRequest)?);

    let listing = client.fetch_listing(link.as_str(), "").await.map_err(|e| {
        warn!("Could not list public link {}: {}", link.as_str(), e);
        actix_web::error::ErrorNotFound("Yandex Disk resource not found")
    })?;

    let report = ingest_items(
        &pool,
        listing.into_children(),
        link.as_str(),
        config.conflict_policy,
    )
    .await?;

    info!("Browsing context set to {}", link.as_str());

    Ok(HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/api/files"))
        .cookie(link.to_cookie())
        .json(report))
}
