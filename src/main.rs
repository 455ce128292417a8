use actix_web::{App, HttpServer, web};
use disk_mirror::config::Config;
use disk_mirror::database;
use disk_mirror::handlers;
use disk_mirror::yandex::YandexDiskClient;
use log::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();

    env_logger::init();

    let config = Config::from_env()?;

    let pool = database::create_pool(&config.database_url)?;
    database::run_migrations(&mut *pool.get()?)?;
    info!("Database migrations completed");

    let client = web::Data::new(YandexDiskClient::new(
        config.api_url.clone(),
        config.page_limit,
    ));
    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);

    info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(client.clone())
            .app_data(config.clone())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
