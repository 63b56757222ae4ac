#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{AdvocateStore, DieselRepository, InMemoryRepository};
#[cfg(feature = "server")]
use crate::routes::api::{api_advocates, api_seed};
#[cfg(feature = "server")]
use crate::routes::main::show_index;

#[cfg(feature = "server")]
pub mod browse;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod seed;
#[cfg(feature = "server")]
pub mod services;

/// Picks the advocate store for the configured environment.
///
/// Without a database URL the bundled dataset is served read-only from
/// memory.
#[cfg(feature = "server")]
pub fn build_store(server_config: &ServerConfig) -> std::io::Result<AdvocateStore> {
    match server_config.database_url() {
        Some(database_url) => {
            // Establish Diesel connection pool for the SQLite database.
            let pool = db::establish_connection_pool(database_url).map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            Ok(AdvocateStore::Database(DieselRepository::new(pool)))
        }
        None => {
            log::warn!("Database URL not set, serving the bundled advocates from memory");
            let advocates = seed::advocates()
                .map_err(|e| std::io::Error::other(format!("Invalid bundled advocates: {e}")))?;
            let repo = InMemoryRepository::from_new(advocates)
                .map_err(|e| std::io::Error::other(format!("Invalid bundled advocates: {e}")))?;
            Ok(AdvocateStore::Memory(repo))
        }
    }
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let store = build_store(&server_config)?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting advocate directory on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &server_config.assets_dir))
            .service(
                web::scope("/api")
                    .service(api_advocates)
                    .service(api_seed),
            )
            .service(show_index)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
