mod config;
mod services;
mod state;
mod store;

use crate::config::Config;
use crate::state::AppState;
use crate::store::Store;
use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};
use std::path::Path;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store = Store::open(&config.db_path).map_err(std::io::Error::other)?;
    store
        .seed_roster(&config.roster)
        .await
        .map_err(std::io::Error::other)?;
    let state = AppState::new(store, config.course.clone());

    let url = format!("http://{}:{}", config.host, config.port);
    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    let static_dir = config.static_dir.clone();
    let serve_static = Path::new(&static_dir).is_dir();
    if !serve_static {
        warn!("Static dir {} not found, serving API only", static_dir);
    }

    info!("Server running at {}", url);

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(services::forum_task::configure_routes())
            .configure(move |cfg| {
                if serve_static {
                    cfg.service(Files::new("/", static_dir).index_file("index.html"));
                }
            })
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
