mod config;
mod services;
mod state;

use crate::config::Config;
use crate::state::PortalState;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use common::portal::Portal;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded front end. Unknown paths get `index.html` so the
/// browser app can route them itself.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::parse();
    let url = config.url();

    let state = if config.no_seed {
        PortalState::new(Portal::new())
    } else {
        PortalState::seeded().map_err(|e| {
            error!("could not load demo data: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?
    };

    if !config.no_browser {
        let browser_url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&browser_url);
        });
    }

    info!("Server running at {}", url);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
            .default_service(web::route().to(serve_embedded))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
