extern crate actix_web as aw;

use std::sync::Arc;

use ::actix_web_lab::middleware::from_fn;
use ::aw::{web::Data, HttpServer};

pub mod session;

use ::dotenvy::dotenv;
use ::log::{info, trace, warn};

pub mod backend;
pub mod config;
pub mod controller;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod state;
use state::*;

use backend::{Backend, PlaceholderBackend, RestBackend};
use config::{Config, ConfigError};
use controller::PageController;
use render::AskamaRenderer;
use session::SessionKeyError;

macro_rules! app {
    () => {
        ::actix_web::App::new()
            .wrap(::actix_web::middleware::Logger::default())
            .service(actix_files::Files::new("/static", "./static/").use_last_modified(true))
            .configure(handlers::config)
    };
}

#[derive(Debug, ::thiserror::Error)]
enum StartUpError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("session key error: {0}")]
    SessionKey(#[from] SessionKeyError),
    #[error("archiver client error: {0}")]
    ArchiverClient(#[from] ::reqwest::Error),
    #[error("general IO error: {0}")]
    IO(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartUpError> {
    dotenv().ok();
    env_logger::init();

    trace!("TRACE level enabled");

    let config = Config::from_env()?;
    let key = session::key()?;

    let backend: Arc<dyn Backend> = match &config.archiver_url {
        Some(url) => {
            info!("archiver at {url}");
            Arc::new(RestBackend::new(url.clone(), config.archiver_timeout)?)
        }
        None => {
            warn!("ARCHIVER_URL is not set, pages will show placeholder data");
            Arc::new(PlaceholderBackend)
        }
    };

    let registry = Data::new(Registry {
        controller: PageController::new(backend, Arc::new(AskamaRenderer)),
        login_url: config.login_url.clone(),
    });

    let srv = HttpServer::new(move || {
        app!()
            .wrap(from_fn(middleware::auth))
            .wrap(session::middleware(key.clone()))
            .app_data(Data::clone(&registry))
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run();

    srv.await?;

    Ok(())
}
