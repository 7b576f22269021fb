pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::build_router;

use services::upload_store::UploadStore;

// Application state
pub struct AppState {
    pub config: config::Config,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let uploads = UploadStore::new(config.upload_dir.clone());
        Self { config, uploads }
    }
}
