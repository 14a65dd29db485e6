use std::sync::Arc;

use mongodb::Database;

use super::{config::Config, database::init_mongo};

/// Process-wide shared state. The store handle is built once here and
/// passed to handlers explicitly instead of living in a global.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();
        let db = init_mongo(&config).await;

        Arc::new(Self { config, db })
    }
}
