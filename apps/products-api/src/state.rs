//! Application state management

use database::mongodb::connect_from_config_with_retry;
use mongodb::{Client, Database};
use tracing::info;

use crate::config::{Config, Storage};

/// MongoDB handles, present when products live in MongoDB
#[derive(Clone)]
pub struct Mongo {
    pub client: Client,
    pub db: Database,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mongo: Option<Mongo>,
}

impl AppState {
    /// Open the configured storage; MongoDB is connected with retry.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let mongo = match &config.storage {
            Storage::Mongo(mongo_config) => {
                info!(
                    hosts = %mongo_config.hosts(),
                    database = %mongo_config.database(),
                    "Connecting to MongoDB"
                );
                let client = connect_from_config_with_retry(mongo_config, None).await?;
                let db = client.database(mongo_config.database());
                info!(
                    "Successfully connected to MongoDB database: {}",
                    mongo_config.database()
                );
                Some(Mongo { client, db })
            }
            Storage::Memory => {
                tracing::warn!("PRODUCTS_STORAGE=memory, products are not persisted");
                None
            }
        };

        Ok(Self { config, mongo })
    }
}
