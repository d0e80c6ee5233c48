//! Configuration for Products API

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Where products are persisted, from `PRODUCTS_STORAGE`
#[derive(Clone, Debug)]
pub enum Storage {
    /// `mongodb` (default)
    Mongo(MongoConfig),
    /// `memory`: process-local, lost on restart
    Memory,
}

impl FromEnv for Storage {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("PRODUCTS_STORAGE", "mongodb");

        match backend.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Storage::Mongo(MongoConfig::from_env()?)),
            "memory" => Ok(Storage::Memory),
            other => Err(ConfigError::ParseError {
                key: "PRODUCTS_STORAGE".to_string(),
                details: format!("unknown backend '{}', expected 'mongodb' or 'memory'", other),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub storage: Storage,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            storage: Storage::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_needs_no_mongo_settings() {
        temp_env::with_vars(
            [
                ("PRODUCTS_STORAGE", Some("memory")),
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(matches!(config.storage, Storage::Memory));
                assert_eq!(config.app.name, "products_api");
            },
        );
    }

    #[test]
    fn test_mongo_storage_is_default() {
        temp_env::with_vars(
            [
                ("PRODUCTS_STORAGE", None),
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("shop")),
            ],
            || match Storage::from_env().unwrap() {
                Storage::Mongo(mongo) => {
                    assert_eq!(mongo.url, "mongodb://db:27017");
                    assert_eq!(mongo.database(), "shop");
                }
                Storage::Memory => panic!("expected mongodb storage"),
            },
        );
    }

    #[test]
    fn test_mongo_storage_requires_url() {
        temp_env::with_vars(
            [
                ("PRODUCTS_STORAGE", Some("mongodb")),
                ("MONGODB_URL", None::<&str>),
                ("MONGO_URL", None),
            ],
            || {
                assert!(matches!(
                    Storage::from_env(),
                    Err(ConfigError::MissingEnvVar(_))
                ));
            },
        );
    }

    #[test]
    fn test_unknown_storage_rejected() {
        temp_env::with_var("PRODUCTS_STORAGE", Some("postgres"), || {
            assert!(matches!(
                Storage::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }
}
