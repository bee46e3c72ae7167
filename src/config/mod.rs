//! Tries to create an `AppConfig` from config files.
//! Currently uses `AppConfigBuilder` to build up configuration from multiple files.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod types;

use std::sync::OnceLock;

use secrecy::SecretString;
use tracing::info;

use crate::notion::types::DatabaseId;
use types::Environment;

pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, CollectionIds, NetConfig, NotionConfig};

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<12} - Initializing the configuration",
            "get_or_init_config"
        );
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let base_file = std::fs::File::open(config_dir.join("base.toml"))
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));
        let env_file = std::fs::File::open(config_dir.join(environment_filename))
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        let mut config = AppConfig::init()
            .add_source_file(base_file)
            .add_source_file(env_file)
            .build()
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        // In production secrets and database ids come from the environment, not
        // from files baked into the image.
        if matches!(environment, Environment::Production) {
            // Panic early if there are any problems.
            let api_token = std::env::var("NOTION_API_TOKEN").unwrap_or_else(|er| {
                panic!("Fatal Error: While looking for NOTION_API_TOKEN env variable: {er:?}")
            });
            config.notion_config.api_token = SecretString::from(api_token);

            let collections = &mut config.notion_config.collections;
            if let Ok(id) = std::env::var("NOTION_SUBSCRIPTIONS_DB") {
                collections.subscriptions = Some(DatabaseId::new(id));
            }
            if let Ok(id) = std::env::var("NOTION_TASKS_DB") {
                collections.tasks = Some(DatabaseId::new(id));
            }
            if let Ok(id) = std::env::var("NOTION_RESETS_DB") {
                collections.daily_resets = Some(DatabaseId::new(id));
            }
        }

        config
    })
}
