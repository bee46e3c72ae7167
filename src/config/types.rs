//! The configuration structs used to build the AppConfig, and their impls.
use std::{
    collections::{hash_map::Entry, HashMap},
    io::Read,
};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use toml::Value;

use crate::config::{ConfigError, ConfigResult};
use crate::notion::types::DatabaseId;
use crate::web::Collection;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub notion_config: NotionConfig,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NotionConfig {
    pub api_url: String,
    pub api_version: String,
    pub api_token: SecretString,
    pub timeout_millis: u64,
    #[serde(default)]
    pub collections: CollectionIds,
}

/// The configured Notion database behind each collection. Any of them may be
/// left out; the endpoints that need the missing one fail closed instead of
/// calling the remote.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct CollectionIds {
    pub subscriptions: Option<DatabaseId>,
    pub tasks: Option<DatabaseId>,
    pub daily_resets: Option<DatabaseId>,
}

/// Merges TOML sources into one table before deserializing `AppConfig`.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AppConfigBuilder(HashMap<String, HashMap<String, Value>>);

// ###################################
// ->   IMPLs
// ###################################
impl NotionConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl CollectionIds {
    pub fn get(&self, collection: Collection) -> Option<&DatabaseId> {
        match collection {
            Collection::Subscriptions => self.subscriptions.as_ref(),
            Collection::Tasks => self.tasks.as_ref(),
            Collection::DailyResets => self.daily_resets.as_ref(),
        }
    }
}

impl AppConfig {
    pub fn init() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

impl AppConfigBuilder {
    /// Extends this `AppConfigBuilder` with the contents of `other` builder.
    fn extend_builder(&mut self, other: Self) {
        for (entry, entry_hm) in other.0 {
            match self.0.entry(entry) {
                Entry::Vacant(e) => {
                    e.insert(entry_hm);
                }
                Entry::Occupied(mut e) => {
                    e.get_mut().extend(entry_hm);
                }
            }
        }
    }

    /// Panics if file reading or deserialization goes wrong.
    pub fn add_source_file(mut self, mut file: std::fs::File) -> Self {
        let mut file_content = String::new();

        if let Err(e) = file.read_to_string(&mut file_content) {
            panic!("Fatal Error: Building config: {e}");
        }

        let app_conf_builder: AppConfigBuilder = toml::from_str(&file_content)
            .unwrap_or_else(|e| panic!("Fatal Error: Building config: {e}"));

        self.extend_builder(app_conf_builder);

        self
    }

    pub fn build(self) -> ConfigResult<AppConfig> {
        let serialized = toml::to_string(&self)?;
        let app_config = toml::from_str(&serialized)?;
        Ok(app_config)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
