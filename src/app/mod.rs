use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{AppConfig, CollectionIds},
    notion::NotionClient,
    Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let notion_timeout = config.notion_config.timeout();
        let notion_client = NotionClient::new(
            &config.notion_config.api_url,
            config.notion_config.api_token,
            config.notion_config.api_version,
            notion_timeout,
        )?;

        let app_state = AppState::new(notion_client, config.notion_config.collections);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub notion_client: NotionClient,
    pub collections: CollectionIds,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(notion_client: NotionClient, collections: CollectionIds) -> Self {
        AppState(Arc::new(InternalState {
            notion_client,
            collections,
        }))
    }
}
