//! Shared plumbing for the integration suite: spawning the gateway against a
//! mock Notion server, plus a few canned Notion-shaped response bodies.
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::OnceLock,
    time::Duration,
};

use anyhow::Result;
use lifeboard::{
    config::{get_or_init_config, AppConfig},
    App, AppState, NotionClient,
};
use serde_json::{json, Value};
use wiremock::{MockServer, ResponseTemplate};

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    pub config: AppConfig,
    pub notion_server: MockServer,
    pub http_client: reqwest::Client,
}

fn _init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        lifeboard::init_dbg_tracing();
    });
}

impl TestApp {
    /// Spawns the gateway on a random port, pointed at a fresh mock Notion
    /// server, returning handles to both.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Like [`TestApp::spawn`], but lets the caller reshape the configuration
    /// before the app is built, e.g. to drop a collection id.
    pub async fn spawn_with(reshape: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        // _init_test_subscriber();

        let notion_server = MockServer::start().await;

        let mut config = get_or_init_config().clone();
        config.notion_config.api_url = notion_server.uri();
        reshape(&mut config);

        let notion_client = NotionClient::new(
            &config.notion_config.api_url,
            config.notion_config.api_token.clone(),
            config.notion_config.api_version.clone(),
            Duration::from_millis(200),
        )?;
        let app_state = AppState::new(notion_client, config.notion_config.collections.clone());

        let listener = tokio::net::TcpListener::bind(&TEST_SOCK_ADDR).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(lifeboard::serve(App::new(app_state, listener)));

        Ok(TestApp {
            addr,
            config,
            notion_server,
            http_client: reqwest::Client::new(),
        })
    }

    /// Query endpoint path for the configured subscriptions database.
    pub fn subscriptions_query_path(&self) -> String {
        let id = self
            .config
            .notion_config
            .collections
            .subscriptions
            .as_ref()
            .expect("test config should have a subscriptions database id");
        format!("/v1/databases/{id}/query")
    }

    /// Query endpoint path for the configured daily resets database.
    pub fn resets_query_path(&self) -> String {
        let id = self
            .config
            .notion_config
            .collections
            .daily_resets
            .as_ref()
            .expect("test config should have a daily resets database id");
        format!("/v1/databases/{id}/query")
    }

    pub async fn get_subscriptions(&self) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .get(format!("http://{}/subscriptions", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn patch_subscription(&self, id: &str, body: &Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .patch(format!("http://{}/subscriptions/{id}", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .delete(format!("http://{}/subscriptions/{id}", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn delete_subscription_with_body(
        &self,
        id: &str,
        body: &Value,
    ) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .delete(format!("http://{}/subscriptions/{id}", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn post_task(&self, body: &Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .post(format!("http://{}/tasks", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub async fn get_latest_reset(&self) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .get(format!("http://{}/resets", self.addr))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn post_chat(&self, body: &Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .post(format!("http://{}/chat", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }
}

/// A Notion query response wrapping the given `results` array.
pub fn notion_query_response(results: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "object": "list",
        "results": results,
    }))
}

/// A minimal Notion page response, just enough for the gateway to decode.
pub fn notion_page_response(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "object": "page",
        "id": id,
        "properties": {}
    }))
}
