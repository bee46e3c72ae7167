//! The single point of authenticated contact with the Notion API.
//!
//! Every call funnels through [`NotionClient::dispatch`], which attaches the
//! bearer token and the pinned `Notion-Version` header, classifies failures
//! and logs them with the operation name. Callers only ever see the generic
//! error kinds below; nothing here retries or caches.

pub mod types;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::error;

use self::types::{DatabaseId, Page, PropertyMap, QueryRequest};

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Debug)]
pub struct NotionClient {
    http_client: Client,
    url: reqwest::Url,
    api_version: String,
    auth_token: SecretString,
}

impl NotionClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        auth_token: SecretString,
        api_version: String,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(NotionClient {
            http_client,
            url,
            api_version,
            auth_token,
        })
    }

    /// POST `/v1/databases/{id}/query`. Returns the raw pages in the order
    /// the remote reports them.
    pub async fn query_database(
        &self,
        database_id: &DatabaseId,
        query: &QueryRequest,
    ) -> Result<Vec<Page>> {
        let url = self.join(&format!("v1/databases/{database_id}/query"))?;

        let resp: QueryResponse = self
            .dispatch("query_database", self.http_client.post(url).json(query))
            .await?;

        Ok(resp.results)
    }

    /// POST `/v1/pages`: create one record in `database_id` with the given
    /// properties. The returned page carries the server-assigned id.
    pub async fn create_page(
        &self,
        database_id: &DatabaseId,
        properties: &PropertyMap,
    ) -> Result<Page> {
        let url = self.join("v1/pages")?;
        let body = CreatePageBody {
            parent: ParentRef { database_id },
            properties,
        };

        self.dispatch("create_page", self.http_client.post(url).json(&body))
            .await
    }

    /// PATCH `/v1/pages/{id}` with a partial property set.
    pub async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<Page> {
        let url = self.join(&format!("v1/pages/{page_id}"))?;
        let body = UpdatePageBody { properties };

        self.dispatch("update_page", self.http_client.patch(url).json(&body))
            .await
    }

    /// PATCH `/v1/pages/{id}` flipping only the `archived` flag. The record
    /// itself is never removed.
    pub async fn archive_page(&self, page_id: &str) -> Result<Page> {
        let url = self.join(&format!("v1/pages/{page_id}"))?;
        let body = ArchivePageBody { archived: true };

        self.dispatch("archive_page", self.http_client.patch(url).json(&body))
            .await
    }

    fn join(&self, path: &str) -> Result<reqwest::Url> {
        self.url
            .join(path)
            .map_err(|e| Error::UrlParsing(e.to_string()))
    }

    /// Send one authenticated request and decode the response. Failures are
    /// logged here, with the operation name, before they propagate.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        op: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let resp = req
            .bearer_auth(self.auth_token.expose_secret())
            .header(NOTION_VERSION_HEADER, &self.api_version)
            .send()
            .await
            .map_err(|er| {
                error!("{op} - transport failure: {er}");
                Error::Transport(er)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_default();
            error!("{op} - rejected by the notion api: {status}: {message}");
            return Err(Error::Rejected { status, message });
        }

        resp.json::<T>().await.map_err(|er| {
            error!("{op} - undecodable response body: {er}");
            Error::Transport(er)
        })
    }
}

// ###################################
// ->   REQUEST / RESPONSE BODIES
// ###################################

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
}

#[derive(Serialize)]
struct CreatePageBody<'a> {
    parent: ParentRef<'a>,
    properties: &'a PropertyMap,
}

#[derive(Serialize)]
struct ParentRef<'a> {
    database_id: &'a DatabaseId,
}

#[derive(Serialize)]
struct UpdatePageBody<'a> {
    properties: &'a PropertyMap,
}

#[derive(Serialize)]
struct ArchivePageBody {
    archived: bool,
}

/// The shape Notion uses for error responses; both fields are optional in
/// practice so everything is defaulted.
#[derive(Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("the notion api rejected the request: {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}
