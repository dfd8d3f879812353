use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{StakeDistEntry, TransactionInfo},
    protocol::{
        AddKeyRequest, AddKeyResponse, AgentResponse, AgentSnapshot, DagResponse,
        RoundStatusResponse, TransferRequest, TransferResponse,
    },
};
use tracing::debug;
use url::Url;

pub mod actions;
pub mod effects;
pub mod error;
pub mod format;
pub mod poller;
pub mod route;
pub mod selectors;
pub mod settings;
pub mod state;
pub mod store;
pub mod transfer;

pub use actions::{Action, AgentUpdate, RequestKind, TransferOrder};
pub use effects::{Effects, Notice};
pub use error::ClientError;
pub use poller::RoundStatusPoller;
pub use route::{Route, RouteError};
pub use settings::{load_settings, Settings, SettingsError};
pub use state::AppState;
pub use store::{ActionSender, Store};

/// The ledger node's dashboard API. Every call is scoped to the node
/// listening on `port`.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    async fn agent(&self, port: u16) -> Result<AgentResponse, ClientError>;
    async fn generate_key_pair(&self, port: u16) -> Result<AgentSnapshot, ClientError>;
    async fn add_key(&self, port: u16, key: &str) -> Result<AddKeyResponse, ClientError>;
    async fn transfer(
        &self,
        port: u16,
        request: &TransferRequest,
    ) -> Result<TransferResponse, ClientError>;
    async fn dag(&self, port: u16) -> Result<DagResponse, ClientError>;
    async fn transaction_info(
        &self,
        port: u16,
        transaction_id: &str,
    ) -> Result<TransactionInfo, ClientError>;
    async fn round_status(&self, port: u16) -> Result<RoundStatusResponse, ClientError>;
    async fn stake_dist(&self, port: u16) -> Result<Vec<StakeDistEntry>, ClientError>;
}

pub struct HttpLedgerClient {
    http: Client,
    base_url: Url,
}

impl HttpLedgerClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                route: "client",
                source,
            })?;
        Self::with_client(base_url, http)
    }

    fn with_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings::normalize_base_url(base_url))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, route: &'static str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(route)?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        route: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let res = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { route, source })?;
        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                route,
                status: status.as_u16(),
            });
        }
        let body = res
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { route, source })?;
        debug!(route, bytes = body.len(), "ledger api response");
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode { route, source })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        route: &'static str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let request = self.http.get(self.url(route)?).query(query);
        self.send_json(route, request).await
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerClient {
    async fn agent(&self, port: u16) -> Result<AgentResponse, ClientError> {
        self.get("agent", &[("port", port.to_string())]).await
    }

    async fn generate_key_pair(&self, port: u16) -> Result<AgentSnapshot, ClientError> {
        let request = self
            .http
            .post(self.url("keys")?)
            .query(&[("port", port)])
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        self.send_json("keys", request).await
    }

    async fn add_key(&self, port: u16, key: &str) -> Result<AddKeyResponse, ClientError> {
        let request = self
            .http
            .post(self.url("addKey")?)
            .query(&[("port", port)])
            .json(&AddKeyRequest {
                key: key.to_string(),
            });
        self.send_json("addKey", request).await
    }

    async fn transfer(
        &self,
        port: u16,
        request: &TransferRequest,
    ) -> Result<TransferResponse, ClientError> {
        let request = self
            .http
            .post(self.url("transfer")?)
            .query(&[("port", port)])
            .json(request);
        self.send_json("transfer", request).await
    }

    async fn dag(&self, port: u16) -> Result<DagResponse, ClientError> {
        self.get("dag", &[("port", port.to_string())]).await
    }

    async fn transaction_info(
        &self,
        port: u16,
        transaction_id: &str,
    ) -> Result<TransactionInfo, ClientError> {
        self.get(
            "transaction",
            &[
                ("txn_id", transaction_id.to_string()),
                ("port", port.to_string()),
            ],
        )
        .await
    }

    async fn round_status(&self, port: u16) -> Result<RoundStatusResponse, ClientError> {
        self.get("round_status", &[("port", port.to_string())]).await
    }

    async fn stake_dist(&self, port: u16) -> Result<Vec<StakeDistEntry>, ClientError> {
        self.get("stake_dist", &[("port", port.to_string())]).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
