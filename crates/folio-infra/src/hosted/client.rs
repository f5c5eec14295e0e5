use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use folio_core::error::RepoError;

use super::HostedQuery;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// Project base URL, e.g. `https://abc.example.co`.
    pub url: String,
    /// Public (anon) key, sent as `apikey` on every request.
    pub api_key: String,
    /// Server-side key used for table access. Authorization is enforced by
    /// this service before any write reaches the backend.
    pub service_key: String,
    /// Secret the backend signs session tokens with.
    pub jwt_secret: String,
    pub timeout: Duration,
}

/// Thin HTTP client shared by the hosted repositories and auth provider.
#[derive(Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    service_key: String,
}

impl HostedClient {
    pub fn new(config: &HostedConfig) -> Result<Self, RepoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Hosted backend client configured");

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            service_key: config.service_key.clone(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    /// Request against a table, authorized with the service key.
    pub(crate) fn table(&self, method: Method, table: &str, query: &HostedQuery) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .query(&query.pairs())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.service_key)
    }

    /// Request against the auth interface, authorized with the public key
    /// unless a caller token is attached later.
    pub(crate) fn auth(&self, endpoint: &str) -> RequestBuilder {
        self.http
            .post(self.auth_url(endpoint))
            .header("apikey", &self.api_key)
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> RepoError {
    if err.is_decode() {
        RepoError::Decode(err.to_string())
    } else {
        RepoError::Connection(err.to_string())
    }
}

/// Map a non-success reply from the REST interface.
pub(crate) fn status_error(status: StatusCode, body: &str) -> RepoError {
    // 23505 is the Postgres unique_violation code the REST layer passes through.
    if status == StatusCode::CONFLICT || body.contains("23505") {
        return RepoError::Constraint(body.to_string());
    }
    if status.is_server_error() {
        return RepoError::Connection(format!("{status}: {body}"));
    }
    RepoError::Query(format!("{status}: {body}"))
}

/// Read a JSON array of rows, mapping failures to repository errors.
pub(crate) async fn read_rows<R: DeserializeOwned>(response: Response) -> Result<Vec<R>, RepoError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }

    response.json::<Vec<R>>().await.map_err(transport_error)
}
