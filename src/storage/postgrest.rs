//! # PostgREST Table Client
//!
//! Talks to the managed datastore through its REST interface at
//! `{url}/rest/v1/{table}`. Every request carries the access key both as the
//! `apikey` header and as a bearer token.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::errors::{StorageError, StorageResult};
use super::filter::{FilterExpr, SelectQuery};
use super::TableClient;

/// Endpoint and credential of the datastore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Access key sent with every request
    pub api_key: String,
}

impl PostgrestConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Collection URL of a table
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }
}

/// Error object returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// [`TableClient`] backed by a PostgREST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    config: PostgrestConfig,
    http: Client,
}

impl PostgrestClient {
    pub fn new(config: PostgrestConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &PostgrestConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
    }

    /// Read the response as a row set, or as an error object
    async fn rows(response: Response) -> StorageResult<Vec<Value>> {
        let response = Self::check(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(other) => Ok(vec![other]),
            Err(e) => Err(StorageError::Transport(format!("Invalid response body: {e}"))),
        }
    }

    async fn check(response: Response) -> StorageResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        debug!(%status, body = %text, "datastore rejected request");

        match serde_json::from_str::<PostgrestErrorBody>(&text) {
            Ok(body) => Err(StorageError::Rejected {
                message: body.message,
                code: body.code,
            }),
            Err(_) => Err(StorageError::Rejected {
                message: if text.is_empty() {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                } else {
                    text
                },
                code: Some(status.as_u16().to_string()),
            }),
        }
    }
}

#[async_trait]
impl TableClient for PostgrestClient {
    async fn select(&self, table: &str, query: &SelectQuery) -> StorageResult<Vec<Value>> {
        let mut params = vec![("select".to_string(), query.select_value())];
        params.extend(query.filters.iter().map(FilterExpr::to_query_pair));
        if !query.order.is_empty() {
            let order: Vec<String> = query.order.iter().map(|o| o.to_query_value()).collect();
            params.push(("order".to_string(), order.join(",")));
        }

        let response = self
            .request(reqwest::Method::GET, table)
            .query(&params)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StorageResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::POST, table)
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn update(
        &self,
        table: &str,
        patch: Map<String, Value>,
        filter: &FilterExpr,
    ) -> StorageResult<Vec<Value>> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .query(&[filter.to_query_pair(), ("select".to_string(), "*".to_string())])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn delete(&self, table: &str, filter: &FilterExpr) -> StorageResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&[filter.to_query_pair()])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
