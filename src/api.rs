use crate::config::BackendConfig;
use crate::models::SqlRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One prior turn handed to the backend as conversational context.
///
/// Only role and narrative content cross this boundary; charts, result rows
/// and other presentation payloads stay on the controller side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Options sent with every generate call.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct GenerateOptions {
    pub include_charts: bool,
    pub max_results: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { include_charts: true, max_results: 100 }
    }
}

/// Successful outcome of a generate call.
///
/// Every field is optional: the backend may answer with narrative only, or
/// with any combination of SQL text, result rows and a chart artifact.
#[derive(Debug, Clone, Default)]
pub struct GenerateReply {
    pub narrative: Option<String>,
    pub sql_query: Option<String>,
    pub sql_results: Option<Vec<SqlRow>>,
    pub chart_html: Option<String>,
}

// Trait defining the interface to the text-to-SQL backend service. The
// controller only ever talks to this trait, so tests can substitute a
// scripted in-memory backend.
#[async_trait]
pub trait Text2SqlBackend: Send + Sync {
    /// Probe backend reachability. Any error means unreachable.
    async fn health_check(&self) -> Result<()>;

    /// Translate `query` into SQL and execute it, using `history` as
    /// conversational context.
    ///
    /// Implementations must collapse every failure mode into the `Err`
    /// channel: transport errors, non-success HTTP statuses, malformed
    /// bodies, and well-formed bodies that report `success = false`. The
    /// caller never has a second failure channel to check.
    async fn generate_sql(
        &self,
        query: &str,
        history: &[HistoryEntry],
        options: &GenerateOptions,
    ) -> Result<GenerateReply>;
}

// --- HTTP Implementation ---

#[derive(Serialize, Debug)]
struct GenerateRequestBody<'a> {
    query: &'a str,
    include_charts: bool,
    max_results: u32,
    chat_history: &'a [HistoryEntry],
}

// Response shape of the generate endpoint. `success` is the application-level
// outcome flag; a missing flag is treated as failure.
#[derive(Deserialize, Debug)]
struct GenerateResponseBody {
    #[serde(default)]
    success: bool,
    response: Option<String>,
    chart_html: Option<String>,
    sql_query: Option<String>,
    sql_results: Option<Vec<SqlRow>>,
    error: Option<String>,
}

fn reply_from_body(body: GenerateResponseBody) -> Result<GenerateReply> {
    if !body.success {
        let message = body.error.unwrap_or_else(|| "Query execution failed".to_string());
        return Err(anyhow::anyhow!(message));
    }
    Ok(GenerateReply {
        narrative: body.response,
        sql_query: body.sql_query,
        sql_results: body.sql_results,
        chart_html: body.chart_html,
    })
}

/// Backend client speaking JSON over HTTP to the text-to-SQL service.
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
}

impl HttpBackendClient {
    /// Builds a client for the service at `config.base_url`.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Text2SqlBackend for HttpBackendClient {
    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/api/v1/health/", self.base_url);
        log::debug!("Probing backend health: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Health check request failed")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Health check returned status {}",
                response.status()
            ));
        }
        Ok(())
    }

    async fn generate_sql(
        &self,
        query: &str,
        history: &[HistoryEntry],
        options: &GenerateOptions,
    ) -> Result<GenerateReply> {
        let url = format!("{}/api/v1/text2sql/generate", self.base_url);
        log::info!(
            "Sending generate request to {} ({} history entries)",
            url,
            history.len()
        );

        let request_body = GenerateRequestBody {
            query,
            include_charts: options.include_charts,
            max_results: options.max_results,
            chat_history: history,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .context("Failed to send generate request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            log::error!("Generate request failed with status {}: {}", status, error_body);
            return Err(anyhow::anyhow!(
                "Generate request failed with status {}: {}",
                status,
                error_body
            ));
        }

        let body: GenerateResponseBody = response
            .json()
            .await
            .context("Failed to parse generate response")?;
        reply_from_body(body)
    }
}
