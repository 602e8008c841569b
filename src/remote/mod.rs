//! HTTP implementation of the fetch and submission collaborators.
//!
//! # Example
//!
//! ```ignore
//! use facturator::core::ReviewConfig;
//! use facturator::remote::HttpCollaborator;
//! use facturator::session::Reviewer;
//!
//! let http = HttpCollaborator::new(
//!     "https://example.com/invoices/pending",
//!     "https://example.com/invoices/commit",
//! )?;
//! let mut reviewer = Reviewer::open(http.clone(), http, ReviewConfig::default()).await;
//! let outcome = reviewer.submit_current().await?;
//! ```

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::core::ReviewError;
use crate::payload::{Batch, parse_batch};
use crate::session::{InvoiceSource, SubmissionSink};

/// Request timeout for both endpoints.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the pending batch with `GET` and commits records with `POST`.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    client: reqwest::Client,
    fetch_url: String,
    submit_url: String,
}

impl HttpCollaborator {
    /// # Errors
    ///
    /// Returns [`ReviewError::Remote`] if the HTTP client cannot be built.
    pub fn new(
        fetch_url: impl Into<String>,
        submit_url: impl Into<String>,
    ) -> Result<Self, ReviewError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ReviewError::Remote(e.to_string()))?;
        Ok(Self {
            client,
            fetch_url: fetch_url.into(),
            submit_url: submit_url.into(),
        })
    }

    pub fn fetch_url(&self) -> &str {
        &self.fetch_url
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }
}

impl InvoiceSource for HttpCollaborator {
    async fn fetch(&self) -> Result<Batch, ReviewError> {
        debug!(url = %self.fetch_url, "fetching pending invoices");
        let resp = self
            .client
            .get(&self.fetch_url)
            .send()
            .await
            .map_err(|e| ReviewError::Remote(e.to_string()))?;
        let body = checked_body(resp).await?;
        parse_batch(&body)
    }
}

impl SubmissionSink for HttpCollaborator {
    async fn submit(&self, payload: &Value) -> Result<(), ReviewError> {
        debug!(url = %self.submit_url, "submitting invoice");
        let resp = self
            .client
            .post(&self.submit_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ReviewError::Remote(e.to_string()))?;
        checked_body(resp).await.map(drop)
    }
}

async fn checked_body(resp: reqwest::Response) -> Result<String, ReviewError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ReviewError::Remote(e.to_string()))?;
    if !status.is_success() {
        return Err(status_error(status.as_u16(), &body));
    }
    Ok(body)
}

fn status_error(status: u16, body: &str) -> ReviewError {
    let body = body.trim();
    if body.is_empty() {
        ReviewError::Remote(format!("HTTP {status}"))
    } else {
        ReviewError::Remote(format!("HTTP {status}: {body}"))
    }
}
