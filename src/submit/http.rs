//! JSON-over-HTTP registration endpoint.

use std::time::Duration;

use serde::Deserialize;

use super::{EndpointError, Registered, RegistrationEndpoint};
use crate::core::RegistrationForm;

/// Connection timeout used unless overridden.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body the registration API sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// POSTs the form as camelCase JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpRegistrationEndpoint {
    client: reqwest::Client,
    url: String,
    connect_timeout: Duration,
}

impl HttpRegistrationEndpoint {
    pub fn new(url: impl Into<String>) -> Result<Self, EndpointError> {
        Self::with_connect_timeout(url, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Bounds only connection setup; an established request runs to completion.
    pub fn with_connect_timeout(
        url: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self, EndpointError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| EndpointError::Network(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            connect_timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl RegistrationEndpoint for HttpRegistrationEndpoint {
    async fn register(&self, form: &RegistrationForm) -> Result<Registered, EndpointError> {
        let resp = self
            .client
            .post(&self.url)
            .json(form)
            .send()
            .await
            .map_err(|e| EndpointError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| EndpointError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(EndpointError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| EndpointError::Parse(e.to_string()))
    }
}

/// Best-effort human message from an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}
