//! HTTP push gateway client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use casedesk_core::config::PushConfig;
use casedesk_core::error::{AppError, ErrorKind};
use casedesk_core::result::AppResult;
use casedesk_core::traits::PushGateway;
use casedesk_core::types::push::{DeliveryOutcome, PushMessage};

/// Gateway error kind marking a permanently dead token.
const INVALID_TOKEN: &str = "invalid-token";

#[derive(Debug, Deserialize)]
struct MulticastResponse {
    results: Vec<MulticastResult>,
}

#[derive(Debug, Deserialize)]
struct MulticastResult {
    token: String,
    success: bool,
    #[serde(default, alias = "errorKind")]
    error_kind: Option<String>,
}

impl From<MulticastResult> for DeliveryOutcome {
    fn from(result: MulticastResult) -> Self {
        if result.success {
            DeliveryOutcome::delivered(result.token)
        } else if result.error_kind.as_deref() == Some(INVALID_TOKEN) {
            DeliveryOutcome::invalid(result.token)
        } else {
            DeliveryOutcome::transient(result.token)
        }
    }
}

/// Push gateway reached over HTTP with a JSON multicast request.
#[derive(Debug, Clone)]
pub struct HttpPushGateway {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpPushGateway {
    /// Build a client from the push configuration.
    pub fn from_config(config: &PushConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build push client", e)
            })?;

        Ok(Self {
            client,
            url: config.gateway_url.clone(),
            api_key: Some(config.api_key.clone()).filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send_multicast(&self, message: &PushMessage) -> AppResult<Vec<DeliveryOutcome>> {
        let mut request = self.client.post(&self.url).json(message);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Push gateway unreachable", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Push gateway returned {status}: {body}"
            )));
        }

        let parsed: MulticastResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Malformed push gateway response",
                e,
            )
        })?;

        debug!(tokens = message.tokens.len(), results = parsed.results.len(), "Multicast sent");
        Ok(parsed.results.into_iter().map(DeliveryOutcome::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedesk_core::types::push::DeliveryStatus;

    #[test]
    fn test_response_classification() {
        let parsed: MulticastResponse = serde_json::from_str(
            r#"{"results":[
                {"token":"a","success":true},
                {"token":"b","success":false,"error_kind":"invalid-token"},
                {"token":"c","success":false,"errorKind":"transient"},
                {"token":"d","success":false}
            ]}"#,
        )
        .unwrap();

        let statuses: Vec<_> = parsed
            .results
            .into_iter()
            .map(|r| DeliveryOutcome::from(r).status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                DeliveryStatus::Delivered,
                DeliveryStatus::InvalidToken,
                DeliveryStatus::Transient,
                DeliveryStatus::Transient,
            ]
        );
    }

    #[test]
    fn test_blank_api_key_is_not_sent() {
        let gateway = HttpPushGateway::from_config(&PushConfig::default()).unwrap();
        assert!(gateway.api_key.is_none());
    }
}
