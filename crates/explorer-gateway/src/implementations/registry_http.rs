//! HTTP client for the intent registry service.
//!
//! The registry exposes the canonical request-for-funds records over a
//! REST endpoint; a record is fetched as `GET {base_url}/{id}` and
//! arrives wrapped in a `requestForFunds` envelope with binary and
//! numeric fields base64-encoded. This client only transports the
//! record; decoding happens in the assembler.

use crate::{retry_gateway, GatewayError, RegistryGateway, RetryPolicy};
use async_trait::async_trait;
use explorer_types::{truncate_id, RawIntentRecord};
use serde::Deserialize;
use std::time::Duration;

/// Response envelope for a single registry record.
#[derive(Debug, Deserialize)]
struct RequestForFundsEnvelope {
	#[serde(rename = "requestForFunds")]
	request_for_funds: Option<RawIntentRecord>,
}

/// Registry gateway over the request-for-funds REST endpoint.
pub struct HttpRegistryGateway {
	client: reqwest::Client,
	base_url: String,
	retry: RetryPolicy,
}

impl HttpRegistryGateway {
	/// Creates a registry client with a pooled connection and the given
	/// per-request timeout.
	pub fn new(
		base_url: impl Into<String>,
		timeout: Duration,
		retry: RetryPolicy,
	) -> Result<Self, GatewayError> {
		let client = reqwest::Client::builder()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(10)
			.timeout(timeout)
			.build()
			.map_err(|e| GatewayError::Http(e.to_string()))?;

		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			retry,
		})
	}
}

#[async_trait]
impl RegistryGateway for HttpRegistryGateway {
	async fn request_by_id(&self, id: &str) -> Result<Option<RawIntentRecord>, GatewayError> {
		let url = format!("{}/{}", self.base_url, id);
		tracing::debug!("Fetching registry record {}", truncate_id(id));

		retry_gateway(&self.retry, || async {
			let response = self.client.get(&url).send().await.map_err(|e| {
				backoff::Error::transient(GatewayError::Http(format!(
					"registry request failed: {}",
					e
				)))
			})?;

			let status = response.status();
			if status == reqwest::StatusCode::NOT_FOUND {
				return Ok(None);
			}
			if status.is_server_error() {
				return Err(backoff::Error::transient(GatewayError::Http(format!(
					"registry returned {}",
					status
				))));
			}
			if !status.is_success() {
				return Err(backoff::Error::permanent(GatewayError::Http(format!(
					"registry returned {}",
					status
				))));
			}

			let envelope: RequestForFundsEnvelope = response.json().await.map_err(|e| {
				backoff::Error::permanent(GatewayError::InvalidResponse(format!(
					"registry payload: {}",
					e
				)))
			})?;

			Ok(envelope.request_for_funds)
		})
		.await
	}
}
