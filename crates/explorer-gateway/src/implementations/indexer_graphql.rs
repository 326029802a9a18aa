//! GraphQL client for the event-store indexer.
//!
//! The ingestion pipeline persists Deposit, Fill, and Settle events into
//! an indexer queryable over GraphQL. This client issues the two queries
//! the core depends on: deposit/fill lookup by request hash, and
//! settlement candidates in a time window ordered by timestamp
//! ascending. A GraphQL `errors` array fails the call; the core never
//! sees silently partial data.

use crate::{retry_gateway, EventStoreGateway, GatewayError, RetryPolicy};
use async_trait::async_trait;
use explorer_types::{RequestEvents, SettlementEvent};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_EVENTS_QUERY: &str = r#"
query RequestEvents($requestHash: String!) {
	deposits: DepositEvent(where: { requestHash: { _eq: $requestHash } }) {
		depositor
		chainId
		timestamp
		txHash
	}
	fills: FillEvent(where: { requestHash: { _eq: $requestHash } }) {
		solver
		from
		chainId
		timestamp
		txHash
	}
}"#;

const SETTLEMENT_WINDOW_QUERY: &str = r#"
query SettlementCandidates($timeWindowStart: Int!, $timeWindowEnd: Int!) {
	settlements: SettleEvent(
		where: { timestamp: { _gte: $timeWindowStart, _lte: $timeWindowEnd } }
		order_by: { timestamp: asc }
	) {
		id
		nonce
		solvers
		tokens
		amounts
		chainId
		blockNumber
		timestamp
		txHash
	}
}"#;

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
	data: Option<T>,
	errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
	message: String,
}

#[derive(Debug, Deserialize)]
struct SettlementWindowData {
	settlements: Vec<SettlementEvent>,
}

/// Event store gateway over the indexer's GraphQL endpoint.
pub struct GraphqlEventStore {
	client: reqwest::Client,
	url: String,
	retry: RetryPolicy,
}

impl GraphqlEventStore {
	/// Creates an indexer client with a pooled connection and the given
	/// per-request timeout.
	pub fn new(
		url: impl Into<String>,
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
			url: url.into(),
			retry,
		})
	}

	/// Posts a GraphQL query and decodes the `data` payload.
	async fn post_query<T: DeserializeOwned>(
		&self,
		query: &'static str,
		variables: serde_json::Value,
	) -> Result<T, GatewayError> {
		retry_gateway(&self.retry, || {
			let variables = variables.clone();
			async move {
				let response = self
					.client
					.post(&self.url)
					.json(&serde_json::json!({
						"query": query,
						"variables": variables,
					}))
					.send()
					.await
					.map_err(|e| {
						backoff::Error::transient(GatewayError::Http(format!(
							"indexer request failed: {}",
							e
						)))
					})?;

				let status = response.status();
				if status.is_server_error() {
					return Err(backoff::Error::transient(GatewayError::Http(format!(
						"indexer returned {}",
						status
					))));
				}
				if !status.is_success() {
					return Err(backoff::Error::permanent(GatewayError::Http(format!(
						"indexer returned {}",
						status
					))));
				}

				let body = response.text().await.map_err(|e| {
					backoff::Error::transient(GatewayError::Http(format!(
						"indexer response read failed: {}",
						e
					)))
				})?;

				parse_graphql::<T>(&body).map_err(backoff::Error::permanent)
			}
		})
		.await
	}
}

/// Decodes a GraphQL response body, surfacing `errors` as query failures.
fn parse_graphql<T: DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
	let envelope: GraphqlResponse<T> = serde_json::from_str(body)
		.map_err(|e| GatewayError::InvalidResponse(format!("indexer payload: {}", e)))?;

	if let Some(errors) = envelope.errors {
		let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
		return Err(GatewayError::Query(messages.join("; ")));
	}

	envelope
		.data
		.ok_or_else(|| GatewayError::InvalidResponse("missing data in indexer response".into()))
}

#[async_trait]
impl EventStoreGateway for GraphqlEventStore {
	async fn events_by_request_hash(
		&self,
		request_hash: &str,
	) -> Result<RequestEvents, GatewayError> {
		// The indexer stores request hashes lowercased.
		let request_hash = request_hash.to_lowercase();
		self.post_query(
			REQUEST_EVENTS_QUERY,
			serde_json::json!({ "requestHash": request_hash }),
		)
		.await
	}

	async fn settlements_in_window(
		&self,
		start: u64,
		end: u64,
	) -> Result<Vec<SettlementEvent>, GatewayError> {
		let data: SettlementWindowData = self
			.post_query(
				SETTLEMENT_WINDOW_QUERY,
				serde_json::json!({
					"timeWindowStart": start,
					"timeWindowEnd": end,
				}),
			)
			.await?;
		Ok(data.settlements)
	}
}
