//! Gateway module for the intent explorer.
//!
//! This module defines the read-only query interfaces the explorer core
//! depends on: the intent registry (canonical request records keyed by
//! intent ID) and the event store (indexed deposit, fill, and settlement
//! records keyed by request hash or time window). Both upstreams are
//! eventually consistent with on-chain state; ingestion lag is expected
//! and tolerated by the callers.
//!
//! Every call runs under a per-request timeout and a bounded exponential
//! retry. When the retry budget is exhausted the error propagates and the
//! whole operation fails; partial results are never returned.

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use explorer_types::{RawIntentRecord, RequestEvents, SettlementEvent};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod indexer_graphql;
	pub mod registry_http;
}

pub use implementations::indexer_graphql::GraphqlEventStore;
pub use implementations::registry_http::HttpRegistryGateway;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
	/// Transport-level failure talking to the upstream.
	#[error("HTTP error: {0}")]
	Http(String),
	/// The upstream rejected or failed the query.
	#[error("query error: {0}")]
	Query(String),
	/// The upstream returned a payload that could not be interpreted.
	#[error("invalid response: {0}")]
	InvalidResponse(String),
}

/// Trait defining read-only access to the intent registry.
///
/// The registry stores the original cross-chain request (sources,
/// destination, signatures, lifecycle flags) and is queried by intent ID.
#[async_trait]
pub trait RegistryGateway: Send + Sync {
	/// Looks up the canonical intent record by registry ID.
	///
	/// Returns `Ok(None)` when the registry has no record for the ID;
	/// transport and query failures are errors.
	async fn request_by_id(&self, id: &str) -> Result<Option<RawIntentRecord>, GatewayError>;
}

/// Trait defining read-only access to the indexed event store.
#[async_trait]
pub trait EventStoreGateway: Send + Sync {
	/// Retrieves the deposit and fill records for a request hash.
	async fn events_by_request_hash(
		&self,
		request_hash: &str,
	) -> Result<RequestEvents, GatewayError>;

	/// Retrieves every settlement whose timestamp falls in
	/// `[start, end]` (both inclusive), ordered by timestamp ascending.
	async fn settlements_in_window(
		&self,
		start: u64,
		end: u64,
	) -> Result<Vec<SettlementEvent>, GatewayError>;
}

/// Retry budget applied around each gateway call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	/// Delay before the first retry.
	pub initial_interval: Duration,
	/// Total time budget across all attempts; once exceeded the last
	/// error propagates.
	pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			initial_interval: Duration::from_millis(250),
			max_elapsed: Duration::from_secs(10),
		}
	}
}

impl RetryPolicy {
	/// Builds a policy with the given total budget in seconds.
	pub fn with_max_elapsed_secs(secs: u64) -> Self {
		Self {
			max_elapsed: Duration::from_secs(secs),
			..Self::default()
		}
	}
}

/// Runs a gateway operation under the bounded retry policy.
///
/// The operation classifies its own failures: transient errors are
/// retried until the budget is exhausted, permanent errors propagate
/// immediately.
pub(crate) async fn retry_gateway<T, F, Fut>(
	policy: &RetryPolicy,
	operation: F,
) -> Result<T, GatewayError>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, backoff::Error<GatewayError>>>,
{
	let backoff = ExponentialBackoffBuilder::new()
		.with_initial_interval(policy.initial_interval)
		.with_max_elapsed_time(Some(policy.max_elapsed))
		.build();
	backoff::future::retry(backoff, operation).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	#[tokio::test]
	async fn test_retry_gateway_retries_transient_errors() {
		let attempts = AtomicU32::new(0);
		let policy = RetryPolicy {
			initial_interval: Duration::from_millis(1),
			max_elapsed: Duration::from_secs(5),
		};

		let result = retry_gateway(&policy, || async {
			if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
				Err(backoff::Error::transient(GatewayError::Http(
					"connection reset".to_string(),
				)))
			} else {
				Ok(42u32)
			}
		})
		.await;

		assert_eq!(result.unwrap(), 42);
		assert_eq!(attempts.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn test_retry_gateway_stops_on_permanent_errors() {
		let attempts = AtomicU32::new(0);
		let policy = RetryPolicy::default();

		let result: Result<u32, GatewayError> = retry_gateway(&policy, || async {
			attempts.fetch_add(1, Ordering::SeqCst);
			Err(backoff::Error::permanent(GatewayError::Query(
				"bad query".to_string(),
			)))
		})
		.await;

		assert!(matches!(result, Err(GatewayError::Query(_))));
		assert_eq!(attempts.load(Ordering::SeqCst), 1);
	}
}
