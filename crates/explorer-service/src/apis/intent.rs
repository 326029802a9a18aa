//! Intent snapshot and settlement match endpoints.
//!
//! Thin request handlers over the core: assemble the snapshot, run the
//! matcher, and translate core errors into HTTP error responses that
//! distinguish "no such intent" from transient upstream failure.

use crate::server::AppState;
use explorer_core::CoreError;
use explorer_types::{APIError, IntentSnapshot, SettlementMatch};
use serde::{Deserialize, Serialize};

/// Response for the settlement matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementMatchesResponse {
	/// The assembled intent snapshot.
	pub snapshot: IntentSnapshot,
	/// Ranked settlement candidates, descending confidence.
	pub matches: Vec<SettlementMatch>,
}

/// Assembles the snapshot for an intent ID.
pub async fn get_intent(id: &str, state: &AppState) -> Result<IntentSnapshot, CoreError> {
	let assembled = state.assembler.assemble(id).await?;
	Ok(assembled.snapshot)
}

/// Assembles the snapshot and ranks its settlement candidates.
pub async fn get_settlement_matches(
	id: &str,
	state: &AppState,
) -> Result<SettlementMatchesResponse, CoreError> {
	let assembled = state.assembler.assemble(id).await?;
	let matches = state
		.matcher
		.find_matches(&assembled.snapshot, &assembled.request_hash)
		.await?;

	Ok(SettlementMatchesResponse {
		snapshot: assembled.snapshot,
		matches,
	})
}

/// Maps core errors onto the HTTP error surface.
///
/// Not-found and incomplete registry data are non-retryable; gateway
/// failures are surfaced as retryable so the caller can offer a retry
/// affordance.
pub fn into_api_error(err: CoreError) -> APIError {
	match err {
		CoreError::NotFound(id) => APIError::NotFound {
			message: format!("no intent with id {}", id),
		},
		CoreError::MissingSignature(id) => APIError::UnprocessableEntity {
			error_type: "missing_signature".to_string(),
			message: format!("intent {} has no signature data to derive a request hash", id),
		},
		CoreError::Gateway(e) => APIError::BadGateway {
			message: e.to_string(),
		},
		CoreError::Decode(e) => APIError::UnprocessableEntity {
			error_type: "malformed_record".to_string(),
			message: e.to_string(),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use explorer_gateway::GatewayError;
	use explorer_types::DecodeError;

	#[test]
	fn test_not_found_maps_to_404() {
		let err = into_api_error(CoreError::NotFound("150".to_string()));
		assert_eq!(err.status_code(), 404);
		assert!(!err.to_error_response().retryable);
	}

	#[test]
	fn test_missing_signature_maps_to_422() {
		let err = into_api_error(CoreError::MissingSignature("150".to_string()));
		assert_eq!(err.status_code(), 422);
		assert_eq!(err.to_error_response().error, "missing_signature");
	}

	#[test]
	fn test_gateway_failure_maps_to_retryable_502() {
		let err = into_api_error(CoreError::Gateway(GatewayError::Http(
			"connection refused".to_string(),
		)));
		assert_eq!(err.status_code(), 502);
		assert!(err.to_error_response().retryable);
	}

	#[test]
	fn test_decode_failure_maps_to_422() {
		let err = into_api_error(CoreError::Decode(DecodeError::IntegerTooWide(33)));
		assert_eq!(err.status_code(), 422);
		assert_eq!(err.to_error_response().error, "malformed_record");
	}

	mod end_to_end {
		use super::super::*;
		use async_trait::async_trait;
		use base64::{engine::general_purpose::STANDARD, Engine as _};
		use explorer_core::{IntentAssembler, SettlementMatcher};
		use explorer_gateway::{EventStoreGateway, GatewayError, RegistryGateway};
		use explorer_types::{
			DepositEvent, FillEvent, MatcherConfig, RawDestinationLeg, RawIntentRecord,
			RawSourceLeg, RequestEvents, SettlementEvent, SignatureEntry,
		};
		use std::sync::Arc;

		struct StubRegistry {
			record: Option<RawIntentRecord>,
		}

		#[async_trait]
		impl RegistryGateway for StubRegistry {
			async fn request_by_id(
				&self,
				_id: &str,
			) -> Result<Option<RawIntentRecord>, GatewayError> {
				Ok(self.record.clone())
			}
		}

		struct StubEventStore {
			events: RequestEvents,
			settlements: Vec<SettlementEvent>,
		}

		#[async_trait]
		impl EventStoreGateway for StubEventStore {
			async fn events_by_request_hash(
				&self,
				_request_hash: &str,
			) -> Result<RequestEvents, GatewayError> {
				Ok(self.events.clone())
			}

			async fn settlements_in_window(
				&self,
				start: u64,
				end: u64,
			) -> Result<Vec<SettlementEvent>, GatewayError> {
				Ok(self
					.settlements
					.iter()
					.filter(|s| s.timestamp >= start && s.timestamp <= end)
					.cloned()
					.collect())
			}
		}

		fn encode_uint(value: u128) -> String {
			STANDARD.encode(value.to_be_bytes())
		}

		fn encode_address(last_byte: u8) -> String {
			let mut bytes = [0u8; 32];
			bytes[31] = last_byte;
			STANDARD.encode(bytes)
		}

		fn settled_record() -> RawIntentRecord {
			RawIntentRecord {
				id: "150".to_string(),
				sources: vec![RawSourceLeg {
					universe: "EVM".to_string(),
					chain_id: encode_uint(137),
					token_address: encode_address(0xaa),
					value: encode_uint(1_000_000),
					status: "OK".to_string(),
					collection_fee_required: String::new(),
				}],
				destination_chain_id: encode_uint(139),
				destinations: vec![RawDestinationLeg {
					token_address: encode_address(0xbb),
					value: encode_uint(1_000_000),
				}],
				nonce: "nonce-1".to_string(),
				expiry: 1_750_000_000,
				destination_universe: "EVM".to_string(),
				signature_data: vec![SignatureEntry {
					universe: "EVM".to_string(),
					address: "0xsigner".to_string(),
					signature: String::new(),
					hash: STANDARD.encode([0xab, 0xcd]),
				}],
				user: "arcana1user".to_string(),
				fulfilled_by: None,
				fulfilled_at: None,
				deposited: true,
				fulfilled: true,
				settled: true,
				refunded: false,
				creation_block: "123456".to_string(),
			}
		}

		fn state(record: Option<RawIntentRecord>, settlements: Vec<SettlementEvent>) -> AppState {
			let events: Arc<dyn EventStoreGateway> = Arc::new(StubEventStore {
				events: RequestEvents {
					deposits: vec![DepositEvent {
						depositor: "0xdep".to_string(),
						chain_id: 137,
						timestamp: 900,
						tx_hash: "0xd1".to_string(),
					}],
					fills: vec![FillEvent {
						solver: "0xsol".to_string(),
						from: "0xfrom".to_string(),
						chain_id: 139,
						timestamp: 1000,
						tx_hash: "0xf1".to_string(),
					}],
				},
				settlements,
			});
			let registry: Arc<dyn RegistryGateway> = Arc::new(StubRegistry { record });

			AppState {
				assembler: Arc::new(IntentAssembler::new(registry, events.clone())),
				matcher: Arc::new(SettlementMatcher::new(events, MatcherConfig::default())),
			}
		}

		#[tokio::test]
		async fn test_settlement_matches_flow() {
			let settlement = SettlementEvent {
				id: "s-1".to_string(),
				nonce: "0x01".to_string(),
				solvers: vec!["0xsol".to_string()],
				tokens: vec!["0x00000000000000000000000000000000000000bb".to_string()],
				amounts: vec!["1000000".to_string()],
				chain_id: 139,
				block_number: 42,
				timestamp: 1000,
				tx_hash: "0xs1".to_string(),
			};

			let response = get_settlement_matches("150", &state(Some(settled_record()), vec![settlement]))
				.await
				.unwrap();

			assert_eq!(response.snapshot.request_id, "150");
			assert_eq!(response.matches.len(), 1);
			assert_eq!(response.matches[0].confidence, 100.0);
		}

		#[tokio::test]
		async fn test_unknown_intent_flows_to_not_found() {
			let result = get_intent("999", &state(None, Vec::new())).await;
			let err = into_api_error(result.unwrap_err());
			assert_eq!(err.status_code(), 404);
		}
	}
}
