//! Intent snapshot assembly.
//!
//! Joins the canonical registry record with the deposit and fill events
//! observed for its request hash into one normalized [`IntentSnapshot`].
//! The request hash is derived from the first signature entry and is the
//! join key into the event store. All base64-encoded numeric fields are
//! decoded to exact decimal strings here; no floating-point conversion
//! happens in the core.

use crate::CoreError;
use explorer_gateway::{EventStoreGateway, RegistryGateway};
use explorer_types::{
	decode_base64_to_address, decode_base64_to_hash, decode_base64_to_uint, truncate_id,
	DestinationLeg, IntentSnapshot, RawDestinationLeg, RawIntentRecord, RawSourceLeg,
	RequestEvents, SourceLeg,
};
use std::sync::Arc;

/// A normalized snapshot together with its event-store join key.
#[derive(Debug, Clone)]
pub struct AssembledIntent {
	/// The normalized intent view.
	pub snapshot: IntentSnapshot,
	/// 0x-prefixed request hash derived from the signature material.
	pub request_hash: String,
}

/// Assembles normalized intent snapshots from registry and event data.
///
/// Read-only; every call fetches fresh data and holds no state between
/// calls. Gateways are injected so callers can substitute test doubles.
pub struct IntentAssembler {
	registry: Arc<dyn RegistryGateway>,
	events: Arc<dyn EventStoreGateway>,
}

impl IntentAssembler {
	/// Creates an assembler over the given gateways.
	pub fn new(registry: Arc<dyn RegistryGateway>, events: Arc<dyn EventStoreGateway>) -> Self {
		Self { registry, events }
	}

	/// Looks up an intent by registry ID and assembles its snapshot.
	///
	/// Fails with [`CoreError::NotFound`] when the registry has no record
	/// for the ID and with [`CoreError::MissingSignature`] when the record
	/// lacks the signature material needed to derive the request hash.
	pub async fn assemble(&self, intent_id: &str) -> Result<AssembledIntent, CoreError> {
		let record = self
			.registry
			.request_by_id(intent_id)
			.await?
			.ok_or_else(|| CoreError::NotFound(intent_id.to_string()))?;

		let request_hash = derive_request_hash(&record)?;
		tracing::debug!(
			"Assembling intent {} (request hash {})",
			record.id,
			truncate_id(&request_hash)
		);

		let events = self.events.events_by_request_hash(&request_hash).await?;
		let snapshot = build_snapshot(record, &events)?;

		Ok(AssembledIntent {
			snapshot,
			request_hash,
		})
	}
}

/// Derives the event-store join key from the record's signature material.
fn derive_request_hash(record: &RawIntentRecord) -> Result<String, CoreError> {
	let entry = record
		.signature_data
		.first()
		.filter(|entry| !entry.hash.is_empty())
		.ok_or_else(|| CoreError::MissingSignature(record.id.clone()))?;
	Ok(decode_base64_to_hash(&entry.hash)?)
}

fn decode_source(leg: &RawSourceLeg) -> Result<SourceLeg, CoreError> {
	Ok(SourceLeg {
		universe: leg.universe.clone(),
		chain_id: decode_base64_to_uint(&leg.chain_id)?,
		token_address: decode_base64_to_address(&leg.token_address)?,
		value: decode_base64_to_uint(&leg.value)?,
		status: leg.status.clone(),
	})
}

fn decode_destination(leg: &RawDestinationLeg) -> Result<DestinationLeg, CoreError> {
	Ok(DestinationLeg {
		token_address: decode_base64_to_address(&leg.token_address)?,
		value: decode_base64_to_uint(&leg.value)?,
	})
}

/// Builds the normalized snapshot from the decoded record and the first
/// deposit/fill observed for its request hash.
///
/// The registry carries no settlement or refund timestamp of its own;
/// when the corresponding flag is set the fill timestamp is used as a
/// proxy.
fn build_snapshot(
	record: RawIntentRecord,
	events: &RequestEvents,
) -> Result<IntentSnapshot, CoreError> {
	let deposit = events.deposits.first();
	let fill = events.fills.first();

	let sources = record
		.sources
		.iter()
		.map(decode_source)
		.collect::<Result<Vec<_>, _>>()?;
	let destinations = record
		.destinations
		.iter()
		.map(decode_destination)
		.collect::<Result<Vec<_>, _>>()?;

	Ok(IntentSnapshot {
		request_id: record.id,
		user: record.user,
		nonce: record.nonce,
		expiry: record.expiry,
		sources,
		destination_chain_id: decode_base64_to_uint(&record.destination_chain_id)?,
		destination_universe: record.destination_universe,
		destinations,
		deposited: record.deposited,
		fulfilled: record.fulfilled,
		settled: record.settled,
		refunded: record.refunded,
		created_at: record.creation_block.parse().unwrap_or(0),
		deposited_at: deposit.map(|d| d.timestamp),
		filled_at: fill.map(|f| f.timestamp),
		settled_at: record.settled.then(|| fill.map(|f| f.timestamp)).flatten(),
		refunded_at: record.refunded.then(|| fill.map(|f| f.timestamp)).flatten(),
		depositor: deposit.map(|d| d.depositor.clone()),
		deposit_tx_hash: deposit.map(|d| d.tx_hash.clone()),
		solver: fill.map(|f| f.solver.clone()),
		fill_tx_hash: fill.map(|f| f.tx_hash.clone()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use base64::{engine::general_purpose::STANDARD, Engine as _};
	use explorer_gateway::GatewayError;
	use explorer_types::{DepositEvent, FillEvent, SettlementEvent, SignatureEntry};

	struct StubRegistry {
		record: Option<RawIntentRecord>,
	}

	#[async_trait]
	impl RegistryGateway for StubRegistry {
		async fn request_by_id(&self, _id: &str) -> Result<Option<RawIntentRecord>, GatewayError> {
			Ok(self.record.clone())
		}
	}

	struct StubEventStore {
		events: RequestEvents,
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
			_start: u64,
			_end: u64,
		) -> Result<Vec<SettlementEvent>, GatewayError> {
			Ok(Vec::new())
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

	fn test_record(settled: bool) -> RawIntentRecord {
		RawIntentRecord {
			id: "150".to_string(),
			sources: vec![RawSourceLeg {
				universe: "EVM".to_string(),
				chain_id: encode_uint(137),
				token_address: encode_address(0xaa),
				value: encode_uint(1_000_000_000_000_000_000),
				status: "OK".to_string(),
				collection_fee_required: String::new(),
			}],
			destination_chain_id: encode_uint(139),
			destinations: vec![RawDestinationLeg {
				token_address: encode_address(0xbb),
				value: encode_uint(990_000_000_000_000_000),
			}],
			nonce: "nonce-1".to_string(),
			expiry: 1_750_000_000,
			destination_universe: "EVM".to_string(),
			signature_data: vec![SignatureEntry {
				universe: "EVM".to_string(),
				address: "0xsigner".to_string(),
				signature: String::new(),
				hash: STANDARD.encode([0xab, 0xcd, 0x12, 0x34]),
			}],
			user: "arcana1user".to_string(),
			fulfilled_by: None,
			fulfilled_at: None,
			deposited: true,
			fulfilled: true,
			settled,
			refunded: false,
			creation_block: "123456".to_string(),
		}
	}

	fn test_events() -> RequestEvents {
		RequestEvents {
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
		}
	}

	fn assembler(record: Option<RawIntentRecord>, events: RequestEvents) -> IntentAssembler {
		IntentAssembler::new(
			Arc::new(StubRegistry { record }),
			Arc::new(StubEventStore { events }),
		)
	}

	#[tokio::test]
	async fn test_assemble_decodes_record_and_joins_events() {
		let assembled = assembler(Some(test_record(true)), test_events())
			.assemble("150")
			.await
			.unwrap();

		assert_eq!(assembled.request_hash, "0xabcd1234");

		let snapshot = assembled.snapshot;
		assert_eq!(snapshot.request_id, "150");
		assert_eq!(snapshot.sources[0].chain_id, "137");
		assert_eq!(snapshot.sources[0].value, "1000000000000000000");
		assert_eq!(
			snapshot.sources[0].token_address,
			"0x00000000000000000000000000000000000000aa"
		);
		assert_eq!(snapshot.destination_chain_id, "139");
		assert_eq!(snapshot.destinations[0].value, "990000000000000000");
		assert_eq!(snapshot.created_at, 123456);
		assert_eq!(snapshot.deposited_at, Some(900));
		assert_eq!(snapshot.filled_at, Some(1000));
		assert_eq!(snapshot.settled_at, Some(1000));
		assert_eq!(snapshot.refunded_at, None);
		assert_eq!(snapshot.depositor.as_deref(), Some("0xdep"));
		assert_eq!(snapshot.solver.as_deref(), Some("0xsol"));
		assert_eq!(snapshot.fill_tx_hash.as_deref(), Some("0xf1"));
	}

	#[tokio::test]
	async fn test_assemble_unsettled_has_no_settled_at() {
		let assembled = assembler(Some(test_record(false)), test_events())
			.assemble("150")
			.await
			.unwrap();

		assert!(!assembled.snapshot.settled);
		assert_eq!(assembled.snapshot.settled_at, None);
	}

	#[tokio::test]
	async fn test_assemble_without_events_leaves_lifecycle_fields_empty() {
		let assembled = assembler(Some(test_record(false)), RequestEvents::default())
			.assemble("150")
			.await
			.unwrap();

		let snapshot = assembled.snapshot;
		assert_eq!(snapshot.deposited_at, None);
		assert_eq!(snapshot.filled_at, None);
		assert_eq!(snapshot.depositor, None);
		assert_eq!(snapshot.solver, None);
	}

	#[tokio::test]
	async fn test_assemble_unknown_intent_is_not_found() {
		let result = assembler(None, RequestEvents::default()).assemble("999").await;
		assert!(matches!(result, Err(CoreError::NotFound(id)) if id == "999"));
	}

	#[tokio::test]
	async fn test_assemble_without_signature_data_fails() {
		let mut record = test_record(false);
		record.signature_data.clear();

		let result = assembler(Some(record), RequestEvents::default())
			.assemble("150")
			.await;
		assert!(matches!(result, Err(CoreError::MissingSignature(_))));
	}

	#[tokio::test]
	async fn test_assemble_with_empty_hash_fails() {
		let mut record = test_record(false);
		record.signature_data[0].hash = String::new();

		let result = assembler(Some(record), RequestEvents::default())
			.assemble("150")
			.await;
		assert!(matches!(result, Err(CoreError::MissingSignature(_))));
	}
}
