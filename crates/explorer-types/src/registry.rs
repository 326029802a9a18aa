//! Raw intent registry wire shapes.
//!
//! These structs mirror the request-for-funds payload exactly as the
//! registry service returns it. Binary and numeric fields arrive
//! base64-encoded and are decoded by the assembler; nothing in this
//! module interprets them.

use serde::{Deserialize, Serialize};

/// A funding leg as stored by the registry, fields base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSourceLeg {
	/// Universe identifier for the source chain.
	pub universe: String,
	/// Base64-encoded big-endian chain ID.
	#[serde(rename = "chainID")]
	pub chain_id: String,
	/// Base64-encoded token address.
	#[serde(rename = "tokenAddress")]
	pub token_address: String,
	/// Base64-encoded big-endian amount in base units.
	pub value: String,
	/// Registry status flag for this leg.
	pub status: String,
	/// Base64-encoded collection fee requirement, passed through unchanged.
	#[serde(rename = "collectionFeeRequired", default)]
	pub collection_fee_required: String,
}

/// A payout leg as stored by the registry, fields base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDestinationLeg {
	/// Base64-encoded token address.
	#[serde(rename = "tokenAddress")]
	pub token_address: String,
	/// Base64-encoded big-endian amount in base units.
	pub value: String,
}

/// One signature entry attached to the registry record.
///
/// The first entry's `hash` field is the base64-encoded request hash,
/// which is the join key into the event store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureEntry {
	/// Universe the signature applies to.
	#[serde(default)]
	pub universe: String,
	/// Signing address.
	#[serde(default)]
	pub address: String,
	/// Signature bytes, base64-encoded.
	#[serde(default)]
	pub signature: String,
	/// Base64-encoded request hash.
	#[serde(default)]
	pub hash: String,
}

/// The canonical intent record as returned by the registry service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIntentRecord {
	/// Registry identifier for the request.
	pub id: String,
	/// Funding legs in registry order.
	pub sources: Vec<RawSourceLeg>,
	/// Base64-encoded big-endian destination chain ID.
	#[serde(rename = "destinationChainID")]
	pub destination_chain_id: String,
	/// Payout legs in registry order.
	pub destinations: Vec<RawDestinationLeg>,
	/// Request nonce.
	pub nonce: String,
	/// Expiry timestamp of the request.
	pub expiry: u64,
	/// Universe identifier for the destination chain.
	#[serde(rename = "destinationUniverse")]
	pub destination_universe: String,
	/// Signature material; the first entry carries the request hash.
	#[serde(rename = "signatureData", default)]
	pub signature_data: Vec<SignatureEntry>,
	/// Originating account address (already human-readable).
	pub user: String,
	/// Solver recorded by the registry, if any.
	#[serde(rename = "fulfilledBy", default)]
	pub fulfilled_by: Option<String>,
	/// Registry-recorded fulfillment marker, passed through unchanged.
	#[serde(rename = "fulfilledAt", default)]
	pub fulfilled_at: Option<String>,
	/// Whether the source legs have been funded.
	pub deposited: bool,
	/// Whether a solver has paid out the destination leg.
	pub fulfilled: bool,
	/// Whether the fill has been settled back to the solver.
	pub settled: bool,
	/// Whether the deposit was refunded instead of filled.
	pub refunded: bool,
	/// Block height at which the request was created, decimal string.
	#[serde(rename = "creationBlock")]
	pub creation_block: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_registry_payload() {
		let payload = r#"{
			"id": "150",
			"sources": [{
				"universe": "EVM",
				"chainID": "ig==",
				"tokenAddress": "AAAAAAAAAAAAAAAAqQWb///GLt4o2FnmgcHBns9qPXc=",
				"value": "DuTrgr4rABM=",
				"status": "OK",
				"collectionFeeRequired": "AA=="
			}],
			"destinationChainID": "iw==",
			"destinations": [{
				"tokenAddress": "AAAAAAAAAAAAAAAAqQWb///GLt4o2FnmgcHBns9qPXc=",
				"value": "DuTrgr4rABM="
			}],
			"nonce": "c29tZS1ub25jZQ==",
			"expiry": 1750000000,
			"destinationUniverse": "EVM",
			"signatureData": [{
				"universe": "EVM",
				"address": "0xabc",
				"signature": "c2ln",
				"hash": "q80SNFZ4kKvN7w=="
			}],
			"user": "arcana1xyz",
			"fulfilledBy": null,
			"fulfilledAt": "0",
			"deposited": true,
			"fulfilled": true,
			"settled": false,
			"refunded": false,
			"creationBlock": "123456"
		}"#;

		let record: RawIntentRecord = serde_json::from_str(payload).unwrap();
		assert_eq!(record.id, "150");
		assert_eq!(record.sources.len(), 1);
		assert_eq!(record.signature_data[0].hash, "q80SNFZ4kKvN7w==");
		assert!(record.deposited);
		assert!(!record.settled);
	}

	#[test]
	fn test_missing_signature_data_defaults_to_empty() {
		let payload = r#"{
			"id": "151",
			"sources": [],
			"destinationChainID": "iw==",
			"destinations": [],
			"nonce": "",
			"expiry": 0,
			"destinationUniverse": "EVM",
			"user": "arcana1xyz",
			"deposited": false,
			"fulfilled": false,
			"settled": false,
			"refunded": false,
			"creationBlock": "0"
		}"#;

		let record: RawIntentRecord = serde_json::from_str(payload).unwrap();
		assert!(record.signature_data.is_empty());
	}
}
