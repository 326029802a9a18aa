//! Normalized intent snapshot types.
//!
//! An [`IntentSnapshot`] is the single joined view of one cross-chain
//! request: the decoded registry record merged with the deposit and fill
//! events observed for its request hash. All numeric fields are decimal
//! strings in base units; display-time scaling belongs to callers.

use serde::{Deserialize, Serialize};

/// One funding leg of an intent, decoded from the registry record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceLeg {
	/// Universe identifier for the source chain (e.g., "EVM").
	pub universe: String,
	/// Source chain ID as a decimal string.
	#[serde(rename = "chainId")]
	pub chain_id: String,
	/// Token contract address on the source chain, 0x-prefixed.
	#[serde(rename = "tokenAddress")]
	pub token_address: String,
	/// Amount in base units as a decimal string.
	pub value: String,
	/// Registry status flag for this leg.
	pub status: String,
}

/// One payout leg of an intent, decoded from the registry record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationLeg {
	/// Token contract address on the destination chain, 0x-prefixed.
	#[serde(rename = "tokenAddress")]
	pub token_address: String,
	/// Amount in base units as a decimal string.
	pub value: String,
}

/// The normalized view of one cross-chain request.
///
/// Lifecycle flags are monotonic for a given fetch: once the registry
/// reports a flag as true it is never reset within the same snapshot.
/// `settled_at`/`refunded_at` are only meaningful when the corresponding
/// flag is set; a settled intent and a refunded intent are mutually
/// exclusive outcomes of the same request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSnapshot {
	/// Opaque registry identifier for the request.
	pub request_id: String,
	/// Originating account address.
	pub user: String,
	/// Request nonce as returned by the registry.
	pub nonce: String,
	/// Expiry timestamp of the request.
	pub expiry: u64,
	/// Funding legs in registry order.
	pub sources: Vec<SourceLeg>,
	/// Destination chain ID as a decimal string.
	pub destination_chain_id: String,
	/// Universe identifier for the destination chain.
	pub destination_universe: String,
	/// Payout legs in registry order.
	pub destinations: Vec<DestinationLeg>,
	/// Whether the source legs have been funded.
	pub deposited: bool,
	/// Whether a solver has paid out the destination leg.
	pub fulfilled: bool,
	/// Whether the fill has been settled back to the solver.
	pub settled: bool,
	/// Whether the deposit was refunded instead of filled.
	pub refunded: bool,
	/// Creation block height, used as an ordering proxy.
	pub created_at: u64,
	/// Unix timestamp of the observed deposit event, if any.
	pub deposited_at: Option<u64>,
	/// Unix timestamp of the observed fill event, if any.
	pub filled_at: Option<u64>,
	/// Unix timestamp associated with settlement, if settled.
	pub settled_at: Option<u64>,
	/// Unix timestamp associated with the refund, if refunded.
	pub refunded_at: Option<u64>,
	/// Account that funded the deposit, once observed.
	pub depositor: Option<String>,
	/// Transaction hash of the deposit, once observed.
	pub deposit_tx_hash: Option<String>,
	/// Solver that filled the intent, once observed.
	pub solver: Option<String>,
	/// Transaction hash of the fill, once observed.
	pub fill_tx_hash: Option<String>,
}
