//! Indexed event records consumed by the explorer core.
//!
//! These mirror the records the ingestion pipeline persists for on-chain
//! Deposit, Fill, and Settle events. They are read-only query results;
//! the explorer never mutates or re-persists them.

use serde::{Deserialize, Serialize};

/// An on-chain deposit funding the source leg of an intent.
///
/// Keyed by request hash in the event store; at most one deposit is
/// expected per request in the current design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepositEvent {
	/// Account that funded the deposit.
	pub depositor: String,
	/// Chain the deposit occurred on.
	#[serde(rename = "chainId")]
	pub chain_id: u64,
	/// Block timestamp of the deposit, unix seconds.
	pub timestamp: u64,
	/// Transaction hash of the deposit.
	#[serde(rename = "txHash")]
	pub tx_hash: String,
}

/// An on-chain fill paying out the destination leg of an intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FillEvent {
	/// Solver credited with the fill.
	pub solver: String,
	/// Account that submitted the fill transaction.
	pub from: String,
	/// Chain the fill occurred on.
	#[serde(rename = "chainId")]
	pub chain_id: u64,
	/// Block timestamp of the fill, unix seconds.
	pub timestamp: u64,
	/// Transaction hash of the fill.
	#[serde(rename = "txHash")]
	pub tx_hash: String,
}

/// A batch settlement transaction repaying solvers for prior fills.
///
/// A single settlement may cover multiple solvers, tokens, and amounts.
/// `amounts` shares its ordering with `tokens`. There is no on-chain link
/// from a settlement back to the intents it repays; the relationship is
/// inferred by the matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementEvent {
	/// Event store identifier for this settlement record.
	pub id: String,
	/// Settlement nonce.
	pub nonce: String,
	/// Solvers repaid in this batch.
	pub solvers: Vec<String>,
	/// Token addresses repaid, in batch order.
	pub tokens: Vec<String>,
	/// Amounts repaid in base units, same ordering as `tokens`.
	pub amounts: Vec<String>,
	/// Chain the settlement occurred on.
	#[serde(rename = "chainId")]
	pub chain_id: u64,
	/// Block number of the settlement transaction.
	#[serde(rename = "blockNumber")]
	pub block_number: u64,
	/// Block timestamp of the settlement, unix seconds.
	pub timestamp: u64,
	/// Transaction hash of the settlement.
	#[serde(rename = "txHash")]
	pub tx_hash: String,
}

/// Deposit and fill records retrieved for a single request hash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestEvents {
	/// Deposit events for the request hash, if any.
	pub deposits: Vec<DepositEvent>,
	/// Fill events for the request hash, if any.
	pub fills: Vec<FillEvent>,
}
