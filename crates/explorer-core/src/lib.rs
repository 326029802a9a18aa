//! Core module for the intent explorer.
//!
//! This crate contains the explorer's decision logic: the
//! [`IntentAssembler`], which joins the registry record with indexed
//! deposit/fill events into one normalized snapshot, and the
//! [`SettlementMatcher`], which reconciles a settled intent against
//! candidate settlement batches. There is no direct on-chain link between
//! a fill and the settlement that repays it, so the matcher infers the
//! relationship from timing, chain, token, and amount proximity.
//!
//! Everything here is pure computation over already-fetched data; the
//! only suspension points are the gateway calls. The core holds no state
//! between calls.

use explorer_gateway::GatewayError;
use explorer_types::DecodeError;
use thiserror::Error;

/// Intent snapshot assembly.
pub mod assembler;
/// Settlement candidate scoring and ranking.
pub mod matcher;

pub use assembler::{AssembledIntent, IntentAssembler};
pub use matcher::{FirstDestination, PayoutSelector, SettlementMatcher};

/// Errors that can occur during snapshot assembly or matching.
///
/// Expected steady states are not errors: "not settled", "no fill or
/// deposit found", and "no candidates in window" all resolve to an empty
/// match list instead.
#[derive(Debug, Error)]
pub enum CoreError {
	/// The registry has no record for the requested intent ID.
	#[error("intent not found: {0}")]
	NotFound(String),
	/// The registry record lacks the signature material needed to derive
	/// the request hash.
	#[error("intent {0} has no signature data to derive a request hash")]
	MissingSignature(String),
	/// A gateway call failed; the whole operation is aborted rather than
	/// returning a partial result.
	#[error(transparent)]
	Gateway(#[from] GatewayError),
	/// A registry payload field could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
