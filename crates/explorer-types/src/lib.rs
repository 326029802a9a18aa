//! Common types module for the intent explorer.
//!
//! This module defines the core data types and structures shared across
//! explorer components: the normalized intent snapshot, indexed event
//! records, settlement match results, and the raw registry wire shapes,
//! together with the decoding utilities that turn registry payloads into
//! canonical string representations.

/// API error types for HTTP endpoints and error responses.
pub mod api;
/// Indexed event records: deposits, fills, and settlement batches.
pub mod events;
/// Settlement match results produced by the matcher.
pub mod matching;
/// Raw intent registry wire shapes as returned by the registry service.
pub mod registry;
/// Normalized intent snapshot assembled from registry and event data.
pub mod snapshot;
/// Decoding and formatting utilities.
pub mod utils;

// Re-export all types for convenient access
pub use api::*;
pub use events::*;
pub use matching::*;
pub use registry::*;
pub use snapshot::*;
pub use utils::{
	decode_base64_to_address, decode_base64_to_hash, decode_base64_to_uint, truncate_id,
	with_0x_prefix, without_0x_prefix, DecodeError,
};
