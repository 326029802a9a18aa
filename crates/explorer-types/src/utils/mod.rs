//! Utility functions shared across explorer components.

/// Base64 decoding of registry payload fields.
pub mod decode;
/// Hex string formatting helpers.
pub mod formatting;

pub use decode::{
	decode_base64_to_address, decode_base64_to_hash, decode_base64_to_uint, DecodeError,
};
pub use formatting::{truncate_id, with_0x_prefix, without_0x_prefix};
