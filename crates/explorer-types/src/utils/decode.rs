//! Base64 decoding for registry payload fields.
//!
//! The registry stores addresses, hashes, and integers as base64-encoded
//! big-endian bytes. These functions decode them into canonical string
//! forms: 0x-prefixed lowercase hex for addresses and hashes, and exact
//! decimal strings for integers. Integer decoding goes through `U256`;
//! no floating-point conversion happens anywhere in this path, so no
//! precision is lost.

use alloy_primitives::U256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Errors that can occur while decoding registry payload fields.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The input was not valid base64.
	#[error("invalid base64: {0}")]
	Base64(String),
	/// The decoded integer is wider than 256 bits.
	#[error("integer wider than 256 bits ({0} bytes)")]
	IntegerTooWide(usize),
}

/// Decodes a base64 value into a 0x-prefixed lowercase hex string.
///
/// Used for request hashes, where the full byte string is the canonical
/// join key into the event store.
pub fn decode_base64_to_hash(b64: &str) -> Result<String, DecodeError> {
	let bytes = STANDARD
		.decode(b64)
		.map_err(|e| DecodeError::Base64(e.to_string()))?;
	Ok(format!("0x{}", hex::encode(bytes)))
}

/// Decodes a base64 value into a 0x-prefixed Ethereum address.
///
/// Addresses are often stored as 32 bytes with leading zeros; the last
/// 20 bytes (40 hex characters) are the address.
pub fn decode_base64_to_address(b64: &str) -> Result<String, DecodeError> {
	let bytes = STANDARD
		.decode(b64)
		.map_err(|e| DecodeError::Base64(e.to_string()))?;
	let hex_string = hex::encode(bytes);
	let address = if hex_string.len() >= 40 {
		&hex_string[hex_string.len() - 40..]
	} else {
		&hex_string[..]
	};
	Ok(format!("0x{}", address))
}

/// Decodes a base64 big-endian integer into an exact decimal string.
///
/// The decoded bytes must fit in 256 bits; on-chain values are uint256
/// at most, so anything wider is a malformed payload.
pub fn decode_base64_to_uint(b64: &str) -> Result<String, DecodeError> {
	let bytes = STANDARD
		.decode(b64)
		.map_err(|e| DecodeError::Base64(e.to_string()))?;
	if bytes.len() > 32 {
		return Err(DecodeError::IntegerTooWide(bytes.len()));
	}
	Ok(U256::from_be_slice(&bytes).to_string())
}
