//! API endpoint implementations for the explorer service.

/// Intent snapshot and settlement match endpoints.
pub mod intent;
