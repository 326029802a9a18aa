//! Settlement match results and matcher policy configuration.
//!
//! A [`SettlementMatch`] is derived per candidate settlement and never
//! persisted. The [`MatcherConfig`] carries the scoring policy knobs so
//! tuning the heuristic does not require code changes.

use crate::events::SettlementEvent;
use serde::{Deserialize, Serialize};

/// Per-signal explanation for a settlement match score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchReasons {
	/// Seconds from fill to settlement. Negative values are possible when
	/// indexing lag records the settlement at or before the fill time.
	pub time_delta: i64,
	/// Settlement landed within the fast-settlement bucket.
	pub time_match: bool,
	/// Settlement occurred on the same chain as the fill.
	pub chain_match: bool,
	/// Some settlement amount is within tolerance of the expected payout.
	pub amount_match: bool,
	/// Some settlement token equals the expected payout token.
	pub token_match: bool,
}

/// A scored settlement candidate for a given intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementMatch {
	/// The candidate settlement event.
	pub settlement: SettlementEvent,
	/// Confidence score in [0, 100].
	pub confidence: f64,
	/// Which signals contributed to the score.
	pub reasons: MatchReasons,
}

/// Scoring policy for the settlement matcher.
///
/// The defaults encode the observed production behavior: settlement
/// batches land within about an hour of the fill, and recency is the
/// strongest signal (continuous points plus a flat fast-settlement
/// bonus). The point weights sum to 100 so the total doubles as a
/// percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
	/// Candidate lookahead window from fill time, in seconds.
	#[serde(default = "default_window_seconds")]
	pub window_seconds: u64,
	/// Maximum continuous time-proximity points; one point is lost per
	/// minute of delay.
	#[serde(default = "default_time_points_max")]
	pub time_points_max: f64,
	/// Threshold for the fast-settlement bonus, in seconds.
	#[serde(default = "default_time_bucket_seconds")]
	pub time_bucket_seconds: i64,
	/// Flat bonus for settlements within the fast-settlement bucket.
	#[serde(default = "default_time_bucket_points")]
	pub time_bucket_points: f64,
	/// Points for a settlement on the same chain as the fill.
	#[serde(default = "default_chain_points")]
	pub chain_points: f64,
	/// Points for an amount within tolerance of the expected payout.
	#[serde(default = "default_amount_points")]
	pub amount_points: f64,
	/// Points for a token matching the expected payout token.
	#[serde(default = "default_token_points")]
	pub token_points: f64,
	/// Relative amount tolerance in whole percent.
	#[serde(default = "default_amount_tolerance_percent")]
	pub amount_tolerance_percent: u64,
}

fn default_window_seconds() -> u64 {
	3600
}

fn default_time_points_max() -> f64 {
	40.0
}

fn default_time_bucket_seconds() -> i64 {
	1200
}

fn default_time_bucket_points() -> f64 {
	15.0
}

fn default_chain_points() -> f64 {
	25.0
}

fn default_amount_points() -> f64 {
	15.0
}

fn default_token_points() -> f64 {
	5.0
}

fn default_amount_tolerance_percent() -> u64 {
	15
}

impl Default for MatcherConfig {
	fn default() -> Self {
		Self {
			window_seconds: default_window_seconds(),
			time_points_max: default_time_points_max(),
			time_bucket_seconds: default_time_bucket_seconds(),
			time_bucket_points: default_time_bucket_points(),
			chain_points: default_chain_points(),
			amount_points: default_amount_points(),
			token_points: default_token_points(),
			amount_tolerance_percent: default_amount_tolerance_percent(),
		}
	}
}
