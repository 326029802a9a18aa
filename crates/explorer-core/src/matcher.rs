//! Settlement candidate scoring and ranking.
//!
//! Settlement batches carry no on-chain reference to the intents they
//! repay, so the matcher infers the relationship: it pulls every
//! settlement in a lookahead window from the fill time, scores each one
//! against the intent's fill context, and returns the candidates ranked
//! by confidence with per-signal reason flags.
//!
//! Scoring is a sum of independently evaluated signals. Recency is
//! deliberately the strongest signal: a continuous time-proximity score
//! plus a flat fast-settlement bonus. Amount comparison uses exact
//! integer arithmetic over base units.

use crate::CoreError;
use alloy_primitives::U256;
use explorer_gateway::EventStoreGateway;
use explorer_types::{
	DestinationLeg, FillEvent, IntentSnapshot, MatchReasons, MatcherConfig, SettlementEvent,
	SettlementMatch,
};
use std::sync::Arc;

/// Selects the expected payout leg a settlement is compared against.
///
/// The current policy only examines the first destination even though the
/// data model supports several; this is a known limitation kept for
/// compatibility. A multi-leg policy can be substituted here without
/// touching the scoring pipeline.
pub trait PayoutSelector: Send + Sync {
	/// Returns the payout leg to match amounts and tokens against, or
	/// `None` when the intent has no destinations.
	fn expected_payout<'a>(&self, snapshot: &'a IntentSnapshot) -> Option<&'a DestinationLeg>;
}

/// Default payout policy: the first destination leg.
pub struct FirstDestination;

impl PayoutSelector for FirstDestination {
	fn expected_payout<'a>(&self, snapshot: &'a IntentSnapshot) -> Option<&'a DestinationLeg> {
		snapshot.destinations.first()
	}
}

/// Scores and ranks settlement candidates for settled intents.
pub struct SettlementMatcher {
	events: Arc<dyn EventStoreGateway>,
	config: MatcherConfig,
	payout: Box<dyn PayoutSelector>,
}

impl SettlementMatcher {
	/// Creates a matcher over the given event store with the given
	/// scoring policy and the default first-destination payout selector.
	pub fn new(events: Arc<dyn EventStoreGateway>, config: MatcherConfig) -> Self {
		Self {
			events,
			config,
			payout: Box::new(FirstDestination),
		}
	}

	/// Replaces the payout selector.
	pub fn with_payout_selector(mut self, payout: Box<dyn PayoutSelector>) -> Self {
		self.payout = payout;
		self
	}

	/// Finds and ranks settlement candidates for a snapshot.
	///
	/// Returns an empty list for the expected steady states: the intent
	/// is not settled, it has no fill timestamp to anchor the window, or
	/// no deposit/fill record exists for its request hash. Gateway
	/// failures abort the whole operation.
	///
	/// Candidates are returned in descending confidence; ties keep the
	/// event store's ascending-timestamp order. The caller decides how
	/// many to display.
	pub async fn find_matches(
		&self,
		snapshot: &IntentSnapshot,
		request_hash: &str,
	) -> Result<Vec<SettlementMatch>, CoreError> {
		if !snapshot.settled {
			return Ok(Vec::new());
		}
		let Some(filled_at) = snapshot.filled_at else {
			return Ok(Vec::new());
		};

		let window_end = filled_at.saturating_add(self.config.window_seconds);

		// The two queries are independent; issue them concurrently.
		let (settlements, events) = tokio::join!(
			self.events.settlements_in_window(filled_at, window_end),
			self.events.events_by_request_hash(request_hash),
		);
		let settlements = settlements?;
		let events = events?;

		if events.deposits.is_empty() || events.fills.is_empty() {
			tracing::debug!(
				"Intent {} is settled but has no deposit/fill context; skipping match",
				snapshot.request_id
			);
			return Ok(Vec::new());
		}
		let fill = &events.fills[0];

		let expected = self.payout.expected_payout(snapshot);
		let mut matches: Vec<SettlementMatch> = settlements
			.into_iter()
			.map(|settlement| self.score(settlement, filled_at, fill, expected))
			.collect();

		// Stable sort: equal scores keep ascending-timestamp input order.
		matches.sort_by(|a, b| {
			b.confidence
				.partial_cmp(&a.confidence)
				.unwrap_or(std::cmp::Ordering::Equal)
		});

		tracing::debug!(
			"Ranked {} settlement candidates for intent {}",
			matches.len(),
			snapshot.request_id
		);
		Ok(matches)
	}

	/// Scores one settlement candidate against the fill context.
	fn score(
		&self,
		settlement: SettlementEvent,
		filled_at: u64,
		fill: &FillEvent,
		expected: Option<&DestinationLeg>,
	) -> SettlementMatch {
		let cfg = &self.config;
		let mut points = 0.0;

		// Indexing lag can place the settlement at or before the fill
		// time; negative deltas are allowed and score the full maximum.
		let time_delta = settlement.timestamp as i64 - filled_at as i64;
		points += (cfg.time_points_max - time_delta as f64 / 60.0).clamp(0.0, cfg.time_points_max);

		let time_match = time_delta <= cfg.time_bucket_seconds;
		if time_match {
			points += cfg.time_bucket_points;
		}

		let chain_match = settlement.chain_id == fill.chain_id;
		if chain_match {
			points += cfg.chain_points;
		}

		let amount_match = expected
			.map(|leg| {
				amount_within_tolerance(&settlement.amounts, &leg.value, cfg.amount_tolerance_percent)
			})
			.unwrap_or(false);
		if amount_match {
			points += cfg.amount_points;
		}

		let token_match = expected
			.map(|leg| token_matches(&settlement.tokens, &leg.token_address))
			.unwrap_or(false);
		if token_match {
			points += cfg.token_points;
		}

		SettlementMatch {
			settlement,
			confidence: points.min(100.0),
			reasons: MatchReasons {
				time_delta,
				time_match,
				chain_match,
				amount_match,
				token_match,
			},
		}
	}
}

/// Returns true when any settlement amount is within `tolerance_percent`
/// of the expected amount, using exact integer arithmetic.
///
/// A zero expected amount never matches (the relative difference is
/// undefined), and unparseable amounts are treated as zero.
fn amount_within_tolerance(amounts: &[String], expected: &str, tolerance_percent: u64) -> bool {
	let expected: U256 = expected.parse().unwrap_or(U256::ZERO);
	if expected.is_zero() {
		return false;
	}
	let tolerance = U256::from(tolerance_percent);

	for raw in amounts {
		let actual: U256 = raw.parse().unwrap_or(U256::ZERO);
		let difference = if expected > actual {
			expected - actual
		} else {
			actual - expected
		};
		if let Some(scaled) = difference.checked_mul(U256::from(100u64)) {
			if scaled / expected <= tolerance {
				return true;
			}
		}
	}
	false
}

/// Returns true when any settlement token equals the expected payout
/// token, compared case-insensitively.
fn token_matches(tokens: &[String], expected: &str) -> bool {
	tokens.iter().any(|token| token.eq_ignore_ascii_case(expected))
}
