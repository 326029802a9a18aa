//! HTTP server for the intent explorer API.
//!
//! This module provides a minimal HTTP server infrastructure for the
//! explorer endpoints: intent snapshot lookup and settlement matching.

use axum::{
	extract::{Path, State},
	response::Json,
	routing::get,
	Router,
};
use explorer_config::ApiConfig;
use explorer_core::{IntentAssembler, SettlementMatcher};
use explorer_types::{APIError, IntentSnapshot};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::apis;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Assembles normalized intent snapshots.
	pub assembler: Arc<IntentAssembler>,
	/// Scores and ranks settlement candidates.
	pub matcher: Arc<SettlementMatcher>,
}

/// Starts the HTTP server for the explorer API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for the explorer endpoints.
pub async fn start_server(
	api_config: ApiConfig,
	state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/intents/{id}", get(handle_get_intent))
				.route("/intents/{id}/settlements", get(handle_get_settlements)),
		)
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state);

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Intent explorer API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET /api/intents/{id} requests.
///
/// Returns the normalized lifecycle snapshot for an intent, joining the
/// registry record with its observed deposit and fill events.
async fn handle_get_intent(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<IntentSnapshot>, APIError> {
	match apis::intent::get_intent(&id, &state).await {
		Ok(snapshot) => Ok(Json(snapshot)),
		Err(e) => {
			tracing::warn!("Intent lookup failed for {}: {}", id, e);
			Err(apis::intent::into_api_error(e))
		}
	}
}

/// Handles GET /api/intents/{id}/settlements requests.
///
/// Returns the snapshot together with its ranked settlement matches. An
/// empty match list is a valid steady state ("no candidates in window"),
/// distinct from "not yet settled", which the snapshot flags convey.
async fn handle_get_settlements(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<apis::intent::SettlementMatchesResponse>, APIError> {
	match apis::intent::get_settlement_matches(&id, &state).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Settlement matching failed for {}: {}", id, e);
			Err(apis::intent::into_api_error(e))
		}
	}
}
