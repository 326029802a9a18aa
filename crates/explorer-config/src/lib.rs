//! Configuration module for the intent explorer.
//!
//! This module provides structures and utilities for managing explorer
//! configuration. It supports loading configuration from TOML files with
//! `${ENV_VAR}` substitution and validates that all required values are
//! properly set. The matcher's scoring policy lives in
//! [`explorer_types::MatcherConfig`] and is composed here so the whole
//! policy is tunable without code changes.

use explorer_types::MatcherConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the intent explorer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this explorer instance.
	pub explorer: ExplorerConfig,
	/// Intent registry upstream.
	pub registry: UpstreamConfig,
	/// Event store indexer upstream.
	pub indexer: UpstreamConfig,
	/// Settlement matcher scoring policy.
	#[serde(default)]
	pub matcher: MatcherConfig,
	/// Configuration for the HTTP API server.
	pub api: Option<ApiConfig>,
}

/// Configuration specific to the explorer instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
	/// Unique identifier for this explorer instance.
	pub id: String,
}

/// Connection settings for one read-only upstream.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
	/// Base URL of the upstream endpoint.
	pub url: String,
	/// Per-request timeout in seconds.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
	/// Total retry budget per call in seconds; once exceeded the last
	/// error propagates and the whole operation fails.
	#[serde(default = "default_retry_max_elapsed_seconds")]
	pub retry_max_elapsed_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
	30
}

fn default_retry_max_elapsed_seconds() -> u64 {
	10
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
	/// Whether the API server is enabled.
	#[serde(default)]
	pub enabled: bool,
	/// Host address to bind the server to.
	#[serde(default = "default_api_host")]
	pub host: String,
	/// Port to bind the server to.
	#[serde(default = "default_api_port")]
	pub port: u16,
}

fn default_api_host() -> String {
	"127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
	3000
}

impl Config {
	/// Loads configuration from a TOML file, resolving environment
	/// variable references before parsing.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the loaded configuration.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.explorer.id.is_empty() {
			return Err(ConfigError::Validation("explorer.id must not be empty".into()));
		}
		if self.registry.url.is_empty() {
			return Err(ConfigError::Validation("registry.url must not be empty".into()));
		}
		if self.indexer.url.is_empty() {
			return Err(ConfigError::Validation("indexer.url must not be empty".into()));
		}
		if self.matcher.window_seconds == 0 {
			return Err(ConfigError::Validation(
				"matcher.window_seconds must be positive".into(),
			));
		}
		if self.matcher.amount_tolerance_percent > 100 {
			return Err(ConfigError::Validation(
				"matcher.amount_tolerance_percent must be at most 100".into(),
			));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Resolves `${VAR}` and `${VAR:-default}` references against the
/// process environment. An unresolvable variable without a default is a
/// validation error.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to prevent ReDoS attacks
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)));
				}
			}
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}
