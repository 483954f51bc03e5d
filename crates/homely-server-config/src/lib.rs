// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Homely server.
//!
//! This crate provides:
//! - Layered configuration (defaults, TOML file, environment)
//! - Consistent environment variable naming (`HOMELY_SERVER_*`)
//! - Cross-field validation, most importantly of the JWT signing key
//!
//! # Usage
//!
//! ```ignore
//! use homely_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info, warn};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}

	/// Log the resolved configuration. Call once the subscriber is installed,
	/// since loading happens before logging is configured.
	pub fn log_summary(&self) {
		if self.auth.using_dev_secret {
			warn!(
				environment = %self.auth.environment,
				"HOMELY_SERVER_JWT_SECRET is not set; using the built-in development signing key"
			);
		}

		info!(
			host = %self.http.host,
			port = self.http.port,
			database = %self.database.url,
			environment = %self.auth.environment,
			jwt_issuer = %self.auth.jwt_issuer,
			log_format = %self.logging.format,
			"Server configuration loaded"
		);
	}
}

/// Load configuration with standard precedence:
/// environment > `/etc/homely/server.toml` > defaults.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Like [`load_config`], reading the TOML layer from `config_path`.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge `sources` in precedence order and finalize.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Resolve a merged layer into a validated configuration.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&auth)?;

	Ok(ServerConfig {
		http,
		database,
		auth,
		logging,
	})
}

/// Cross-field rules. Production must run with an explicit signing key of
/// at least [`MIN_JWT_SECRET_LEN`] bytes.
fn validate_config(auth: &AuthConfig) -> Result<(), ConfigError> {
	if auth.token_ttl_secs == 0 {
		return Err(ConfigError::Validation(
			"HOMELY_SERVER_TOKEN_TTL_SECS must be greater than zero".to_string(),
		));
	}

	if !auth.is_production() {
		return Ok(());
	}

	if auth.using_dev_secret {
		return Err(ConfigError::Validation(
			"HOMELY_SERVER_ENV=production requires HOMELY_SERVER_JWT_SECRET \
			 (or HOMELY_SERVER_JWT_SECRET_FILE) to be set"
				.to_string(),
		));
	}

	if auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
		return Err(ConfigError::Validation(format!(
			"HOMELY_SERVER_JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes in production"
		)));
	}

	Ok(())
}
