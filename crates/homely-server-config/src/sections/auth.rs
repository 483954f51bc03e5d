// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration: deployment environment and JWT settings.

use homely_common_secret::SecretString;
use serde::Deserialize;

/// Minimum signing key length accepted in production.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Signing key used outside production when none is configured.
pub const DEV_JWT_SECRET: &str = "homely-development-only-signing-key";

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_ISSUER: &str = "homely";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AuthConfig {
	pub environment: String,
	pub jwt_issuer: String,
	pub token_ttl_secs: u64,
	pub jwt_secret: SecretString,
	/// True when no secret was configured and [`DEV_JWT_SECRET`] is in use.
	pub using_dev_secret: bool,
}

impl AuthConfig {
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		AuthConfigLayer::default().finalize()
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub jwt_issuer: Option<String>,
	#[serde(default)]
	pub token_ttl_secs: Option<u64>,
	#[serde(default)]
	pub jwt_secret: Option<SecretString>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.environment.is_some() {
			self.environment = other.environment;
		}
		if other.jwt_issuer.is_some() {
			self.jwt_issuer = other.jwt_issuer;
		}
		if other.token_ttl_secs.is_some() {
			self.token_ttl_secs = other.token_ttl_secs;
		}
		if other.jwt_secret.is_some() {
			self.jwt_secret = other.jwt_secret;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		let (jwt_secret, using_dev_secret) = match self.jwt_secret {
			Some(secret) => (secret, false),
			None => (SecretString::new(DEV_JWT_SECRET.to_string()), true),
		};

		AuthConfig {
			environment: self
				.environment
				.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
			jwt_issuer: self.jwt_issuer.unwrap_or_else(|| DEFAULT_ISSUER.to_string()),
			token_ttl_secs: self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
			jwt_secret,
			using_dev_secret,
		}
	}
}
