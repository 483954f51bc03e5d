// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HS256 JWT access tokens.
//!
//! Tokens carry `{ sub, role, iss, iat, exp }`. Verification checks the
//! signature, expiry and issuer and yields a [`Principal`]. A token whose
//! `role` is missing or unrecognized still authenticates; the resulting
//! principal simply has no role and is denied every permission.

use chrono::{Duration, Utc};
use homely_common_secret::SecretString;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::guard::Principal;
use crate::types::{Role, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
	/// User id.
	pub sub: String,
	#[serde(default)]
	pub role: Option<String>,
	pub iss: String,
	pub iat: i64,
	pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
	#[error("token expired")]
	Expired,

	#[error("invalid token: {0}")]
	Invalid(String),

	#[error("token subject is not a valid user id")]
	InvalidSubject,

	#[error("failed to sign token: {0}")]
	Signing(String),

	#[error("token lifetime is out of range")]
	TtlOutOfRange,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		match e.kind() {
			jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
			_ => TokenError::Invalid(e.to_string()),
		}
	}
}

/// Verifies bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
	key: DecodingKey,
	validation: Validation,
}

impl TokenVerifier {
	pub fn new(secret: &SecretString, issuer: &str) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.set_issuer(&[issuer]);
		validation.set_required_spec_claims(&["exp", "iss", "sub"]);
		validation.leeway = 0;

		Self {
			key: DecodingKey::from_secret(secret.expose().as_bytes()),
			validation,
		}
	}

	#[instrument(level = "debug", skip_all)]
	pub fn verify(&self, token: &str) -> Result<Principal, TokenError> {
		let data = decode::<AccessClaims>(token, &self.key, &self.validation)?;
		let claims = data.claims;

		let id = Uuid::parse_str(&claims.sub)
			.map(UserId::new)
			.map_err(|_| TokenError::InvalidSubject)?;
		let role = claims.role.as_deref().and_then(Role::parse);

		if role.is_none() {
			debug!(user_id = %id, "token carries no recognized role");
		}

		Ok(Principal { id, role })
	}
}

impl std::fmt::Debug for TokenVerifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenVerifier")
			.field("issuer", &self.validation.iss)
			.finish_non_exhaustive()
	}
}

/// Mints access tokens. Used by the `issue-token` command and tests.
#[derive(Clone)]
pub struct TokenIssuer {
	key: EncodingKey,
	issuer: String,
}

impl TokenIssuer {
	pub fn new(secret: &SecretString, issuer: impl Into<String>) -> Self {
		Self {
			key: EncodingKey::from_secret(secret.expose().as_bytes()),
			issuer: issuer.into(),
		}
	}

	/// `role` is taken verbatim so that tokens with unknown roles can be
	/// minted for testing the fail-closed path.
	#[instrument(level = "debug", skip(self), fields(issuer = %self.issuer))]
	pub fn issue(&self, user_id: UserId, role: &str, ttl: Duration) -> Result<String, TokenError> {
		let now = Utc::now();
		let expires_at = now
			.checked_add_signed(ttl)
			.ok_or(TokenError::TtlOutOfRange)?;
		let claims = AccessClaims {
			sub: user_id.to_string(),
			role: Some(role.to_string()),
			iss: self.issuer.clone(),
			iat: now.timestamp(),
			exp: expires_at.timestamp(),
		};
		encode(&Header::new(Algorithm::HS256), &claims, &self.key)
			.map_err(|e| TokenError::Signing(e.to_string()))
	}
}

impl std::fmt::Debug for TokenIssuer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenIssuer")
			.field("issuer", &self.issuer)
			.finish_non_exhaustive()
	}
}
