// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request authentication context and header helpers.
//!
//! The HTTP auth layer inserts an [`AuthContext`] into every request's
//! extensions. A missing or invalid bearer token yields an unauthenticated
//! context rather than an immediate rejection; the route gate decides.
//!
//! Token values are never logged.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::instrument;

use crate::guard::Principal;

/// Authentication state for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
	principal: Option<Principal>,
}

impl AuthContext {
	pub fn unauthenticated() -> Self {
		Self { principal: None }
	}

	pub fn authenticated(principal: Principal) -> Self {
		Self {
			principal: Some(principal),
		}
	}

	pub fn is_authenticated(&self) -> bool {
		self.principal.is_some()
	}

	pub fn principal(&self) -> Option<&Principal> {
		self.principal.as_ref()
	}
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; an empty token is treated as
/// absent.
#[instrument(level = "trace", skip_all)]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let (scheme, token) = value.split_once(' ')?;
	if !scheme.eq_ignore_ascii_case("bearer") {
		return None;
	}
	let token = token.trim();
	(!token.is_empty()).then(|| token.to_string())
}
