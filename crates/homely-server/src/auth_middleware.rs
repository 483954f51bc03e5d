// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! [`auth_layer`] turns an `Authorization: Bearer <jwt>` header into an
//! [`AuthContext`] request extension. It never rejects: a missing, expired or
//! forged token leaves the request unauthenticated and the per-route gate
//! decides what that means. Token values are never logged.
//!
//! Handlers read the caller with [`RequireAuth`]:
//!
//! ```ignore
//! async fn me(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
//!     format!("hello {}", principal.id)
//! }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request},
	middleware::Next,
	response::{IntoResponse, Response},
};
use homely_server_auth::{extract_bearer_token, AuthContext, Principal};
use tracing::instrument;

use crate::{api::AppState, error::ServerError};

#[instrument(
	name = "auth_layer",
	skip_all,
	fields(
		authenticated = tracing::field::Empty,
		user_id = tracing::field::Empty,
	)
)]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let span = tracing::Span::current();

	let auth_ctx = match extract_bearer_token(request.headers()) {
		Some(token) => match state.token_verifier.verify(&token) {
			Ok(principal) => {
				span.record("user_id", tracing::field::display(&principal.id));
				AuthContext::authenticated(principal)
			}
			Err(e) => {
				tracing::debug!(error = %e, "bearer token rejected");
				AuthContext::unauthenticated()
			}
		},
		None => AuthContext::unauthenticated(),
	};

	span.record("authenticated", auth_ctx.is_authenticated());
	request.extensions_mut().insert(auth_ctx);
	next.run(request).await
}

/// Extractor for the authenticated principal.
///
/// Behind the route gate this always succeeds; it still rejects with 401 if
/// used on a route that was registered without authentication.
pub struct RequireAuth(pub Principal);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = Response;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.copied()
			.unwrap_or_default();

		match auth_ctx.principal() {
			Some(principal) => Ok(RequireAuth(*principal)),
			None => Err(ServerError::Unauthorized.into_response()),
		}
	}
}
