// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication edge cases and the shape of denial responses.

use axum::http::StatusCode;
use chrono::Duration;
use homely_common_secret::SecretString;
use homely_server_auth::{TokenIssuer, UserId};
use serde_json::json;

use super::support::{read_json, TestApp};

#[tokio::test]
async fn public_routes_need_no_token() {
	let app = TestApp::new().await;

	let response = app.get("/health", None).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(body["status"], json!("healthy"));

	let response = app.get("/api/openapi.json", None).await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized_with_generic_body() {
	let app = TestApp::new().await;

	let response = app.get("/api/me", None).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(
		body,
		json!({ "error": "unauthorized", "message": "Authentication required" })
	);
}

#[tokio::test]
async fn forbidden_body_does_not_name_the_permission() {
	let app = TestApp::new().await;

	let response = app.get("/api/properties", Some(&app.fixtures.tenant)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(
		body,
		json!({ "error": "forbidden", "message": "Insufficient permissions" })
	);
}

#[tokio::test]
async fn unusable_tokens_are_unauthorized() {
	let app = TestApp::new().await;
	let user = UserId::generate();

	let expired = app
		.issuer
		.issue(user, "admin", Duration::seconds(-120))
		.unwrap();

	let foreign_issuer = TokenIssuer::new(
		&homely_server_config::ServerConfig::default().auth.jwt_secret,
		"someone-else",
	)
	.issue(user, "admin", Duration::minutes(5))
	.unwrap();

	let wrong_key = TokenIssuer::new(
		&SecretString::new("a-completely-different-signing-key".to_string()),
		"homely",
	)
	.issue(user, "admin", Duration::minutes(5))
	.unwrap();

	let headers = [
		("garbage", "Bearer not.a.jwt".to_string()),
		("expired", format!("Bearer {expired}")),
		("foreign_issuer", format!("Bearer {foreign_issuer}")),
		("wrong_key", format!("Bearer {wrong_key}")),
		("wrong_scheme", format!("Basic {wrong_key}")),
		("empty_bearer", "Bearer ".to_string()),
	];

	for (name, header) in headers {
		let response = app.get_with_authorization("/api/me", &header).await;
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{name}");
	}
}

#[tokio::test]
async fn bad_token_still_reaches_public_routes() {
	let app = TestApp::new().await;
	let response = app
		.get_with_authorization("/health", "Bearer not.a.jwt")
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_reports_role_and_permissions() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app.get("/api/me", Some(&f.workman)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(
		body,
		json!({
			"user_id": f.workman.id.to_string(),
			"role": "workman",
			"permissions": ["complete_work_orders"],
		})
	);
}

#[tokio::test]
async fn unknown_role_authenticates_with_no_permissions() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app.get("/api/me", Some(&f.roleless)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(body["role"], json!(null));
	assert_eq!(body["permissions"], json!([]));
}

#[tokio::test]
async fn role_names_in_tokens_are_case_insensitive() {
	let app = TestApp::new().await;
	let shouting_landlord = app.user_with_role("LANDLORD");

	let response = app.get("/api/properties", Some(&shouting_landlord)).await;
	assert_eq!(response.status(), StatusCode::OK);
}
