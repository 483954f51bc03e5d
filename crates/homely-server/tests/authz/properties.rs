// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for property and unit routes.
//!
//! Key invariant: only the property's landlord (or an admin) can touch a
//! property or its units; tenants and workmen never can.

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use super::support::{read_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn property_collection_requires_manage_properties() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "landlord_lists_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin_lists_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "tenant_cannot_list_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: Some(f.tenant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "workman_cannot_list_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: Some(f.workman.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_role_cannot_list_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: Some(f.roleless.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_list_properties",
			method: Method::GET,
			path: "/api/properties".to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
		AuthzCase {
			name: "landlord_creates_property",
			method: Method::POST,
			path: "/api/properties".to_string(),
			user: Some(f.landlord_b.clone()),
			body: Some(json!({ "name": "Birch Flats", "address": "3 Birch Rd" })),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "tenant_cannot_create_property",
			method: Method::POST,
			path: "/api/properties".to_string(),
			user: Some(f.tenant.clone()),
			body: Some(json!({ "name": "Squat", "address": "Nowhere" })),
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn landlord_list_is_scoped_to_own_properties() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app.get("/api/properties", Some(&f.landlord_a)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	let properties = body["properties"].as_array().unwrap();
	assert_eq!(properties.len(), 1);
	assert_eq!(properties[0]["id"], json!(f.property_a.id.to_string()));

	let response = app.get("/api/properties", Some(&f.admin)).await;
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(body["properties"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn created_property_belongs_to_caller() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			"/api/properties",
			Some(&f.landlord_b),
			json!({ "name": "Birch Flats", "address": "3 Birch Rd" }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(body["landlord_id"], json!(f.landlord_b.id.to_string()));

	// landlord_a cannot see it
	let path = format!("/api/properties/{}", body["id"].as_str().unwrap());
	let response = app.get(&path, Some(&f.landlord_a)).await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn single_property_requires_ownership() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let a = format!("/api/properties/{}", f.property_a.id);

	let cases = vec![
		AuthzCase {
			name: "owner_reads_property",
			method: Method::GET,
			path: a.clone(),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_landlord_cannot_read_property",
			method: Method::GET,
			path: a.clone(),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_reads_any_property",
			method: Method::GET,
			path: a.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "tenant_cannot_read_property",
			method: Method::GET,
			path: a.clone(),
			user: Some(f.tenant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_landlord_cannot_update_property",
			method: Method::PUT,
			path: a.clone(),
			user: Some(f.landlord_b.clone()),
			body: Some(json!({ "name": "Hijacked", "address": "Elsewhere" })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_updates_property",
			method: Method::PUT,
			path: a.clone(),
			user: Some(f.landlord_a.clone()),
			body: Some(json!({ "name": "Elm Court North", "address": "1 Elm St" })),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_landlord_cannot_delete_property",
			method: Method::DELETE,
			path: a.clone(),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_delete_property",
			method: Method::DELETE,
			path: a.clone(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn owner_can_delete_and_property_is_gone() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let b = format!("/api/properties/{}", f.property_b.id);

	let cases = vec![
		AuthzCase {
			name: "owner_deletes_property",
			method: Method::DELETE,
			path: b.clone(),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
		AuthzCase {
			name: "deleted_property_is_not_found",
			method: Method::GET,
			path: b.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn units_follow_property_ownership() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let units_a = format!("/api/properties/{}/units", f.property_a.id);
	let unit_a = format!("/api/units/{}", f.unit_a.id);

	let cases = vec![
		AuthzCase {
			name: "owner_lists_units",
			method: Method::GET,
			path: units_a.clone(),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_landlord_cannot_list_units",
			method: Method::GET,
			path: units_a.clone(),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_creates_unit",
			method: Method::POST,
			path: units_a.clone(),
			user: Some(f.landlord_a.clone()),
			body: Some(json!({ "label": "2B", "bedrooms": 1, "rent_cents": 99_000 })),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "duplicate_unit_label_conflicts",
			method: Method::POST,
			path: units_a.clone(),
			user: Some(f.landlord_a.clone()),
			body: Some(json!({ "label": "1A" })),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "other_landlord_cannot_create_unit",
			method: Method::POST,
			path: units_a.clone(),
			user: Some(f.landlord_b.clone()),
			body: Some(json!({ "label": "3C" })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_reads_unit",
			method: Method::GET,
			path: unit_a.clone(),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_landlord_cannot_read_unit",
			method: Method::GET,
			path: unit_a.clone(),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "tenant_cannot_read_unit",
			method: Method::GET,
			path: unit_a.clone(),
			user: Some(f.tenant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_reads_unit",
			method: Method::GET,
			path: unit_a.clone(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn resource_id_errors() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "malformed_property_id",
			method: Method::GET,
			path: "/api/properties/not-a-uuid".to_string(),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "missing_property",
			method: Method::GET,
			path: format!("/api/properties/{}", Uuid::new_v4()),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "missing_unit",
			method: Method::GET,
			path: format!("/api/units/{}", Uuid::new_v4()),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		// Role check runs before the lookup, so a tenant never learns whether
		// the id exists.
		AuthzCase {
			name: "tenant_gets_forbidden_for_missing_property",
			method: Method::GET,
			path: format!("/api/properties/{}", Uuid::new_v4()),
			user: Some(f.tenant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}
