// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for admin routes.
//!
//! Key invariant: ALL admin routes require the admin role.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{read_json, run_authz_cases, AuthzCase, TestApp};

#[tokio::test]
async fn only_admin_reaches_admin_routes() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let mut cases = Vec::new();
	for path in ["/api/admin/permissions", "/api/admin/routes"] {
		cases.push(AuthzCase {
			name: "admin_allowed",
			method: Method::GET,
			path: path.to_string(),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		});
		for (name, user) in [
			("landlord_denied", &f.landlord_a),
			("tenant_denied", &f.tenant),
			("workman_denied", &f.workman),
			("unknown_role_denied", &f.roleless),
		] {
			cases.push(AuthzCase {
				name,
				method: Method::GET,
				path: path.to_string(),
				user: Some(user.clone()),
				body: None,
				expected_status: StatusCode::FORBIDDEN,
			});
		}
		cases.push(AuthzCase {
			name: "anonymous_unauthorized",
			method: Method::GET,
			path: path.to_string(),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		});
	}

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn permissions_endpoint_reports_the_static_table() {
	let app = TestApp::new().await;

	let response = app
		.get("/api/admin/permissions", Some(&app.fixtures.admin))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;

	assert_eq!(
		body,
		json!({
			"roles": [
				{ "role": "tenant", "permissions": ["submit_maintenance"] },
				{
					"role": "landlord",
					"permissions": [
						"manage_properties",
						"submit_maintenance",
						"approve_maintenance",
						"assign_work_orders",
						"complete_work_orders"
					]
				},
				{ "role": "workman", "permissions": ["complete_work_orders"] },
				{
					"role": "admin",
					"permissions": [
						"manage_properties",
						"submit_maintenance",
						"approve_maintenance",
						"assign_work_orders",
						"complete_work_orders"
					]
				}
			]
		})
	);
}

#[tokio::test]
async fn routes_endpoint_lists_every_policy() {
	let app = TestApp::new().await;

	let response = app.get("/api/admin/routes", Some(&app.fixtures.admin)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	let routes = body["routes"].as_array().unwrap();

	assert_eq!(routes.len(), 21);
	assert!(routes.contains(&json!({
		"method": "GET",
		"path": "/health",
		"policy": { "kind": "public" }
	})));
	assert!(routes.contains(&json!({
		"method": "DELETE",
		"path": "/api/properties/{id}",
		"policy": {
			"kind": "owned",
			"permission": "manage_properties",
			"resource": "property"
		}
	})));
	assert!(routes.contains(&json!({
		"method": "GET",
		"path": "/api/leases/{id}",
		"policy": {
			"kind": "owned",
			"permission": "manage_properties",
			"resource": "lease"
		}
	})));
	assert!(routes.contains(&json!({
		"method": "POST",
		"path": "/api/maintenance-requests/{id}/complete",
		"policy": {
			"kind": "owned",
			"permission": "complete_work_orders",
			"resource": "work_order"
		}
	})));
}
