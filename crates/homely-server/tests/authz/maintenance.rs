// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for maintenance requests and work orders.
//!
//! Key invariants:
//! - approving and assigning require the landlord of the request's property
//! - completing requires being the assigned workman
//! - an out-of-order status change is a 409, never a 403

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{read_json, run_authz_cases, AuthzCase, TestApp};

fn request_path(id: impl std::fmt::Display, action: &str) -> String {
	format!("/api/maintenance-requests/{id}/{action}")
}

#[tokio::test]
async fn submitting_requires_submit_maintenance() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let submission = json!({
		"property_id": f.property_a.id,
		"unit_id": f.unit_a.id,
		"title": "Mould in bathroom",
		"description": "Black spots on the ceiling",
	});

	let cases = vec![
		AuthzCase {
			name: "tenant_submits_request",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.tenant.clone()),
			body: Some(submission.clone()),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "landlord_submits_request",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.landlord_a.clone()),
			body: Some(submission.clone()),
			expected_status: StatusCode::CREATED,
		},
		AuthzCase {
			name: "workman_cannot_submit_request",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.workman.clone()),
			body: Some(submission.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_role_cannot_submit_request",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.roleless.clone()),
			body: Some(submission.clone()),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "anonymous_cannot_submit_request",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: None,
			body: Some(submission.clone()),
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn submission_is_validated_after_authorization() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "empty_title",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.tenant.clone()),
			body: Some(json!({ "property_id": f.property_a.id, "title": "  " })),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "unknown_property",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.tenant.clone()),
			body: Some(json!({ "property_id": uuid::Uuid::new_v4(), "title": "Drafty" })),
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "unit_from_another_property",
			method: Method::POST,
			path: "/api/maintenance-requests".to_string(),
			user: Some(f.tenant.clone()),
			body: Some(json!({
				"property_id": f.property_b.id,
				"unit_id": f.unit_a.id,
				"title": "Drafty",
			})),
			expected_status: StatusCode::BAD_REQUEST,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn full_lifecycle_is_gated_at_every_step() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let id = f.pending_request.id;

	let cases = vec![
		AuthzCase {
			name: "tenant_cannot_approve",
			method: Method::POST,
			path: request_path(id, "approve"),
			user: Some(f.tenant.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "workman_cannot_approve",
			method: Method::POST,
			path: request_path(id, "approve"),
			user: Some(f.workman.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "other_landlord_cannot_approve",
			method: Method::POST,
			path: request_path(id, "approve"),
			user: Some(f.landlord_b.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "assign_before_approve_conflicts",
			method: Method::POST,
			path: request_path(id, "assign"),
			user: Some(f.landlord_a.clone()),
			body: Some(json!({ "workman_id": f.workman.id })),
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "owner_approves",
			method: Method::POST,
			path: request_path(id, "approve"),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "second_approve_conflicts",
			method: Method::POST,
			path: request_path(id, "approve"),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "other_landlord_cannot_assign",
			method: Method::POST,
			path: request_path(id, "assign"),
			user: Some(f.landlord_b.clone()),
			body: Some(json!({ "workman_id": f.workman.id })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "workman_cannot_assign_self",
			method: Method::POST,
			path: request_path(id, "assign"),
			user: Some(f.workman.clone()),
			body: Some(json!({ "workman_id": f.workman.id })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "workman_cannot_complete_unassigned",
			method: Method::POST,
			path: request_path(id, "complete"),
			user: Some(f.workman.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "owner_assigns",
			method: Method::POST,
			path: request_path(id, "assign"),
			user: Some(f.landlord_a.clone()),
			body: Some(json!({ "workman_id": f.workman.id })),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "other_workman_cannot_complete",
			method: Method::POST,
			path: request_path(id, "complete"),
			user: Some(f.other_workman.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "landlord_is_not_the_assignee",
			method: Method::POST,
			path: request_path(id, "complete"),
			user: Some(f.landlord_a.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "assignee_completes",
			method: Method::POST,
			path: request_path(id, "complete"),
			user: Some(f.workman.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "second_complete_conflicts",
			method: Method::POST,
			path: request_path(id, "complete"),
			user: Some(f.workman.clone()),
			body: None,
			expected_status: StatusCode::CONFLICT,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn admin_bypasses_ownership_but_not_status_rules() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = vec![
		AuthzCase {
			name: "admin_cannot_complete_pending",
			method: Method::POST,
			path: request_path(f.pending_request.id, "complete"),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::CONFLICT,
		},
		AuthzCase {
			name: "admin_completes_assigned",
			method: Method::POST,
			path: request_path(f.assigned_request.id, "complete"),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "admin_approves_pending",
			method: Method::POST,
			path: request_path(f.pending_request.id, "approve"),
			user: Some(f.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn completion_records_status() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&request_path(f.assigned_request.id, "complete"),
			Some(&f.workman),
			json!({}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body: serde_json::Value = read_json(response).await;
	assert_eq!(body["status"], json!("completed"));
	assert_eq!(body["assigned_workman_id"], json!(f.workman.id.to_string()));
}

#[tokio::test]
async fn list_is_scoped_to_the_caller() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let expectations = [
		("tenant", &f.tenant, 2),
		("landlord_a", &f.landlord_a, 2),
		("landlord_b", &f.landlord_b, 0),
		("workman", &f.workman, 1),
		("other_workman", &f.other_workman, 0),
		("roleless", &f.roleless, 0),
		("admin", &f.admin, 2),
	];

	for (name, user, expected) in expectations {
		let response = app.get("/api/maintenance-requests", Some(user)).await;
		assert_eq!(response.status(), StatusCode::OK, "{name}");
		let body: serde_json::Value = read_json(response).await;
		assert_eq!(
			body["requests"].as_array().unwrap().len(),
			expected,
			"{name} sees the wrong number of requests"
		);
	}

	let response = app.get("/api/maintenance-requests", None).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
