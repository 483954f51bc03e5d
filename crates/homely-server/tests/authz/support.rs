// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{header::HeaderName, header::HeaderValue, Method, Request, StatusCode},
	response::Response,
	Router,
};
use chrono::{Duration, NaiveDate};
use homely_server::{create_app_state, create_router, AppState};
use homely_server_auth::{TokenIssuer, UserId};
use homely_server_config::ServerConfig;
use homely_server_db::{Lease, MaintenanceRequest, Property, Unit};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Clone)]
pub struct TestUser {
	pub id: UserId,
	pub token: String,
}

impl TestUser {
	pub fn auth_header(&self) -> (HeaderName, HeaderValue) {
		(
			HeaderName::from_static("authorization"),
			HeaderValue::from_str(&format!("Bearer {}", self.token)).unwrap(),
		)
	}
}

#[derive(Clone)]
pub struct Fixtures {
	pub admin: TestUser,
	pub landlord_a: TestUser,
	pub landlord_b: TestUser,
	pub tenant: TestUser,
	pub workman: TestUser,
	pub other_workman: TestUser,
	/// Valid token whose role this server does not recognize.
	pub roleless: TestUser,
	pub property_a: Property,
	pub property_b: Property,
	pub unit_a: Unit,
	/// `tenant`'s open-ended lease on `unit_a`.
	pub lease_a: Lease,
	/// Pending request from `tenant` on `property_a`.
	pub pending_request: MaintenanceRequest,
	/// Request on `property_a` assigned to `workman`.
	pub assigned_request: MaintenanceRequest,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
	pub issuer: TokenIssuer,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_authz.db");
		let db_url = format!("sqlite:{}", db_path.display());
		let pool = homely_server_db::create_pool(&db_url).await.unwrap();
		homely_server_db::run_migrations(&pool).await.unwrap();

		let config = ServerConfig::default();
		let state = create_app_state(pool, &config);
		let issuer = TokenIssuer::new(&config.auth.jwt_secret, config.auth.jwt_issuer.clone());

		let fixtures = create_fixtures(&state, &issuer).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
			issuer,
			_temp_dir: temp_dir,
		}
	}

	pub fn user_with_role(&self, role: &str) -> TestUser {
		test_user(&self.issuer, role)
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::GET, path, user, Option::<()>::None)
			.await
	}

	pub async fn post(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::POST, path, user, Some(body)).await
	}

	pub async fn put(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: impl Serialize,
	) -> Response<Body> {
		self.request(Method::PUT, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self
			.request(Method::DELETE, path, user, Option::<()>::None)
			.await
	}

	/// GET with a raw `Authorization` header value.
	pub async fn get_with_authorization(&self, path: &str, authorization: &str) -> Response<Body> {
		let request = Request::builder()
			.method(Method::GET)
			.uri(path)
			.header("authorization", authorization)
			.body(Body::empty())
			.unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}

	async fn request<T: Serialize>(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<T>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			let (name, value) = test_user.auth_header();
			builder = builder.header(name, value);
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();

		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&bytes).unwrap()
}

fn test_user(issuer: &TokenIssuer, role: &str) -> TestUser {
	let id = UserId::generate();
	let token = issuer.issue(id, role, Duration::minutes(30)).unwrap();
	TestUser { id, token }
}

async fn create_fixtures(state: &AppState, issuer: &TokenIssuer) -> Fixtures {
	let admin = test_user(issuer, "admin");
	let landlord_a = test_user(issuer, "landlord");
	let landlord_b = test_user(issuer, "landlord");
	let tenant = test_user(issuer, "tenant");
	let workman = test_user(issuer, "workman");
	let other_workman = test_user(issuer, "workman");
	let roleless = test_user(issuer, "superintendent");

	let property_a = Property::new(landlord_a.id, "Elm Court", "1 Elm St");
	let property_b = Property::new(landlord_b.id, "Oak House", "2 Oak Ave");
	state.property_repo.create_property(&property_a).await.unwrap();
	state.property_repo.create_property(&property_b).await.unwrap();

	let unit_a = Unit::new(property_a.id, "1A", 2, 125_000);
	state.property_repo.create_unit(&unit_a).await.unwrap();

	let lease_a = Lease::new(
		unit_a.id,
		tenant.id,
		125_000,
		NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
		None,
	);
	state.lease_repo.create_lease(&lease_a).await.unwrap();

	let pending_request = MaintenanceRequest::new(
		property_a.id,
		Some(unit_a.id),
		tenant.id,
		"Leaking tap",
		"Kitchen tap drips constantly",
	);
	state
		.maintenance_repo
		.create_request(&pending_request)
		.await
		.unwrap();

	let to_assign = MaintenanceRequest::new(
		property_a.id,
		None,
		tenant.id,
		"Broken heater",
		"No heat in the living room",
	);
	state.maintenance_repo.create_request(&to_assign).await.unwrap();
	state.maintenance_repo.approve(&to_assign.id).await.unwrap();
	let assigned_request = state
		.maintenance_repo
		.assign(&to_assign.id, &workman.id)
		.await
		.unwrap();

	Fixtures {
		admin,
		landlord_a,
		landlord_b,
		tenant,
		workman,
		other_workman,
		roleless,
		property_a,
		property_b,
		unit_a,
		lease_a,
		pending_request,
		assigned_request,
	}
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = match (&case.method, &case.body) {
			(m, Some(body)) if *m == Method::POST => {
				app.post(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, Some(body)) if *m == Method::PUT => {
				app.put(&case.path, case.user.as_ref(), body.clone()).await
			}
			(m, None) if *m == Method::POST => {
				app.post(&case.path, case.user.as_ref(), serde_json::json!({})).await
			}
			(m, _) if *m == Method::DELETE => app.delete(&case.path, case.user.as_ref()).await,
			_ => app.get(&case.path, case.user.as_ref()).await,
		};

		if response.status() != case.expected_status {
			// Read the response body for debugging
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}
