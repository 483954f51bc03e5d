// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server for the homely rental property service.

pub mod access_middleware;
pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod error;
pub mod guarded_router;
pub mod routes;
pub mod version;

pub use api::{create_app_state, create_router, route_table, AppState};
pub use error::{ErrorResponse, ServerError};
pub use guarded_router::{GuardedRouter, RouteEntry, RouteTable, Verb};
