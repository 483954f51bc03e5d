// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for the Homely server.
//!
//! Repositories are thin, cloneable wrappers around a [`sqlx::SqlitePool`].
//! They do no authorization; callers reach them only after the route gate
//! has allowed the request.

pub mod error;
pub mod lease;
pub mod maintenance;
pub mod ownership;
pub mod pool;
pub mod property;
mod rows;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{DbError, Result};
pub use lease::LeaseRepository;
pub use maintenance::MaintenanceRepository;
pub use ownership::SqlOwnershipResolver;
pub use pool::{create_pool, run_migrations};
pub use property::PropertyRepository;
pub use types::{Lease, MaintenanceRequest, MaintenanceStatus, Property, RequestScope, Unit};
