// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each has a resolved `*Config` and a partial
//! `*ConfigLayer` that merges field by field.

pub mod auth;
pub mod database;
pub mod http;
pub mod logging;

pub use auth::{AuthConfig, AuthConfigLayer, DEV_JWT_SECRET, MIN_JWT_SECRET_LEN};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
