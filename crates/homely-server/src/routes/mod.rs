// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.
//!
//! Handlers assume the route gate has already run: they never make access
//! decisions, only scope list queries to the caller.

pub mod admin;
pub mod docs;
pub mod health;
pub mod leases;
pub mod maintenance;
pub mod me;
pub mod properties;
pub mod units;
