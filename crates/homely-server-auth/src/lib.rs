// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and role-based access control for the Homely server.
//!
//! The decision path for every request is:
//!
//! ```text
//! Bearer token ──► TokenVerifier ──► Principal { id, role }
//!                                        │
//!            RoutePolicy ──► evaluate ◄──┘
//!                               │
//!             (Owned routes) OwnershipResolver ──► ResourceAttrs
//!                               │
//!                     Ok(()) | AccessError
//! ```
//!
//! Everything except [`OwnershipResolver`] and token handling is pure and
//! synchronous; the permission table is built once and never mutated.

pub mod guard;
pub mod middleware;
pub mod ownership;
pub mod permission;
pub mod policy;
pub mod token;
pub mod types;

pub use guard::{
	evaluate, is_allowed, needs_resource, owns, role_allows, AccessError, Principal, ResourceAttrs,
	ResourceKind,
};
pub use middleware::{extract_bearer_token, AuthContext};
pub use ownership::{OwnershipError, OwnershipResolver};
pub use permission::{Permission, PermissionTable};
pub use policy::RoutePolicy;
pub use token::{AccessClaims, TokenError, TokenIssuer, TokenVerifier};
pub use types::{LeaseId, MaintenanceRequestId, PropertyId, Role, UnitId, UserId};
