// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for homely-server, generated with utoipa and served
//! at `/api/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Homely Server API",
        version = "1.0.0",
        description = "Rental property management API: properties, units, leases and maintenance work orders behind role and ownership based access control.",
        license(name = "Proprietary"),
        contact(
            name = "Geoffrey Huntley",
            email = "ghuntley@ghuntley.com",
            url = "https://ghuntley.com"
        )
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health checks"),
        (name = "identity", description = "The calling principal"),
        (name = "properties", description = "Landlord property management"),
        (name = "units", description = "Units within a property"),
        (name = "leases", description = "Tenant leases on units"),
        (name = "maintenance", description = "Maintenance requests and work orders"),
        (name = "admin", description = "Read-only views of roles, permissions and route policies")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::me::get_me,
        crate::routes::properties::list_properties,
        crate::routes::properties::create_property,
        crate::routes::properties::get_property,
        crate::routes::properties::update_property,
        crate::routes::properties::delete_property,
        crate::routes::properties::list_units,
        crate::routes::properties::create_unit,
        crate::routes::units::get_unit,
        crate::routes::leases::list_leases,
        crate::routes::leases::create_lease,
        crate::routes::leases::get_lease,
        crate::routes::maintenance::list_requests,
        crate::routes::maintenance::create_request,
        crate::routes::maintenance::approve_request,
        crate::routes::maintenance::assign_request,
        crate::routes::maintenance::complete_request,
        crate::routes::admin::list_permissions,
        crate::routes::admin::list_routes,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::health::HealthStatus,
            crate::routes::me::MeResponse,
            crate::routes::properties::PropertyRequest,
            crate::routes::properties::CreateUnitRequest,
            crate::routes::properties::ListPropertiesResponse,
            crate::routes::properties::ListUnitsResponse,
            crate::routes::leases::CreateLeaseRequest,
            crate::routes::leases::ListLeasesResponse,
            crate::routes::maintenance::CreateMaintenanceRequest,
            crate::routes::maintenance::AssignRequest,
            crate::routes::maintenance::ListMaintenanceResponse,
            crate::routes::admin::RolePermissions,
            crate::routes::admin::PermissionsResponse,
            crate::routes::admin::RoutesResponse,
            homely_server_db::Property,
            homely_server_db::Unit,
            homely_server_db::Lease,
            homely_server_db::MaintenanceRequest,
            homely_server_db::MaintenanceStatus,
        )
    )
)]
pub struct ApiDoc;
