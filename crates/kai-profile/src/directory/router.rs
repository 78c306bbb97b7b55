use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{EmployeeId, NewOrganization, OrganizationId};
use super::repository::{DirectoryStore, RepositoryError};
use super::service::{DirectoryError, DirectoryService};

/// Router for organization admins: organizations, employees and dashboards.
///
/// The `:org` segment is the organization id for `DELETE` and the invite
/// code everywhere else.
pub fn directory_router<S>(service: Arc<DirectoryService<S>>) -> Router
where
    S: DirectoryStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/organizations",
            get(list_organizations_handler::<S>).post(create_organization_handler::<S>),
        )
        .route(
            "/api/v1/organizations/:org",
            delete(delete_organization_handler::<S>),
        )
        .route(
            "/api/v1/organizations/:org/employees",
            get(list_employees_handler::<S>),
        )
        .route(
            "/api/v1/organizations/:org/employees/import",
            post(import_employees_handler::<S>),
        )
        .route(
            "/api/v1/organizations/:org/dashboard",
            get(dashboard_handler::<S>),
        )
        .route(
            "/api/v1/employees/:employee_id",
            delete(delete_employee_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_organizations_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.organizations() {
        Ok(organizations) => (StatusCode::OK, Json(organizations)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn create_organization_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Json(request): Json<NewOrganization>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.create_organization(request) {
        Ok(organization) => (StatusCode::CREATED, Json(organization)).into_response(),
        Err(DirectoryError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "organization code already in use" });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn delete_organization_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(org_id): Path<String>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.delete_organization(&OrganizationId(org_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn list_employees_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(org_code): Path<String>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.employees(&org_code) {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn import_employees_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(org_code): Path<String>,
    body: String,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.import_csv(&org_code, body.as_bytes()) {
        Ok(imported) => {
            let payload = json!({ "imported": imported.len() });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(org_code): Path<String>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.dashboard(&org_code) {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) async fn delete_employee_handler<S>(
    State(service): State<Arc<DirectoryService<S>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    S: DirectoryStore + 'static,
{
    match service.delete_employee(&EmployeeId(employee_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => directory_error_response(err),
    }
}

pub(crate) fn directory_error_response(err: DirectoryError) -> Response {
    let status = match &err {
        DirectoryError::BlankField(_) | DirectoryError::ReservedCode(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DirectoryError::Import(_) => StatusCode::BAD_REQUEST,
        DirectoryError::UnknownOrganization(_)
        | DirectoryError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DirectoryError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        DirectoryError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
