use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::Employee;
use serde_json::Value;
use service::validation::sanitize_value;

use crate::errors::ApiError;
use crate::state::ServerState;

type JsonBody = Result<Json<Value>, JsonRejection>;

fn read_body(body: JsonBody) -> Result<Value, ApiError> {
    body.map(|Json(v)| v).map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.is_empty() {
        return Err(ApiError::BadRequest("Missing employee id".into()));
    }
    Ok(id)
}

/// List every employee.
pub async fn list_employees(State(state): State<ServerState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.list_all().await?))
}

/// Validate the body and append a new employee.
pub async fn create_employee(
    State(state): State<ServerState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let payload = sanitize_value(&read_body(body)?)?;
    let created = state.employees.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Validate the body and replace the employee with `id`.
pub async fn update_employee(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Employee>, ApiError> {
    let id = require_id(&id)?;
    let payload = sanitize_value(&read_body(body)?)?;
    Ok(Json(state.employees.update(id, payload).await?))
}

pub async fn delete_employee(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(&id)?;
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT`/`DELETE` on the collection path with an empty id segment.
pub async fn missing_id() -> ApiError {
    ApiError::BadRequest("Missing employee id".into())
}
