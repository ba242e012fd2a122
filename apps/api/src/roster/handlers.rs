//! Axum route handlers for direct roster lookups.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::EmployeeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmployeeSearchParams {
    pub skill: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeSearchResponse {
    pub employees: Vec<EmployeeRecord>,
}

/// GET /employees/search?skill=&project=
///
/// Attribute filter over the roster. Bypasses the embedding index entirely.
pub async fn handle_employee_search(
    State(state): State<AppState>,
    Query(params): Query<EmployeeSearchParams>,
) -> Json<EmployeeSearchResponse> {
    let employees: Vec<EmployeeRecord> = state
        .roster
        .filter(params.skill.as_deref(), params.project.as_deref())
        .into_iter()
        .cloned()
        .collect();

    debug!(
        skill = ?params.skill,
        project = ?params.project,
        found = employees.len(),
        "employee search"
    );

    Json(EmployeeSearchResponse { employees })
}
