//! Axum route handler for the chat endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::EmployeeRecord;
use crate::recommendation::{prompts::NO_MATCHES_ANSWER, recommend};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<EmployeeRecord>>,
}

/// POST /chat
///
/// Semantic match → recommendation. Every query goes through the matcher,
/// blank ones included. When nobody clears the threshold the fixed no-match
/// answer is returned and the LLM is not called.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let matcher = state.matcher.clone();
    let query = request.query.clone();
    let ranked = tokio::task::spawn_blocking(move || matcher.search(&query))
        .await
        .map_err(|e| anyhow::anyhow!("search task failed: {e}"))??;

    if ranked.is_empty() {
        info!("no employees above threshold");
        return Ok(Json(ChatResponse {
            answer: NO_MATCHES_ANSWER.to_string(),
            matches: None,
        }));
    }

    info!(
        matched = ranked.len(),
        names = ?ranked.iter().map(|m| m.employee.name.as_str()).collect::<Vec<_>>(),
        "employees matched"
    );

    let matches: Vec<EmployeeRecord> = ranked.into_iter().map(|m| m.employee).collect();
    let answer = recommend(&state.llm, &request.query, &matches).await?;

    Ok(Json(ChatResponse {
        answer,
        matches: Some(matches),
    }))
}
