//! Recommendation Generator. Turns a query and its matches into a prompt,
//! sends it to the hosted model and maps every outcome to an answer string.

pub mod handlers;
pub mod prompts;

use tracing::info;

use crate::llm_client::{Completion, LlmClient, LlmError};
use crate::models::EmployeeRecord;
use prompts::{LLM_ERROR_PREFIX, MALFORMED_RESPONSE_ANSWER, RECOMMENDATION_INSTRUCTION};

/// Builds the downstream prompt:
///
/// ```text
/// HR is looking for: {query}
/// Matching employees:
/// {one summary line per match}
/// {closing instruction}
/// ```
pub fn build_prompt<'a>(
    query: &str,
    matches: impl IntoIterator<Item = &'a EmployeeRecord>,
) -> String {
    let desc = matches
        .into_iter()
        .map(EmployeeRecord::summary_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "HR is looking for: {query}\nMatching employees:\n{desc}\n{RECOMMENDATION_INSTRUCTION}"
    )
}

/// Maps an LLM outcome to the user-visible answer.
///
/// API errors and malformed bodies are answers, not failures. Only transport
/// errors come back as `Err`.
pub fn answer_from(outcome: Result<Completion, LlmError>) -> Result<String, LlmError> {
    match outcome {
        Ok(Completion::Text(text)) => Ok(text),
        Ok(Completion::Malformed { .. }) => Ok(MALFORMED_RESPONSE_ANSWER.to_string()),
        Err(LlmError::Api { body, .. }) => Ok(format!("{LLM_ERROR_PREFIX}{body}")),
        Err(e @ LlmError::Http(_)) => Err(e),
    }
}

/// Prompt the model about `matches` and return its recommendation text.
pub async fn recommend(
    llm: &LlmClient,
    query: &str,
    matches: &[EmployeeRecord],
) -> Result<String, LlmError> {
    let prompt = build_prompt(query, matches);
    info!(matches = matches.len(), "requesting recommendation");
    answer_from(llm.generate(&prompt).await)
}
