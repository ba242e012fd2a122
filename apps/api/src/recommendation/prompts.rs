// Prompt text and fixed user-facing answers for the recommendation flow.

/// Closing instruction appended after the match list.
pub const RECOMMENDATION_INSTRUCTION: &str =
    "Write a friendly and professional HR recommendation explaining why each person fits.";

/// Answer when nobody clears the similarity threshold. No LLM call is made.
pub const NO_MATCHES_ANSWER: &str = "No suitable employees found for your query.";

/// Answer when the LLM returns 2xx with an unexpected body.
pub const MALFORMED_RESPONSE_ANSWER: &str = "Couldn't parse LLM response.";

/// Prefix for answers built from a non-2xx LLM response body.
pub const LLM_ERROR_PREFIX: &str = "Error from LLM API: ";
