//! HR resource matcher: ranks a static employee roster against free-text
//! staffing queries and asks a hosted LLM to explain the matches.

pub mod config;
pub mod embedding;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod recommendation;
pub mod roster;
pub mod routes;
pub mod search;
pub mod state;
