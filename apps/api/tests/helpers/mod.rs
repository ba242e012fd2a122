#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use hr_api::config::Config;
use hr_api::embedding::EmbeddingProvider;
use hr_api::roster::Roster;
use hr_api::routes::build_router;
use hr_api::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// Small fixed roster used across router tests.
pub const ROSTER_JSON: &str = r#"{
    "employees": [
        {"name": "Asha", "skills": ["Python", "Django"], "experience_years": 4,
         "projects": ["Healthcare Portal"], "availability": "available"},
        {"name": "Ben", "skills": ["React Native", "TypeScript"], "experience_years": 3,
         "projects": ["Fitness Tracker App"], "availability": "busy"},
        {"name": "Chen", "skills": ["Python", "TensorFlow"], "experience_years": 6,
         "projects": ["Medical Imaging", "Healthcare Chatbot"], "availability": "available"},
        {"name": "Diana", "skills": ["Java", "Spring"], "experience_years": 8,
         "projects": ["Payments Gateway"], "availability": "available"}
    ]
}"#;

const VOCABULARY: [&str; 10] = [
    "python",
    "django",
    "react",
    "typescript",
    "tensorflow",
    "java",
    "spring",
    "healthcare",
    "fitness",
    "payments",
];

/// Deterministic embedder: one dimension per vocabulary word present in the
/// text, everything else ignored. Similarities are easy to reason about:
/// a one-word query against a profile with `n` vocabulary hits scores
/// `1/sqrt(n)` when the word is among them and `0` otherwise.
pub struct KeywordEmbedder;

impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .map(str::to_lowercase)
            .collect();
        Ok(VOCABULARY
            .iter()
            .map(|v| if words.iter().any(|w| w == v) { 1.0 } else { 0.0 })
            .collect())
    }
}

pub fn test_config(llm_api_url: &str) -> Config {
    let vars: HashMap<&str, String> = HashMap::from([
        ("HUGGINGFACE_API_KEY", "hf_test_key".to_string()),
        ("LLM_API_URL", llm_api_url.to_string()),
    ]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn test_app(llm_api_url: &str) -> Router {
    let roster = Roster::from_json(ROSTER_JSON).unwrap();
    let state = AppState::build(&test_config(llm_api_url), roster, Arc::new(KeywordEmbedder))
        .unwrap();
    build_router(state)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn names(records: &Value) -> Vec<String> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}
