use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::{cosine_similarity, EmbeddingIndex};
use crate::config::MatchConfig;
use crate::models::EmployeeRecord;

/// A roster entry that cleared the similarity floor.
#[derive(Debug, Clone)]
pub struct RankedMatch {
    pub employee: EmployeeRecord,
    pub similarity: f32,
}

/// Ranks the roster against a free-text query.
#[derive(Clone)]
pub struct Matcher {
    index: Arc<EmbeddingIndex>,
    config: MatchConfig,
}

impl Matcher {
    pub fn new(index: Arc<EmbeddingIndex>, config: MatchConfig) -> Self {
        Self { index, config }
    }

    /// [`Matcher::search_top`] with the configured `top_k`.
    pub fn search(&self, query: &str) -> Result<Vec<RankedMatch>> {
        self.search_top(query, self.config.top_k)
    }

    /// Embeds `query`, scores it against every employee, keeps the best
    /// `top_k`, then drops anything at or below the similarity threshold.
    ///
    /// The cut to `top_k` happens before thresholding, so fewer than `top_k`
    /// results may come back even when lower-ranked employees would pass.
    pub fn search_top(&self, query: &str, top_k: usize) -> Result<Vec<RankedMatch>> {
        let query_vec = self.index.provider().embed(query)?;
        let scores = self.score_all(&query_vec);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // stable: equal scores keep roster order
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        let matches: Vec<RankedMatch> = order
            .into_iter()
            .take(top_k)
            .filter(|&i| scores[i] > self.config.threshold)
            .filter_map(|i| {
                self.index.roster().get(i).map(|employee| RankedMatch {
                    employee: employee.clone(),
                    similarity: scores[i],
                })
            })
            .collect();

        debug!(
            top_k,
            threshold = self.config.threshold,
            matched = matches.len(),
            best = ?matches.first().map(|m| m.similarity),
            "roster search"
        );

        Ok(matches)
    }

    /// Similarity of `query_vec` to each employee, in roster order.
    pub fn score_all(&self, query_vec: &[f32]) -> Vec<f32> {
        self.index
            .vectors()
            .iter()
            .map(|v| cosine_similarity(query_vec, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{hash::HashEmbeddingProvider, EmbeddingProvider};
    use crate::roster::Roster;

    /// One dimension per axis keyword; other words are ignored.
    struct AxisProvider;

    const AXES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

    impl EmbeddingProvider for AxisProvider {
        fn name(&self) -> &'static str {
            "axis"
        }
        fn dimensions(&self) -> usize {
            AXES.len()
        }
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let lower = text.to_lowercase();
            Ok(AXES
                .iter()
                .map(|a| if lower.contains(a) { 1.0 } else { 0.0 })
                .collect())
        }
    }

    fn record(name: &str, skills: &[&str]) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_years: serde_json::Number::from(1u32),
            projects: vec![],
            availability: "available".to_string(),
        }
    }

    fn matcher(provider: Arc<dyn EmbeddingProvider>, records: Vec<EmployeeRecord>) -> Matcher {
        let roster = Arc::new(Roster::from_records(records).unwrap());
        let index = Arc::new(EmbeddingIndex::build(roster, provider).unwrap());
        Matcher::new(index, MatchConfig::default())
    }

    fn names(matches: &[RankedMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.employee.name.as_str()).collect()
    }

    #[test]
    fn test_ranks_descending_and_applies_threshold() {
        let m = matcher(
            Arc::new(AxisProvider),
            vec![
                record("One", &["alpha"]),
                record("Two", &["alpha", "beta"]),
                record("Three", &["alpha", "gamma", "delta"]),
                record("Four", &["gamma"]),
            ],
        );

        let matches = m.search("alpha beta").unwrap();
        assert_eq!(names(&matches), vec!["Two", "One"]);
        assert!(matches[0].similarity > matches[1].similarity);
        assert!(matches.iter().all(|m| m.similarity > 0.5));
    }

    #[test]
    fn test_top_k_caps_results() {
        let m = matcher(
            Arc::new(AxisProvider),
            vec![
                record("A", &["alpha"]),
                record("B", &["alpha"]),
                record("C", &["alpha"]),
                record("D", &["alpha"]),
            ],
        );
        assert_eq!(m.search("alpha").unwrap().len(), 3);
        assert_eq!(m.search_top("alpha", 1).unwrap().len(), 1);
    }

    #[test]
    fn test_equal_scores_keep_roster_order() {
        let m = matcher(
            Arc::new(AxisProvider),
            vec![record("A", &["alpha"]), record("B", &["alpha"]), record("C", &["alpha"])],
        );
        assert_eq!(names(&m.search("alpha").unwrap()), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // [1,0,0,0] vs [1,1,1,1]: cosine is exactly 0.5
        let m = matcher(
            Arc::new(AxisProvider),
            vec![record("Half", &["alpha", "beta", "gamma", "delta"])],
        );
        assert!(m.search("alpha").unwrap().is_empty());
    }

    #[test]
    fn test_no_candidates_above_threshold_returns_empty() {
        let m = matcher(Arc::new(AxisProvider), vec![record("A", &["gamma"])]);
        assert!(m.search("alpha").unwrap().is_empty());
    }

    #[test]
    fn test_profile_text_query_ranks_its_own_employee_first() {
        let records = vec![
            record("Asha", &["Python", "Django"]),
            record("Ben", &["React Native", "TypeScript"]),
            record("Chen", &["Python", "TensorFlow"]),
        ];
        let m = matcher(Arc::new(HashEmbeddingProvider::new(256)), records.clone());

        for (i, r) in records.iter().enumerate() {
            let query_vec = m.index.provider().embed(&r.profile_text()).unwrap();
            let scores = m.score_all(&query_vec);
            let best = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(idx, _)| idx)
                .unwrap();
            assert_eq!(best, i, "{} should score highest against itself", r.name);
        }
    }
}
