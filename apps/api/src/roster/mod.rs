//! Roster Store: the static employee list, loaded once at startup.
//!
//! The roster is read-only for the life of the process. Every record is
//! validated on load; a single malformed entry fails startup rather than
//! surfacing later inside a request.

pub mod handlers;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::EmployeeRecord;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid employee at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RosterFile {
    employees: Vec<EmployeeRecord>,
}

/// The in-memory roster, in file order.
#[derive(Debug, Clone)]
pub struct Roster {
    employees: Vec<EmployeeRecord>,
}

impl Roster {
    /// Reads and validates `{"employees": [...]}` from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            employees = roster.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    pub fn from_json(raw: &str) -> Result<Self, RosterError> {
        let file: RosterFile = serde_json::from_str(raw)?;
        Self::from_records(file.employees)
    }

    pub fn from_records(employees: Vec<EmployeeRecord>) -> Result<Self, RosterError> {
        for (index, record) in employees.iter().enumerate() {
            record
                .validate()
                .map_err(|reason| RosterError::InvalidRecord { index, reason })?;
        }
        Ok(Self { employees })
    }

    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    pub fn get(&self, index: usize) -> Option<&EmployeeRecord> {
        self.employees.get(index)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Plain attribute filter: `skill` must equal one of the record's skills,
    /// `project` must appear inside one of its project names. Both ignore case,
    /// both are optional, and an empty string counts as absent.
    pub fn filter(&self, skill: Option<&str>, project: Option<&str>) -> Vec<&EmployeeRecord> {
        let skill = skill.filter(|s| !s.is_empty());
        let project = project.filter(|p| !p.is_empty());

        self.employees
            .iter()
            .filter(|e| skill.map_or(true, |s| e.has_skill(s)))
            .filter(|e| project.map_or(true, |p| e.worked_on(p)))
            .collect()
    }
}
