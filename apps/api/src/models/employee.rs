use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One employee profile from the roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeRecord {
    pub name: String,
    pub skills: Vec<String>,
    /// Kept as written in the roster so `4` and `4.0` render the way the file has them.
    pub experience_years: Number,
    pub projects: Vec<String>,
    pub availability: String,
}

impl EmployeeRecord {
    /// Text blob fed to the embedding provider for this employee.
    ///
    /// Layout: `"{name} {skills} {years} years {projects} {availability}"`,
    /// with skills and projects comma-joined.
    pub fn profile_text(&self) -> String {
        format!(
            "{} {} {} years {} {}",
            self.name,
            self.skills.join(", "),
            self.experience_years,
            self.projects.join(", "),
            self.availability
        )
    }

    /// One prompt line: `Name — Skills: ..; Projects: ..; Experience: N years; Availability: ..`
    pub fn summary_line(&self) -> String {
        format!(
            "{} — Skills: {}; Projects: {}; Experience: {} years; Availability: {}",
            self.name,
            self.skills.join(", "),
            self.projects.join(", "),
            self.experience_years,
            self.availability
        )
    }

    /// True when any skill equals `skill`, ignoring case.
    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = skill.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == wanted)
    }

    /// True when any project name contains `project`, ignoring case.
    pub fn worked_on(&self, project: &str) -> bool {
        let wanted = project.to_lowercase();
        self.projects
            .iter()
            .any(|p| p.to_lowercase().contains(&wanted))
    }

    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if self.availability.trim().is_empty() {
            return Err(format!("{}: availability cannot be empty", self.name));
        }
        if self.experience_years.as_f64().map_or(true, |y| y < 0.0) {
            return Err(format!(
                "{}: experience_years must be a non-negative number, got {}",
                self.name, self.experience_years
            ));
        }
        if self.skills.iter().any(|s| s.trim().is_empty()) {
            return Err(format!("{}: skills contains a blank entry", self.name));
        }
        if self.projects.iter().any(|p| p.trim().is_empty()) {
            return Err(format!("{}: projects contains a blank entry", self.name));
        }
        Ok(())
    }
}
