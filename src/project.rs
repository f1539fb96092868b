use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CrewmatchError, Result};

/// Lowercase, trim and deduplicate a batch of skill strings, dropping
/// empties. Every skill set in the system goes through this at load time.
pub(crate) fn normalize_skills<'a, I>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    skills
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn lowered_skill_set<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(normalize_skills(raw.iter().map(String::as_str)))
}

/// One decomposed unit of project work with its skill requirements and
/// schedule window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Task names this task depends on. Checked for referential integrity
    /// at load, carried as metadata; ordering is driven purely by
    /// `start_days_from_kickoff`.
    #[serde(default, alias = "dependencies")]
    pub depends_on: Vec<String>,
    #[serde(default, deserialize_with = "lowered_skill_set")]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub start_days_from_kickoff: u32,
    #[serde(default = "default_duration")]
    pub duration_days: u32,
}

fn default_duration() -> u32 {
    1
}

impl ProjectTask {
    /// First day after the task, half-open. Valid once the enclosing
    /// analysis passed [`ProjectAnalysis::validate`].
    pub fn end_day(&self) -> u32 {
        self.start_days_from_kickoff + self.duration_days
    }
}

/// Output artifact of the project planning stage: the task breakdown plus
/// the skill summary the planner derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    #[serde(default)]
    pub provided_skills: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub all_skills: Vec<String>,
    #[serde(default)]
    pub rationale: String,
    /// Requested team size, when the planning stage recorded one. The CLI
    /// falls back to this when no explicit cap is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_employees: Option<usize>,
}

impl ProjectAnalysis {
    /// Parse and validate an analysis artifact from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let analysis: Self = serde_json::from_str(data)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Read, parse and validate an analysis artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Fail-fast shape checks. Nothing downstream runs against an
    /// artifact that has not passed here.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.name.as_str()) {
                return Err(CrewmatchError::InvalidProject(format!(
                    "duplicate task name '{}'",
                    task.name
                )));
            }
            if task.duration_days == 0 {
                return Err(CrewmatchError::InvalidProject(format!(
                    "task '{}' has zero duration",
                    task.name
                )));
            }
            if task
                .start_days_from_kickoff
                .checked_add(task.duration_days)
                .is_none()
            {
                return Err(CrewmatchError::InvalidProject(format!(
                    "task '{}' schedule window overflows",
                    task.name
                )));
            }
        }
        for task in &self.tasks {
            for dep in &task.depends_on {
                if !seen.contains(dep.as_str()) {
                    return Err(CrewmatchError::InvalidProject(format!(
                        "task '{}' depends on unknown task '{}'",
                        task.name, dep
                    )));
                }
            }
        }
        Ok(())
    }
}
