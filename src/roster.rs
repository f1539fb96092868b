use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CrewmatchError, Result};
use crate::project::normalize_skills;

/// One profiled employee: originating document identifier plus skills
/// bucketed by category (hard skills, tools, languages and so on).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSkills {
    #[serde(alias = "filename")]
    pub identifier: String,
    #[serde(default)]
    pub summary: BTreeMap<String, Vec<String>>,
}

/// Matching view of an employee: category boundaries dropped, skills
/// unioned into one normalized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub skills: BTreeSet<String>,
}

impl Candidate {
    pub fn from_record(record: &EmployeeSkills) -> Self {
        Self {
            id: record.identifier.clone(),
            skills: normalize_skills(
                record.summary.values().flatten().map(String::as_str),
            ),
        }
    }
}

/// The profiling stage's output artifact: a plain JSON array of employee
/// skill records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<EmployeeSkills>,
}

impl Roster {
    pub fn new(records: Vec<EmployeeSkills>) -> Self {
        Self { records }
    }

    /// Parse and validate a roster artifact from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let roster: Self = serde_json::from_str(data)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Read, parse and validate a roster artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.identifier.as_str()) {
                return Err(CrewmatchError::InvalidRoster(format!(
                    "duplicate identifier '{}'",
                    record.identifier
                )));
            }
        }
        Ok(())
    }

    pub fn records(&self) -> &[EmployeeSkills] {
        &self.records
    }

    /// Candidates in record order, ready for matching.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.records.iter().map(Candidate::from_record).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
