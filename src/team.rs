use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One committed task for one team member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub task_name: String,
    pub start_day: u32,
    pub end_day: u32,
    /// Required skills the member covers, directly or via a related or
    /// similar skill. Sorted.
    pub skills_match: Vec<String>,
    /// Required skills nothing in the member's set covered. Sorted.
    pub missing_skills: Vec<String>,
    #[serde(default, alias = "semantic_match_score")]
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    #[serde(alias = "employee_filename")]
    pub employee_identifier: String,
    pub assignments: Vec<Assignment>,
}

/// Final artifact of a team-building run. Written exactly once per run,
/// also in the degraded [`failure`](Self::failure) form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TeamComposition {
    #[serde(default)]
    pub team: Vec<TeamMember>,
    #[serde(default)]
    pub unassigned_tasks: Vec<String>,
    #[serde(default)]
    pub rationale: String,
}

impl TeamComposition {
    /// Assemble the artifact and its summary rationale.
    pub fn new(team: Vec<TeamMember>, unassigned_tasks: Vec<String>, requested: usize) -> Self {
        let rationale = format!(
            "Requested a team of {}. Formed a team of {} based on skill matching \
             and availability. {} tasks could not be assigned.",
            requested,
            team.len(),
            unassigned_tasks.len()
        );
        Self {
            team,
            unassigned_tasks,
            rationale,
        }
    }

    /// Degraded artifact for a failed run: no team, an explanatory
    /// rationale. Downstream stages keep working with an empty team
    /// instead of a missing file.
    pub fn failure(rationale: impl Into<String>) -> Self {
        Self {
            team: Vec::new(),
            unassigned_tasks: Vec::new(),
            rationale: rationale.into(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Members holding at least one assignment.
    pub fn member_count(&self) -> usize {
        self.team.len()
    }

    pub fn assignment_count(&self) -> usize {
        self.team.iter().map(|m| m.assignments.len()).sum()
    }

    /// Union of missing skills per member, members with no gaps omitted.
    /// Feed for downstream learning-plan generation.
    pub fn skill_gaps(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut gaps = BTreeMap::new();
        for member in &self.team {
            let missing: BTreeSet<String> = member
                .assignments
                .iter()
                .flat_map(|a| a.missing_skills.iter().cloned())
                .collect();
            if !missing.is_empty() {
                gaps.insert(member.employee_identifier.clone(), missing);
            }
        }
        gaps
    }
}
