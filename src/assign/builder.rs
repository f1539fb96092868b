use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::assign::schedule::Schedule;
use crate::assign::scorer::{MatchOutcome, SkillScorer};
use crate::config::BuilderConfig;
use crate::embedding::{EmbeddingProvider, VectorCache};
use crate::error::{CrewmatchError, Result};
use crate::project::{ProjectAnalysis, ProjectTask};
use crate::roster::Roster;
use crate::taxonomy::SkillTaxonomy;
use crate::team::{Assignment, TeamComposition, TeamMember};

/// Greedy deterministic assignment engine.
///
/// Tasks are visited in schedule order; for each one the whole roster is
/// scored and the best eligible candidate is committed. Greedy with
/// documented tie-breaks, not globally optimal.
pub struct TeamBuilder {
    config: BuilderConfig,
    taxonomy: SkillTaxonomy,
    provider: Arc<dyn EmbeddingProvider>,
}

impl TeamBuilder {
    pub fn new(
        config: BuilderConfig,
        taxonomy: SkillTaxonomy,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            config,
            taxonomy,
            provider,
        }
    }

    /// Run one assignment pass over validated inputs.
    ///
    /// A scoring failure aborts the whole run; skipping the failed pair
    /// would silently reorder the ranking. Tasks that merely find no
    /// eligible candidate land in `unassigned_tasks` instead.
    pub async fn build(&self, analysis: &ProjectAnalysis, roster: &Roster) -> Result<TeamComposition> {
        let candidates = roster.candidates();
        let scorer = SkillScorer::new(&self.taxonomy, self.config.skill_similarity_threshold);
        let mut vectors = VectorCache::new(self.config.embed_timeout());

        tracing::info!(
            tasks = analysis.tasks.len(),
            candidates = candidates.len(),
            cap = self.config.team_size_cap,
            "Team build started"
        );

        // Visit order: start day ascending, ties by name ascending.
        let mut tasks: Vec<&ProjectTask> = analysis.tasks.iter().collect();
        tasks.sort_by(|a, b| {
            a.start_days_from_kickoff
                .cmp(&b.start_days_from_kickoff)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut schedules: Vec<Schedule> = vec![Schedule::new(); candidates.len()];
        let mut assignments: BTreeMap<String, Vec<Assignment>> = BTreeMap::new();
        let mut team_ids: HashSet<String> = HashSet::new();
        let mut unassigned: Vec<String> = Vec::new();

        for task in tasks {
            if task.skills.is_empty() {
                tracing::info!(task = %task.name, "Task requires no skills, unassigned");
                unassigned.push(task.name.clone());
                continue;
            }

            let mut ranking: Vec<(usize, MatchOutcome)> = Vec::with_capacity(candidates.len());
            for (idx, candidate) in candidates.iter().enumerate() {
                let outcome = scorer
                    .score(&task.skills, candidate, self.provider.as_ref(), &mut vectors)
                    .await
                    .map_err(|source| CrewmatchError::Embedding {
                        task: task.name.clone(),
                        candidate: candidate.id.clone(),
                        source,
                    })?;
                ranking.push((idx, outcome));
            }
            // Best score first; equal scores fall back to identifier
            // descending so reruns rank identically.
            ranking.sort_by(|(a_idx, a), (b_idx, b)| {
                b.score
                    .total_cmp(&a.score)
                    .then_with(|| candidates[*b_idx].id.cmp(&candidates[*a_idx].id))
            });

            let mut assigned = false;
            for (idx, outcome) in ranking {
                if outcome.score < self.config.min_score_threshold {
                    continue;
                }
                if !schedules[idx].is_available(task.start_days_from_kickoff, task.duration_days) {
                    continue;
                }
                let candidate = &candidates[idx];
                let in_team = team_ids.contains(&candidate.id);
                if !in_team && team_ids.len() >= self.config.team_size_cap {
                    continue;
                }

                schedules[idx].commit(task.start_days_from_kickoff, task.duration_days);
                team_ids.insert(candidate.id.clone());
                tracing::info!(
                    task = %task.name,
                    candidate = %candidate.id,
                    score = outcome.score,
                    "Task assigned"
                );
                assignments
                    .entry(candidate.id.clone())
                    .or_default()
                    .push(Assignment {
                        task_name: task.name.clone(),
                        start_day: task.start_days_from_kickoff,
                        end_day: task.end_day(),
                        skills_match: outcome.matched.into_iter().collect(),
                        missing_skills: outcome.missing.into_iter().collect(),
                        score: outcome.score,
                    });
                assigned = true;
                break;
            }

            if !assigned {
                tracing::info!(task = %task.name, "No eligible candidate, unassigned");
                unassigned.push(task.name.clone());
            }
        }

        let team: Vec<TeamMember> = assignments
            .into_iter()
            .map(|(employee_identifier, assignments)| TeamMember {
                employee_identifier,
                assignments,
            })
            .collect();

        tracing::info!(
            members = team.len(),
            unassigned = unassigned.len(),
            "Team build complete"
        );
        Ok(TeamComposition::new(team, unassigned, self.config.team_size_cap))
    }
}
