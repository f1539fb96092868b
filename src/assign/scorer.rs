use std::collections::BTreeSet;

use crate::embedding::{cosine, EmbedError, EmbeddingProvider, VectorCache};
use crate::roster::Candidate;
use crate::taxonomy::SkillTaxonomy;

const EXACT_WEIGHT: f32 = 1.0;
const RELATED_WEIGHT: f32 = 0.5;

/// How well one candidate covers one task's requirements. `matched` and
/// `missing` partition the required set exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Sum of per-skill match weights over the requirement count, in [0, 1]
    /// for the default thresholds. Ranking heuristic, not a probability.
    pub score: f32,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

/// Scores candidates against a task's required skills in three passes:
/// exact matches first, then taxonomy relatives, then embedding
/// similarity for whatever is still uncovered.
pub struct SkillScorer<'a> {
    taxonomy: &'a SkillTaxonomy,
    similarity_threshold: f32,
}

impl<'a> SkillScorer<'a> {
    pub fn new(taxonomy: &'a SkillTaxonomy, similarity_threshold: f32) -> Self {
        Self {
            taxonomy,
            similarity_threshold,
        }
    }

    pub async fn score(
        &self,
        required: &BTreeSet<String>,
        candidate: &Candidate,
        provider: &dyn EmbeddingProvider,
        vectors: &mut VectorCache,
    ) -> Result<MatchOutcome, EmbedError> {
        if required.is_empty() {
            return Ok(MatchOutcome {
                score: 0.0,
                matched: BTreeSet::new(),
                missing: BTreeSet::new(),
            });
        }

        let mut weight_sum = 0.0f32;

        // Exact pass: a required skill the candidate holds verbatim.
        let exact: BTreeSet<String> = required
            .intersection(&candidate.skills)
            .cloned()
            .collect();
        weight_sum += exact.len() as f32 * EXACT_WEIGHT;
        let mut matched = exact.clone();

        // Taxonomy pass: the candidate holds a direct parent or child of a
        // still-unmatched required skill.
        for skill in required {
            if matched.contains(skill) {
                continue;
            }
            if let Some(relatives) = self.taxonomy.relatives(skill) {
                if relatives.contains_any(&candidate.skills) {
                    matched.insert(skill.clone());
                    weight_sum += RELATED_WEIGHT;
                }
            }
        }

        // Embedding pass: best cosine similarity of each still-unmatched
        // required skill against the candidate skills the exact pass did
        // not consume.
        let remaining: Vec<&String> =
            required.iter().filter(|s| !matched.contains(*s)).collect();
        let pool: Vec<&String> =
            candidate.skills.iter().filter(|s| !exact.contains(*s)).collect();
        if !remaining.is_empty() && !pool.is_empty() {
            vectors
                .ensure(
                    provider,
                    remaining.iter().copied().chain(pool.iter().copied()),
                )
                .await?;
            for skill in remaining {
                let task_vec = match vectors.get(skill) {
                    Some(v) => v,
                    None => continue,
                };
                let best = pool
                    .iter()
                    .filter_map(|c| vectors.get(c.as_str()))
                    .map(|cand_vec| cosine(task_vec, cand_vec))
                    .fold(-1.0f32, f32::max);
                let similarity = best.clamp(-1.0, 1.0);
                if similarity >= self.similarity_threshold {
                    matched.insert(skill.clone());
                    weight_sum += similarity;
                }
            }
        }

        let missing: BTreeSet<String> = required.difference(&matched).cloned().collect();
        Ok(MatchOutcome {
            score: weight_sum / required.len() as f32,
            matched,
            missing,
        })
    }
}
