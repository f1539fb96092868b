use std::time::Duration;

/// Minimum aggregate match score a candidate needs to be eligible for a
/// task. Inclusive: a score exactly at the threshold passes.
pub const DEFAULT_MIN_SCORE_THRESHOLD: f32 = 0.5;

/// Minimum cosine similarity for the embedding pass to count a required
/// skill as matched.
pub const DEFAULT_SKILL_SIMILARITY_THRESHOLD: f32 = 0.5;

/// Hard deadline for a single embedding provider call.
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 30_000;

/// Configuration for one team-building run.
///
/// The team size cap is caller-supplied (usually the requested team size
/// from the project analysis); the thresholds default to the values above.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Maximum number of distinct members the team may grow to.
    pub team_size_cap: usize,
    /// Eligibility gate on the aggregate match score, in [0, 1].
    pub min_score_threshold: f32,
    /// Per-skill gate for the embedding pass, in [-1, 1].
    pub skill_similarity_threshold: f32,
    /// Deadline for each embedding provider call.
    pub embed_timeout_ms: u64,
}

impl BuilderConfig {
    pub fn new(team_size_cap: usize) -> Self {
        Self {
            team_size_cap,
            min_score_threshold: DEFAULT_MIN_SCORE_THRESHOLD,
            skill_similarity_threshold: DEFAULT_SKILL_SIMILARITY_THRESHOLD,
            embed_timeout_ms: DEFAULT_EMBED_TIMEOUT_MS,
        }
    }

    pub fn with_min_score(mut self, threshold: f32) -> Self {
        self.min_score_threshold = threshold;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.skill_similarity_threshold = threshold;
        self
    }

    pub fn with_embed_timeout_ms(mut self, ms: u64) -> Self {
        self.embed_timeout_ms = ms;
        self
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_config_new() {
        let cfg = BuilderConfig::new(4);
        assert_eq!(cfg.team_size_cap, 4);
        assert_eq!(cfg.min_score_threshold, DEFAULT_MIN_SCORE_THRESHOLD);
        assert_eq!(
            cfg.skill_similarity_threshold,
            DEFAULT_SKILL_SIMILARITY_THRESHOLD
        );
        assert_eq!(cfg.embed_timeout_ms, DEFAULT_EMBED_TIMEOUT_MS);
    }

    #[test]
    fn builder_config_with_overrides() {
        let cfg = BuilderConfig::new(2)
            .with_min_score(0.3)
            .with_similarity_threshold(0.7)
            .with_embed_timeout_ms(5_000);
        assert_eq!(cfg.team_size_cap, 2);
        assert_eq!(cfg.min_score_threshold, 0.3);
        assert_eq!(cfg.skill_similarity_threshold, 0.7);
        assert_eq!(cfg.embed_timeout_ms, 5_000);
    }

    #[test]
    fn embed_timeout_from_ms() {
        let cfg = BuilderConfig::new(1).with_embed_timeout_ms(1_500);
        assert_eq!(cfg.embed_timeout(), Duration::from_millis(1_500));
    }
}
