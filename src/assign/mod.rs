pub mod builder;
pub mod schedule;
pub mod scorer;

pub use builder::TeamBuilder;
pub use schedule::Schedule;
pub use scorer::{MatchOutcome, SkillScorer};
