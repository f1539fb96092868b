use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assign::TeamBuilder;
use crate::error::Result;
use crate::project::ProjectAnalysis;
use crate::roster::{EmployeeSkills, Roster};
use crate::team::TeamComposition;

/// Input to the profiling stage: a document identifier plus its already
/// extracted text. Text extraction itself happens upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub identifier: String,
    #[serde(default)]
    pub text: String,
}

/// Input to the planning stage: the free-text project description plus
/// any skills the requester already knows they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectBrief {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Stage (a): extract categorized skills from candidate documents.
/// Implementations are typically language-model backed and live outside
/// this crate.
#[async_trait]
pub trait SkillProfiler: Send + Sync {
    async fn profile(&self, documents: &[SourceDocument]) -> Result<Vec<EmployeeSkills>>;
}

/// Stage (b): decompose a project brief into scheduled tasks with skill
/// requirements.
#[async_trait]
pub trait TaskPlanner: Send + Sync {
    async fn plan(&self, brief: &ProjectBrief) -> Result<ProjectAnalysis>;
}

/// Typed outputs of every stage of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub roster: Roster,
    pub analysis: ProjectAnalysis,
    pub composition: TeamComposition,
}

/// Sequential profile -> plan -> build pipeline. Stage outputs are
/// validated at the boundary before the next stage consumes them; any
/// stage error aborts the run.
pub struct Pipeline<P, T> {
    profiler: P,
    planner: T,
    builder: TeamBuilder,
}

impl<P, T> Pipeline<P, T>
where
    P: SkillProfiler,
    T: TaskPlanner,
{
    pub fn new(profiler: P, planner: T, builder: TeamBuilder) -> Self {
        Self {
            profiler,
            planner,
            builder,
        }
    }

    pub async fn run(&self, documents: &[SourceDocument], brief: &ProjectBrief) -> Result<PipelineRun> {
        tracing::info!(documents = documents.len(), "Pipeline started");

        let records = self.profiler.profile(documents).await?;
        let roster = Roster::new(records);
        roster.validate()?;
        tracing::info!(candidates = roster.len(), "Profiling stage complete");

        let analysis = self.planner.plan(brief).await?;
        analysis.validate()?;
        tracing::info!(tasks = analysis.tasks.len(), "Planning stage complete");

        let composition = self.builder.build(&analysis, &roster).await?;
        tracing::info!(
            members = composition.member_count(),
            unassigned = composition.unassigned_tasks.len(),
            "Pipeline complete"
        );

        Ok(PipelineRun {
            roster,
            analysis,
            composition,
        })
    }
}
