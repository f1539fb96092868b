use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crewmatch::assign::TeamBuilder;
use crewmatch::config::{
    BuilderConfig, DEFAULT_EMBED_TIMEOUT_MS, DEFAULT_MIN_SCORE_THRESHOLD,
    DEFAULT_SKILL_SIMILARITY_THRESHOLD,
};
use crewmatch::embedding::HashEmbedding;
use crewmatch::project::ProjectAnalysis;
use crewmatch::roster::Roster;
use crewmatch::taxonomy::SkillTaxonomy;
use crewmatch::team::TeamComposition;

#[derive(Parser, Debug)]
#[command(name = "crewmatch")]
#[command(version)]
#[command(about = "Deterministic team assignment from project analyses and skill rosters")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a team from a project analysis and an employee skills roster
    Assign(AssignArgs),

    /// Look up a skill's relatives in the built-in taxonomy
    Skill {
        /// Skill name (case-insensitive)
        name: String,

        /// Output format
        #[arg(long, short = 'o', default_value = "table")]
        output: OutputFormat,
    },

    /// Report per-member skill gaps from a saved team composition
    Gaps {
        /// Path to a team composition artifact (JSON)
        #[arg(long)]
        team: PathBuf,

        /// Output format
        #[arg(long, short = 'o', default_value = "table")]
        output: OutputFormat,
    },
}

// =============================================================================
// Assign Arguments
// =============================================================================

#[derive(Parser, Debug)]
struct AssignArgs {
    /// Path to the project analysis artifact (JSON)
    #[arg(long)]
    project: PathBuf,

    /// Path to the employee skills roster artifact (JSON)
    #[arg(long)]
    roster: PathBuf,

    /// Maximum team size. Defaults to the requested size recorded in the
    /// analysis artifact, when present.
    #[arg(long)]
    team_size: Option<usize>,

    /// Minimum aggregate match score for a candidate to be eligible
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE_THRESHOLD)]
    min_score: f32,

    /// Minimum embedding similarity for a per-skill match
    #[arg(long, default_value_t = DEFAULT_SKILL_SIMILARITY_THRESHOLD)]
    similarity: f32,

    /// Deadline for each embedding call, in milliseconds
    #[arg(long, default_value_t = DEFAULT_EMBED_TIMEOUT_MS)]
    embed_timeout_ms: u64,

    /// Where to write the team composition artifact
    #[arg(long, default_value = "team_composition.json")]
    out: PathBuf,

    /// Output format for the console summary
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// =============================================================================
// JSON Output Types
// =============================================================================

#[derive(Serialize)]
struct SkillOutput {
    skill: String,
    parents: Vec<String>,
    children: Vec<String>,
}

#[derive(Serialize)]
struct GapsOutput {
    members: Vec<MemberGapsOutput>,
}

#[derive(Serialize)]
struct MemberGapsOutput {
    employee_identifier: String,
    missing_skills: Vec<String>,
}

// =============================================================================
// Assign Implementation
// =============================================================================

/// Write the degraded artifact so downstream stages see an empty team with
/// an explanation instead of a missing file, then exit non-zero.
fn write_failure(out: &Path, rationale: String) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: {}", rationale);
    let artifact = TeamComposition::failure(rationale);
    artifact.save(out)?;
    eprintln!("Degraded team composition written to {}", out.display());
    std::process::exit(1);
}

async fn run_assign(args: AssignArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let analysis = match ProjectAnalysis::load(&args.project) {
        Ok(analysis) => analysis,
        Err(e) => {
            return write_failure(&args.out, format!("Failed to load project analysis: {}", e))
        }
    };
    let roster = match Roster::load(&args.roster) {
        Ok(roster) => roster,
        Err(e) => {
            return write_failure(&args.out, format!("Failed to load employee skills: {}", e))
        }
    };

    let team_size = match args.team_size.or(analysis.number_of_employees) {
        Some(size) if size >= 1 => size,
        Some(_) => {
            eprintln!("Error: team size must be at least 1");
            std::process::exit(2);
        }
        None => {
            eprintln!(
                "Error: no --team-size given and {} does not record a requested size",
                args.project.display()
            );
            std::process::exit(2);
        }
    };

    let config = BuilderConfig::new(team_size)
        .with_min_score(args.min_score)
        .with_similarity_threshold(args.similarity)
        .with_embed_timeout_ms(args.embed_timeout_ms);

    tracing::info!(
        project = %args.project.display(),
        roster = %args.roster.display(),
        team_size,
        min_score = config.min_score_threshold,
        "Starting team assignment"
    );

    let builder = TeamBuilder::new(
        config,
        SkillTaxonomy::builtin(),
        Arc::new(HashEmbedding::new()),
    );
    let composition = match builder.build(&analysis, &roster).await {
        Ok(composition) => composition,
        Err(e) => return write_failure(&args.out, format!("Failed to build team: {}", e)),
    };

    composition.save(&args.out)?;
    tracing::info!(out = %args.out.display(), "Team composition saved");

    match args.output {
        OutputFormat::Json => {
            println!("{}", composition.to_pretty_json()?);
        }
        OutputFormat::Table => {
            println!("Team composition");
            println!("{}", "=".repeat(40));
            println!("{}", composition.rationale);
            println!();
            if composition.team.is_empty() {
                println!("No team members assigned.");
            } else {
                println!(
                    "{:<28} {:<26} {:<11} {:<7} MISSING",
                    "MEMBER", "TASK", "DAYS", "SCORE"
                );
                println!("{}", "-".repeat(88));
                for member in &composition.team {
                    for assignment in &member.assignments {
                        println!(
                            "{:<28} {:<26} {:<11} {:<7.2} {}",
                            member.employee_identifier,
                            assignment.task_name,
                            format!("{}-{}", assignment.start_day, assignment.end_day),
                            assignment.score,
                            assignment.missing_skills.join(", ")
                        );
                    }
                }
            }
            if !composition.unassigned_tasks.is_empty() {
                println!();
                println!("Unassigned: {}", composition.unassigned_tasks.join(", "));
            }
        }
    }

    Ok(())
}

// =============================================================================
// Query Command Handlers
// =============================================================================

fn handle_skill(name: &str, output: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let taxonomy = SkillTaxonomy::builtin();
    let relatives = match taxonomy.relatives(name) {
        Some(relatives) => relatives,
        None => {
            eprintln!("Skill not found in taxonomy: {}", name);
            std::process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let out = SkillOutput {
                skill: name.to_lowercase(),
                parents: relatives.parents.into_iter().collect(),
                children: relatives.children.into_iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("Skill: {}", name.to_lowercase());
            let parents: Vec<String> = relatives.parents.into_iter().collect();
            let children: Vec<String> = relatives.children.into_iter().collect();
            if parents.is_empty() {
                println!("Parents:  (none)");
            } else {
                println!("Parents:  {}", parents.join(", "));
            }
            if children.is_empty() {
                println!("Children: (none)");
            } else {
                println!("Children: {}", children.join(", "));
            }
        }
    }
    Ok(())
}

fn handle_gaps(team: &Path, output: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let composition = TeamComposition::load(team)?;
    let gaps = composition.skill_gaps();

    match output {
        OutputFormat::Json => {
            let out = GapsOutput {
                members: gaps
                    .into_iter()
                    .map(|(employee_identifier, missing)| MemberGapsOutput {
                        employee_identifier,
                        missing_skills: missing.into_iter().collect(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            if gaps.is_empty() {
                println!("No skill gaps.");
            } else {
                println!("{:<38} MISSING SKILLS", "MEMBER");
                println!("{}", "-".repeat(78));
                for (identifier, missing) in gaps {
                    let missing: Vec<String> = missing.into_iter().collect();
                    println!("{:<38} {}", identifier, missing.join(", "));
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Commands::Assign(assign_args) => {
            run_assign(assign_args).await?;
        }
        Commands::Skill { name, output } => {
            handle_skill(&name, &output)?;
        }
        Commands::Gaps { team, output } => {
            handle_gaps(&team, &output)?;
        }
    }

    Ok(())
}
