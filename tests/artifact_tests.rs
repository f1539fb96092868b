//! Tests for the JSON artifacts exchanged between pipeline stages.
//!
//! Verifies that:
//! - Analysis and roster artifacts parse with legacy field aliases and
//!   sensible defaults, and normalize skills on the way in
//! - Shape validation rejects duplicate names, zero durations, window
//!   overflow and dangling dependencies
//! - Team compositions round-trip through disk unchanged


use std::collections::BTreeSet;

use crewmatch::error::CrewmatchError;
use crewmatch::project::ProjectAnalysis;
use crewmatch::roster::Roster;
use crewmatch::team::{Assignment, TeamComposition, TeamMember};
use test_support::{analysis, task};

// ==================== Tests for project analysis parsing ====================

#[test]
fn test_analysis_parses_with_aliases_and_defaults() {
    let data = r#"{
        "provided_skills": ["Python"],
        "tasks": [
            {
                "name": "Design schema",
                "skills": [" SQL ", "sql", "Data Modeling"],
                "start_days_from_kickoff": 0,
                "duration_days": 3
            },
            {
                "name": "Build API",
                "dependencies": ["Design schema"]
            }
        ],
        "number_of_employees": 4
    }"#;

    let analysis = ProjectAnalysis::from_json(data).unwrap();

    assert_eq!(analysis.tasks.len(), 2);
    let first = &analysis.tasks[0];
    let expected: BTreeSet<String> = ["sql", "data modeling"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(first.skills, expected);

    let second = &analysis.tasks[1];
    assert_eq!(second.depends_on, vec!["Design schema".to_string()]);
    assert_eq!(second.start_days_from_kickoff, 0);
    assert_eq!(second.duration_days, 1);
    assert!(second.skills.is_empty());
    assert_eq!(second.description, "");

    assert_eq!(analysis.number_of_employees, Some(4));
}

#[test]
fn test_analysis_task_end_day() {
    let t = task("api", &["python"], 3, 4);
    assert_eq!(t.end_day(), 7);
}

// ==================== Tests for project analysis validation ====================

#[test]
fn test_analysis_rejects_duplicate_task_names() {
    let result = analysis(vec![
        task("api", &["python"], 0, 2),
        task("api", &["sql"], 3, 2),
    ])
    .validate();

    match result {
        Err(CrewmatchError::InvalidProject(msg)) => {
            assert!(msg.contains("duplicate task name 'api'"), "{}", msg)
        }
        other => panic!("Expected invalid project, got {:?}", other),
    }
}

#[test]
fn test_analysis_rejects_zero_duration() {
    let result = analysis(vec![task("api", &["python"], 0, 0)]).validate();
    assert!(matches!(result, Err(CrewmatchError::InvalidProject(_))));
}

#[test]
fn test_analysis_rejects_overflowing_window() {
    let result = analysis(vec![task("api", &["python"], u32::MAX, 2)]).validate();
    assert!(matches!(result, Err(CrewmatchError::InvalidProject(_))));
}

#[test]
fn test_analysis_rejects_unknown_dependency() {
    let mut bad = task("api", &["python"], 0, 2);
    bad.depends_on.push("ghost".to_string());
    let result = analysis(vec![bad]).validate();

    match result {
        Err(CrewmatchError::InvalidProject(msg)) => {
            assert!(msg.contains("unknown task 'ghost'"), "{}", msg)
        }
        other => panic!("Expected invalid project, got {:?}", other),
    }
}

/// Dependencies may point at any task, including later ones: they are
/// metadata, not ordering, so only referential integrity is enforced.
#[test]
fn test_analysis_accepts_forward_dependency() {
    let mut first = task("api", &["python"], 0, 2);
    first.depends_on.push("model".to_string());
    let result = analysis(vec![first, task("model", &["sql"], 3, 2)]).validate();
    assert!(result.is_ok());
}

// ==================== Tests for roster parsing ====================

#[test]
fn test_roster_parses_filename_alias_and_unions_categories() {
    let data = r#"[
        {
            "filename": "resume_ada.pdf",
            "summary": {
                "hard_skills": ["Python", " SQL "],
                "tools": ["sql", "Docker"]
            }
        },
        {
            "identifier": "resume_bob.pdf",
            "summary": {}
        }
    ]"#;

    let roster = Roster::from_json(data).unwrap();
    assert_eq!(roster.len(), 2);

    let candidates = roster.candidates();
    assert_eq!(candidates[0].id, "resume_ada.pdf");
    let expected: BTreeSet<String> = ["python", "sql", "docker"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(candidates[0].skills, expected);

    assert_eq!(candidates[1].id, "resume_bob.pdf");
    assert!(candidates[1].skills.is_empty());
}

#[test]
fn test_roster_rejects_duplicate_identifiers() {
    let data = r#"[
        {"identifier": "resume_ada.pdf", "summary": {}},
        {"identifier": "resume_ada.pdf", "summary": {}}
    ]"#;

    let result = Roster::from_json(data);
    match result {
        Err(CrewmatchError::InvalidRoster(msg)) => {
            assert!(msg.contains("resume_ada.pdf"), "{}", msg)
        }
        other => panic!("Expected invalid roster, got {:?}", other),
    }
}

#[test]
fn test_empty_roster_is_valid() {
    let roster = Roster::from_json("[]").unwrap();
    assert!(roster.is_empty());
    assert!(roster.candidates().is_empty());
}

// ==================== Tests for team composition artifacts ====================

fn sample_composition() -> TeamComposition {
    TeamComposition::new(
        vec![
            TeamMember {
                employee_identifier: "resume_ada.pdf".to_string(),
                assignments: vec![
                    Assignment {
                        task_name: "api".to_string(),
                        start_day: 0,
                        end_day: 5,
                        skills_match: vec!["python".to_string()],
                        missing_skills: vec!["docker".to_string()],
                        score: 0.75,
                    },
                    Assignment {
                        task_name: "deploy".to_string(),
                        start_day: 5,
                        end_day: 7,
                        skills_match: vec!["aws".to_string()],
                        missing_skills: vec!["docker".to_string(), "terraform".to_string()],
                        score: 0.5,
                    },
                ],
            },
            TeamMember {
                employee_identifier: "resume_bob.pdf".to_string(),
                assignments: vec![Assignment {
                    task_name: "frontend".to_string(),
                    start_day: 0,
                    end_day: 4,
                    skills_match: vec!["react".to_string()],
                    missing_skills: vec![],
                    score: 1.0,
                }],
            },
        ],
        vec!["ml pipeline".to_string()],
        2,
    )
}

#[test]
fn test_composition_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("team_composition.json");
    let composition = sample_composition();

    composition.save(&path).unwrap();
    let loaded = TeamComposition::load(&path).unwrap();

    assert_eq!(loaded, composition);
}

#[test]
fn test_composition_accepts_legacy_field_names() {
    let data = r#"{
        "team": [
            {
                "employee_filename": "resume_ada.pdf",
                "assignments": [
                    {
                        "task_name": "api",
                        "start_day": 0,
                        "end_day": 5,
                        "skills_match": ["python"],
                        "missing_skills": [],
                        "semantic_match_score": 0.9
                    }
                ]
            }
        ],
        "unassigned_tasks": [],
        "rationale": "legacy artifact"
    }"#;

    let composition = TeamComposition::from_json(data).unwrap();
    assert_eq!(composition.team[0].employee_identifier, "resume_ada.pdf");
    assert_eq!(composition.team[0].assignments[0].score, 0.9);
}

#[test]
fn test_failure_artifact_has_empty_team() {
    let composition = TeamComposition::failure("Failed to load project analysis: bad JSON");

    let value: serde_json::Value =
        serde_json::from_str(&composition.to_pretty_json().unwrap()).unwrap();
    assert_eq!(value["team"], serde_json::json!([]));
    assert_eq!(value["unassigned_tasks"], serde_json::json!([]));
    assert_eq!(
        value["rationale"],
        "Failed to load project analysis: bad JSON"
    );
}

#[test]
fn test_composition_counts() {
    let composition = sample_composition();
    assert_eq!(composition.member_count(), 2);
    assert_eq!(composition.assignment_count(), 3);
    assert_eq!(
        composition.rationale,
        "Requested a team of 2. Formed a team of 2 based on skill matching \
         and availability. 1 tasks could not be assigned."
    );
}

/// Gaps union missing skills across a member's assignments; members
/// without gaps are left out entirely.
#[test]
fn test_skill_gaps_union_missing_per_member() {
    let gaps = sample_composition().skill_gaps();

    assert_eq!(gaps.len(), 1);
    let ada = &gaps["resume_ada.pdf"];
    let expected: BTreeSet<String> = ["docker", "terraform"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(ada, &expected);
    assert!(!gaps.contains_key("resume_bob.pdf"));
}
