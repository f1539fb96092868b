use thiserror::Error;

use crate::embedding::EmbedError;

#[derive(Error, Debug)]
pub enum CrewmatchError {
    #[error("Invalid project analysis: {0}")]
    InvalidProject(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Embedding failed for task '{task}' against candidate '{candidate}': {source}")]
    Embedding {
        task: String,
        candidate: String,
        #[source]
        source: EmbedError,
    },

    #[error("Pipeline stage '{stage}' failed: {reason}")]
    Stage { stage: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrewmatchError>;
