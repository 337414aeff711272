//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Action rejected: {0}")]
    Action(#[from] crate::actions::ActionError),

    #[error("Invalid config: {0}")]
    Config(String),
}
