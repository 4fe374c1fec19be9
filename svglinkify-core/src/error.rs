use crate::parser::ParseError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    Parse(#[from] ParseError),

    #[error("Rendering engine not found at '{}': {source}", path.display())]
    EngineNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rendering engine failed while {action} ({status}): {stderr}")]
    EngineFailed {
        action: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Invalid rendering engine output: {0}")]
    InvalidEngineOutput(String),

    #[error("Failed to replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type Result<T> = std::result::Result<T, LinkifyError>;
