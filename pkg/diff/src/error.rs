use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The external diff program failed.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },
    /// Exited with something other than "no diff" or "diff found"
    #[error("{program} exited with {}", exit_description(.code))]
    Exit { program: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Failure while comparing two revisions.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("error creating temporary directory for {name}: {source}")]
    Setup { name: String, source: io::Error },
    #[error("error printing revision to {path}: {error:#}")]
    Print { path: PathBuf, error: anyhow::Error },
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error("error removing temporary directory {path}: {source}")]
    Cleanup { path: PathBuf, source: io::Error },
    #[error("{} errors occurred: {}", .0.len(), join_errors(.0))]
    Combined(Vec<DiffError>),
}

fn join_errors(errors: &[DiffError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DiffError {
    /// Merge several errors into one, flattening nested combinations.
    /// Returns `None` when there is nothing to report.
    pub fn combine(errors: impl IntoIterator<Item = DiffError>) -> Option<DiffError> {
        let mut flat = Vec::new();
        for err in errors {
            match err {
                DiffError::Combined(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(DiffError::Combined(flat)),
        }
    }
}
