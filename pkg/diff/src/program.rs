use async_trait::async_trait;
use pkg_constants::diff::{
    DEFAULT_DIFF_ARGS, DEFAULT_DIFF_PROGRAM, EXIT_DIFF_FOUND, EXIT_NO_DIFF, EXTERNAL_DIFF_ENV,
};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::ProgramError;

/// Outcome of a successful comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Identical,
    Different,
}

impl DiffStatus {
    /// Interpret a diff program's exit code. Anything but 0 and 1 is a failure.
    pub fn from_exit_code(code: Option<i32>) -> Option<Self> {
        match code {
            Some(EXIT_NO_DIFF) => Some(DiffStatus::Identical),
            Some(EXIT_DIFF_FOUND) => Some(DiffStatus::Different),
            _ => None,
        }
    }
}

/// A program comparing two directories.
#[async_trait]
pub trait Program: Send + Sync {
    async fn run(&self, from: &Path, to: &Path) -> Result<DiffStatus, ProgramError>;
}

/// A diff executable, writing its output to the inherited stdout and stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProgram {
    command: String,
    args: Vec<String>,
}

impl Default for ExternalProgram {
    fn default() -> Self {
        Self::new(
            DEFAULT_DIFF_PROGRAM,
            DEFAULT_DIFF_ARGS.iter().map(|a| a.to_string()).collect(),
        )
    }
}

impl ExternalProgram {
    pub fn new(command: &str, args: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            args,
        }
    }

    /// The program selected by `KUBECTL_EXTERNAL_DIFF`, or `diff -u -N`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(EXTERNAL_DIFF_ENV).ok().as_deref())
    }

    /// Parse a `KUBECTL_EXTERNAL_DIFF` value.
    ///
    /// The value is split on single spaces. The first field is the command;
    /// further fields are kept only if they consist of ASCII letters, digits,
    /// `-` and `=`, so arbitrary shell syntax cannot sneak in.
    pub fn from_env_value(value: Option<&str>) -> Self {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Self::default();
        };

        let mut fields = value.split(' ');
        let command = fields.next().unwrap_or(DEFAULT_DIFF_PROGRAM);
        let args = fields
            .filter(|f| is_safe_arg(f))
            .map(str::to_string)
            .collect();
        Self::new(command, args)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn is_safe_arg(arg: &str) -> bool {
    !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '=')
}

#[async_trait]
impl Program for ExternalProgram {
    async fn run(&self, from: &Path, to: &Path) -> Result<DiffStatus, ProgramError> {
        debug!(
            "Running {} {:?} {} {}",
            self.command,
            self.args,
            from.display(),
            to.display()
        );

        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(from)
            .arg(to)
            .status()
            .await
            .map_err(|source| ProgramError::Spawn {
                program: self.command.clone(),
                source,
            })?;

        DiffStatus::from_exit_code(status.code()).ok_or_else(|| ProgramError::Exit {
            program: self.command.clone(),
            code: status.code(),
        })
    }
}
