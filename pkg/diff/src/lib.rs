//! Comparison of two revisions with an external diff program.
//!
//! Each side is printed to a same-named file in its own temporary directory,
//! then the program compares the two directories. Temporary directories are
//! removed on every path out of [`DiffOrchestrator::compare`].

pub mod compare;
pub mod error;
pub mod files;
pub mod program;

pub use compare::{DiffOrchestrator, dir_name, file_name};
pub use error::{DiffError, ProgramError};
pub use files::{Files, Version};
pub use program::{DiffStatus, ExternalProgram, Program};
