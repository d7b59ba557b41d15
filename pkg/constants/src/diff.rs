//! External diff program constants.

/// Environment variable selecting the external diff command, e.g. `colordiff -N -u`.
pub const EXTERNAL_DIFF_ENV: &str = "KUBECTL_EXTERNAL_DIFF";

/// Diff program used when the environment variable is unset.
pub const DEFAULT_DIFF_PROGRAM: &str = "diff";

/// Arguments for the default program: unified output, absent files treated as empty.
pub const DEFAULT_DIFF_ARGS: &[&str] = &["-u", "-N"];

/// Exit status of a diff program that found no differences.
pub const EXIT_NO_DIFF: i32 = 0;

/// Exit status of a diff program that found differences (POSIX convention).
pub const EXIT_DIFF_FOUND: i32 = 1;
