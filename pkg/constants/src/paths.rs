//! Filesystem path constants.

/// Permissions of materialized revision files.
pub const MATERIALIZED_FILE_MODE: u32 = 0o600;
