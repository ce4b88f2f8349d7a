//! Stable exit codes for updater CLI commands.

/// Command succeeded (`apply` updated at least one record, `check` found unique ids).
pub const OK: i32 = 0;
/// Command failed due to invalid input, config, duplicate ids or other errors.
pub const INVALID: i32 = 1;
/// `updater apply` found no record with the requested id; output equals input.
pub const NO_MATCH: i32 = 2;
