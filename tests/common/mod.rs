#![allow(dead_code)]

pub mod command;

/// Fixed commit date so commit IDs are reproducible across runs
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// Same date as rendered by `log`
pub const LOG_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

/// Number of entries `global-log` prints
pub fn count_log_entries(log_output: &str) -> usize {
    log_output.lines().filter(|line| *line == "===").count()
}
