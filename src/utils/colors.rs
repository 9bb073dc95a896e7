//! ANSI color helper utilities for terminal output.
use crate::models::Status;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// confirmed → green, cancelled → red, updated → yellow
pub fn color_for_status(status: Status) -> &'static str {
    match status {
        Status::Confirmed => GREEN,
        Status::Cancelled => RED,
        Status::Updated => YELLOW,
    }
}

pub fn colorize_status(status: Status) -> String {
    format!("{}{}{}", color_for_status(status), status, RESET)
}
