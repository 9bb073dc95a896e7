//! Formatting utilities used for CLI and export outputs.

use crate::utils::colors::{GREY, RESET};
use chrono::NaiveDateTime;

/// Optional text field as shown in tables: value or a grey `--`.
pub fn opt_field(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}

/// Datetime as shown to humans, e.g. `2024-01-03 09:00`.
pub fn human_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Party size with a noun, e.g. `1 guest`, `4 guests`.
pub fn guests(n: u32) -> String {
    if n == 1 {
        "1 guest".to_string()
    } else {
        format!("{n} guests")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_party_sizes() {
        assert_eq!(guests(1), "1 guest");
        assert_eq!(guests(6), "6 guests");
    }

    #[test]
    fn blank_optional_field_is_dimmed() {
        assert_eq!(opt_field(Some("T4")), "T4");
        assert!(opt_field(Some("  ")).contains("--"));
        assert!(opt_field(None).starts_with(GREY));
    }
}
