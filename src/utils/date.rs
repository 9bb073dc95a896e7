use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Canonical on-disk format. Lexicographic order of this format equals
/// chronological order, which `ORDER BY datetime` relies on.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a user/database datetime. Accepts `T` or space separator,
/// with or without seconds.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Lenient parse for values already stored by older tools: everything
/// [`parse_datetime`] takes, plus fractional seconds, RFC 3339 with an
/// offset (the wall-clock time is kept, the offset dropped) and bare dates
/// (midnight). Sub-second precision is dropped.
pub fn parse_stored_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    parse_datetime(s)
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        })
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
        .and_then(|dt| dt.with_nanosecond(0))
}

pub fn to_db_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FORMAT).to_string()
}

/// Half-open `[start, end)` bounds of a calendar day, in DB format.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = date
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MAX);
    (to_db_datetime(&start), to_db_datetime(&end))
}
