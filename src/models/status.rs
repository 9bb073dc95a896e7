use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle tag of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Confirmed,
    Cancelled,
    Updated,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Confirmed, Status::Cancelled, Status::Updated];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Confirmed => "confirmed",
            Status::Cancelled => "cancelled",
            Status::Updated => "updated",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Status::Confirmed),
            "cancelled" => Some(Status::Cancelled),
            "updated" => Some(Status::Updated),
            _ => None,
        }
    }
}

impl FromStr for Status {
    type Err = AppError;

    /// Lenient parser for user input (case-insensitive, accepts "canceled").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "canceled" => Ok(Status::Cancelled),
            other => Status::from_db_str(other).ok_or_else(|| AppError::InvalidStatus(s.into())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_input() {
        assert_eq!("Cancelled".parse::<Status>().unwrap(), Status::Cancelled);
        assert_eq!("canceled".parse::<Status>().unwrap(), Status::Cancelled);
        assert_eq!(" updated ".parse::<Status>().unwrap(), Status::Updated);
        assert!(matches!(
            "pending".parse::<Status>(),
            Err(AppError::InvalidStatus(s)) if s == "pending"
        ));
    }

    #[test]
    fn default_is_confirmed() {
        assert_eq!(Status::default(), Status::Confirmed);
        assert_eq!(Status::default().to_string(), "confirmed");
    }
}
