//! Detect configuration keys missing from an on-disk YAML file.

use crate::errors::{AppError, AppResult};
use serde_yaml::Value;

pub const KNOWN_KEYS: [&str; 4] = ["database", "id_prefix", "busy_timeout_ms", "log_level"];

/// Known keys absent from `content`, in declaration order.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("invalid configuration: {e}")))?;

    let Some(map) = yaml.as_mapping() else {
        return Ok(KNOWN_KEYS.to_vec());
    };

    Ok(KNOWN_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Keys present in `content` that this version does not understand.
pub fn unknown_keys(content: &str) -> AppResult<Vec<String>> {
    let yaml: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("invalid configuration: {e}")))?;

    Ok(yaml
        .as_mapping()
        .map(|map| {
            map.keys()
                .filter_map(|k| k.as_str())
                .filter(|k| !KNOWN_KEYS.contains(k))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}
