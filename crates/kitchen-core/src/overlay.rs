//! Tree-level overlay merge.
//!
//! Merge semantics:
//! - Objects: deep-merge by key; a key missing from the base is rejected
//! - Arrays: REPLACE (overlay wins entirely)
//! - Scalars: override (overlay wins)
//!
//! Replaced arrays are checked by the typed decode that follows the merge.

use serde_json::Value;
use tracing::debug;

use crate::{Config, OverrideError};

pub(crate) fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Deep-merge `overlay` onto `base`, refusing keys the base does not have.
pub fn strict_merge(base: Value, overlay: Value, path: &str) -> Result<Value, OverrideError> {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let Some(base_value) = base_map.remove(&key) else {
                    return Err(OverrideError::UnknownKey {
                        path: path.to_string(),
                        key,
                    });
                };
                let merged = strict_merge(base_value, overlay_value, &child_path(path, &key))?;
                base_map.insert(key, merged);
            }
            Ok(Value::Object(base_map))
        }

        (_, overlay) => Ok(overlay),
    }
}

/// Merge an overlay onto `config` and decode the result. Does not validate.
pub fn apply_overlay(config: &Config, overlay: Value) -> Result<Config, OverrideError> {
    if !overlay.is_object() {
        return Err(OverrideError::NotAnObject {
            path: String::new(),
        });
    }
    let base = serde_json::to_value(config).map_err(|e| OverrideError::InvalidValue {
        path: String::new(),
        reason: e.to_string(),
    })?;
    let merged = strict_merge(base, overlay, "")?;
    let config: Config = serde_path_to_error::deserialize(merged).map_err(|e| {
        let path = e.path().to_string();
        OverrideError::InvalidValue {
            // an empty path renders as "."
            path: if path == "." { String::new() } else { path },
            reason: e.into_inner().to_string(),
        }
    })?;
    debug!("applied config overlay");
    Ok(config)
}
