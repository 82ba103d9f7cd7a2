//! Conversion of row values to Bolt parameters.

use builder_core::FlatRow;
use graph_store::StoreError;
use neo4rs::{BoltNull, BoltType};
use serde_json::Value;
use std::collections::HashMap;

/// Convert a JSON value to a Bolt value.
///
/// Integers that do not fit in an `i64` are rejected rather than silently
/// widened to floats.
pub fn json_to_bolt(name: &str, value: &Value) -> Result<BoltType, StoreError> {
    let bolt = match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                BoltType::from(i)
            } else if n.is_f64() {
                match n.as_f64() {
                    Some(f) => BoltType::from(f),
                    None => return Err(invalid(name, format!("unrepresentable number {n}"))),
                }
            } else {
                return Err(invalid(name, format!("integer {n} overflows i64")));
            }
        }
        Value::String(s) => BoltType::from(s.as_str()),
        Value::Array(items) => {
            let list = items
                .iter()
                .map(|item| json_to_bolt(name, item))
                .collect::<Result<Vec<BoltType>, _>>()?;
            BoltType::from(list)
        }
        Value::Object(fields) => {
            let map = fields
                .iter()
                .map(|(key, item)| Ok((key.clone(), json_to_bolt(key, item)?)))
                .collect::<Result<HashMap<String, BoltType>, StoreError>>()?;
            BoltType::from(map)
        }
    };
    Ok(bolt)
}

/// Convert a flattened row to a Bolt map.
pub fn row_to_bolt(row: &FlatRow) -> Result<HashMap<String, BoltType>, StoreError> {
    row.iter()
        .map(|(name, value)| Ok((name.clone(), json_to_bolt(name, value)?)))
        .collect()
}

fn invalid(name: &str, reason: String) -> StoreError {
    StoreError::InvalidParameter {
        name: name.to_string(),
        reason,
    }
}
