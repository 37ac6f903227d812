//! Shared output helpers for commands

use graphstep_core::error::Result;
use serde_json::json;

pub use crate::output_by_format_result;

/// Print a JSON status message with extra fields
pub fn print_json_status(status: &str, extra_fields: &[(&str, serde_json::Value)]) -> Result<()> {
    let mut output = json!({ "status": status });

    if let Some(obj) = output.as_object_mut() {
        for (key, value) in extra_fields {
            obj.insert(key.to_string(), value.clone());
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Render a distance, using the infinity sign for unreachable nodes
pub fn format_distance(distance: f64) -> String {
    if distance.is_finite() {
        format_weight(distance)
    } else {
        "∞".to_string()
    }
}

/// Render a weight without a trailing `.0` for whole numbers
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 && weight.abs() < 1e15 {
        format!("{}", weight as i64)
    } else {
        format!("{}", weight)
    }
}

/// JSON number for a distance; `null` for infinity
pub fn distance_json(distance: f64) -> serde_json::Value {
    if distance.is_finite() {
        json!(distance)
    } else {
        serde_json::Value::Null
    }
}
