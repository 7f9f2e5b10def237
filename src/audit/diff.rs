//! Field-level diffs for audit entries

use serde_json::Value;

/// Bookkeeping fields left out of diff summaries
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize the top-level fields that differ between two JSON objects
///
/// Returns `None` when nothing a user would care about changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"amount": 15000, "buyer": "party_a", "description": "Weekly shop"});
        let after = json!({"amount": 16000, "buyer": "joint", "description": "Weekly shop"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("amount: 15000 -> 16000"));
        assert!(diff.contains("buyer: \"party_a\" -> \"joint\""));
        assert!(!diff.contains("description"));
    }

    #[test]
    fn test_timestamp_only_change_is_no_diff() {
        let before = json!({"amount": 100, "updated_at": "2024-03-01T00:00:00Z"});
        let after = json!({"amount": 100, "updated_at": "2024-03-02T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let diff = generate_diff(&json!({"location": "Lidl"}), &json!({"emoji": "🛒"})).unwrap();
        assert!(diff.contains("location: \"Lidl\" -> (removed)"));
        assert!(diff.contains("emoji: (added) -> \"🛒\""));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(80);
        let diff = generate_diff(&json!({"d": ""}), &json!({ "d": long })).unwrap();
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)), Some("1 -> 2".to_string()));
        assert!(generate_diff(&json!(true), &json!(true)).is_none());
    }
}
