use serde_json::{Map, Value};
use std::cmp::Ordering;

use super::error::FilterError;
use super::filter_where::FilterWhere;

/// Evaluates a where object directly against a document (memory backend).
pub struct FilterMatch;

impl FilterMatch {
    pub fn matches(doc: &Map<String, Value>, where_data: Option<&Value>) -> Result<bool, FilterError> {
        let Some(where_data) = where_data else {
            return Ok(true);
        };

        for condition in FilterWhere::conditions(where_data)? {
            let field = doc.get(&condition.column).unwrap_or(&Value::Null);
            if !values_equal(field, &condition.data) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// jsonb `=`: numbers compare by value, so `1` equals `1.0`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b) == Ordering::Equal,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

/// Total order over JSON values matching PostgreSQL's jsonb ordering:
/// null < string < number < boolean < array < object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::String(_) => 1,
            Value::Number(_) => 2,
            Value::Bool(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| {
                x.iter()
                    .zip(y.iter())
                    .map(|(l, r)| compare_values(l, r))
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            }),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn implicit_equality_and_missing_fields() {
        let d = doc(json!({ "id": "p1", "title": "X", "live": null }));
        assert!(FilterMatch::matches(&d, Some(&json!({ "id": "p1" }))).unwrap());
        assert!(!FilterMatch::matches(&d, Some(&json!({ "id": "p2" }))).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({ "id": { "$eq": "p1" }, "title": "X" }))).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({ "repo": null }))).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({ "live": null }))).unwrap());
        assert!(FilterMatch::matches(&d, None).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({}))).unwrap());
    }

    #[test]
    fn numbers_match_like_jsonb() {
        let d = doc(json!({ "year": 2024, "scores": [1, 2.5], "meta": { "level": 3 } }));
        assert!(FilterMatch::matches(&d, Some(&json!({ "year": 2024.0 }))).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({ "scores": [1.0, 2.5] }))).unwrap());
        assert!(FilterMatch::matches(&d, Some(&json!({ "meta": { "level": 3.0 } }))).unwrap());
        assert!(!FilterMatch::matches(&d, Some(&json!({ "year": "2024" }))).unwrap());
    }

    #[test]
    fn unsupported_operators_are_errors() {
        let d = doc(json!({ "year": 2024 }));
        assert!(matches!(
            FilterMatch::matches(&d, Some(&json!({ "year": { "$gt": 2000 } }))),
            Err(FilterError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn jsonb_like_value_ordering() {
        assert_eq!(compare_values(&json!("2024-06-01"), &json!("2024-01-01")), Ordering::Greater);
        assert_eq!(compare_values(&json!(10), &json!(9.5)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Null, &json!("a")), Ordering::Less);
        assert_eq!(compare_values(&json!("z"), &json!(1)), Ordering::Less);
    }
}
