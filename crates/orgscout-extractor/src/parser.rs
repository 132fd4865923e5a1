//! Parse LLM output into an organization record

use crate::error::ExtractorError;
use orgscout_domain::ExtractedRecord;
use serde_json::{Map, Value};

/// Parse the LLM JSON response into a record
///
/// Missing fields become empty strings and an unusable `age` becomes 0. The
/// pattern defaults (placeholder name, industry bucket) are not applied here.
pub fn parse_llm_response(response: &str) -> Result<ExtractedRecord, ExtractorError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    // An empty completion counts as an empty object
    let json: Value = if json_str.trim().is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(&json_str)?
    };

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    Ok(ExtractedRecord {
        name: text_field(obj, "name"),
        location: text_field(obj, "location"),
        owners: text_field(obj, "owners"),
        activities: text_field(obj, "activities"),
        age: obj.get("age").map(coerce_age).unwrap_or(0),
        website: text_field(obj, "website"),
        industry: text_field(obj, "industry"),
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line, and the closing one if present
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(coerce_text).unwrap_or_default()
}

/// Render a JSON value as field text
///
/// Arrays of scalars are joined with ", " (models like to list owners).
fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(coerce_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

/// Read an age the way a lenient integer parse would
///
/// Numbers are truncated; strings use their leading integer ("25 years" is 25).
/// Anything negative, non-numeric or too large is 0.
fn coerce_age(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                u32::try_from(i).unwrap_or(0)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f.trunc() as u32)
                    .unwrap_or(0)
            }
        }
        Value::String(s) => leading_integer(s),
        _ => 0,
    }
}

fn leading_integer(s: &str) -> u32 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if negative || end == 0 {
        return 0;
    }
    digits[..end].parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "name": "Acme Corp",
            "location": "Boston, MA",
            "owners": "Jane Smith",
            "activities": "Widgets",
            "age": 12,
            "website": "https://acme.example",
            "industry": "Manufacturing"
        }"#;

        let record = parse_llm_response(response).unwrap();
        assert_eq!(record.name, "Acme Corp");
        assert_eq!(record.location, "Boston, MA");
        assert_eq!(record.owners, "Jane Smith");
        assert_eq!(record.activities, "Widgets");
        assert_eq!(record.age, 12);
        assert_eq!(record.website, "https://acme.example");
        assert_eq!(record.industry, "Manufacturing");
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"name\": \"Bob's Bakery\", \"age\": \"7\"}\n```";

        let record = parse_llm_response(response).unwrap();
        assert_eq!(record.name, "Bob's Bakery");
        assert_eq!(record.age, 7);
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let record = parse_llm_response(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.location, "");
        assert_eq!(record.industry, "");
        assert_eq!(record.age, 0);
    }

    #[test]
    fn test_empty_response_is_empty_record() {
        let record = parse_llm_response("  ").unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.age, 0);
    }

    #[test]
    fn test_owner_array_is_joined() {
        let record =
            parse_llm_response(r#"{"owners": ["Jane Smith", "Bob Lee"], "location": null}"#)
                .unwrap();
        assert_eq!(record.owners, "Jane Smith, Bob Lee");
        assert_eq!(record.location, "");
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_llm_response("This is not JSON");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_parse_json_not_object() {
        let result = parse_llm_response(r#"[{"name": "Acme"}]"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_coerce_age() {
        assert_eq!(coerce_age(&serde_json::json!(25.9)), 25);
        assert_eq!(coerce_age(&serde_json::json!(-3)), 0);
        assert_eq!(coerce_age(&serde_json::json!("  30 years")), 30);
        assert_eq!(coerce_age(&serde_json::json!("+4")), 4);
        assert_eq!(coerce_age(&serde_json::json!("-4")), 0);
        assert_eq!(coerce_age(&serde_json::json!("about 5")), 0);
        assert_eq!(coerce_age(&serde_json::json!(null)), 0);
        assert_eq!(coerce_age(&serde_json::json!(true)), 0);
        assert_eq!(coerce_age(&serde_json::json!(1e12)), 0);
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        let result = extract_json(json).unwrap();
        assert_eq!(result, json);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        let result = extract_json(response).unwrap();
        assert_eq!(result, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n{\"key\": \"value\"}";
        let result = extract_json(response).unwrap();
        assert_eq!(result, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_empty_fence() {
        assert!(extract_json("```").is_err());
    }
}
