use serde_json::Value;
use thiserror::Error;

use crate::core::types::SymptomId;

/// Message reported to callers for any undecodable symptom list
pub const INVALID_SYMPTOMS_FORMAT: &str = "Invalid symptoms format";

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a JSON array of strings")]
    NotAnArray,
}

/// Decode a JSON array of symptom tokens.
///
/// Tokens are returned verbatim and in order; there is no vocabulary check.
///
/// # Errors
///
/// Returns `InputError::InvalidJson` for unparsable text and
/// `InputError::NotAnArray` if the value is not an array of strings.
pub fn parse_symptom_list(text: &str) -> Result<Vec<SymptomId>, InputError> {
    let value: Value = serde_json::from_str(text)?;
    symptoms_from_value(&value)
}

/// Extract symptom tokens from an already decoded JSON value
///
/// # Errors
///
/// Returns `InputError::NotAnArray` if the value is not an array of strings.
pub fn symptoms_from_value(value: &Value) -> Result<Vec<SymptomId>, InputError> {
    let Value::Array(items) = value else {
        return Err(InputError::NotAnArray);
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(InputError::NotAnArray)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symptom_list() {
        let symptoms = parse_symptom_list(r#"["itching", "skin_rash"]"#).unwrap();
        assert_eq!(symptoms, vec!["itching", "skin_rash"]);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_symptom_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_tokens_kept_verbatim() {
        let symptoms = parse_symptom_list(r#"["High_Fever", "not a symptom"]"#).unwrap();
        assert_eq!(symptoms, vec!["High_Fever", "not a symptom"]);
    }

    #[test]
    fn test_rejects_non_arrays_and_non_strings() {
        assert!(matches!(
            parse_symptom_list(r#"{"symptoms": []}"#),
            Err(InputError::NotAnArray)
        ));
        assert!(matches!(
            parse_symptom_list(r#"["itching", 3]"#),
            Err(InputError::NotAnArray)
        ));
        assert!(matches!(
            parse_symptom_list("itching"),
            Err(InputError::InvalidJson(_))
        ));
    }
}
