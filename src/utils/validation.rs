//! Centralized validation of caller-supplied symptom lists.
//!
//! These are resource limits for the HTTP surface, not a vocabulary check:
//! any token within the limits reaches the scorer verbatim.

use thiserror::Error;

/// Maximum number of symptoms accepted in a single request (DOS protection)
pub const MAX_SYMPTOMS: usize = 256;

/// Maximum length of a single symptom token in bytes
pub const MAX_SYMPTOM_LENGTH: usize = 128;

/// Maximum request body size in bytes
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many symptoms: {0} exceeds the maximum of {MAX_SYMPTOMS}")]
    TooManySymptoms(usize),

    #[error("Symptom token exceeds {MAX_SYMPTOM_LENGTH} bytes")]
    SymptomTooLong,
}

/// Check a symptom list against the request limits.
///
/// # Examples
///
/// ```
/// use symptom_solver::utils::validation::validate_symptoms;
///
/// assert!(validate_symptoms(&["itching".to_string()]).is_ok());
/// assert!(validate_symptoms(&["x".repeat(1000)]).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::TooManySymptoms` or `ValidationError::SymptomTooLong`.
pub fn validate_symptoms(symptoms: &[String]) -> Result<(), ValidationError> {
    if symptoms.len() > MAX_SYMPTOMS {
        return Err(ValidationError::TooManySymptoms(symptoms.len()));
    }
    if symptoms.iter().any(|s| s.len() > MAX_SYMPTOM_LENGTH) {
        return Err(ValidationError::SymptomTooLong);
    }
    Ok(())
}
