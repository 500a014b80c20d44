//! Field checks applied to a user candidate before it reaches storage.
//!
//! The candidate is taken as raw JSON because its field types are not known
//! up front: `{"name": 42}` must be reported as a type error, not a parse
//! failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::user::NewUser;

// ECMAScript whitespace and line terminators plus `@`. Narrower than Unicode
// `\s`: U+0085 is allowed, U+FEFF is not.
const EMAIL_SEGMENT: &str = r"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@]+";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!("^{EMAIL_SEGMENT}@{EMAIL_SEGMENT}\\.{EMAIL_SEGMENT}$");
    Regex::new(&pattern).expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and email are required")]
    MissingField,
    #[error("Invalid input types")]
    InvalidType,
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Checks `name` and `email` on `candidate` and returns them as a [`NewUser`].
///
/// Presence is checked for both fields first, then type, then the email
/// shape.
pub fn validate_candidate(candidate: &Value) -> Result<NewUser, ValidationError> {
    let name = candidate.get("name");
    let email = candidate.get("email");

    if !is_present(name) || !is_present(email) {
        return Err(ValidationError::MissingField);
    }

    let (Some(Value::String(name)), Some(Value::String(email))) = (name, email) else {
        return Err(ValidationError::InvalidType);
    };

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidFormat);
    }

    Ok(NewUser::new(name.as_str(), email.as_str()))
}

/// Presence-only check used by the workflow relay.
pub fn has_name_and_email(candidate: &Value) -> bool {
    is_present(candidate.get("name")) && is_present(candidate.get("email"))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

// Absent, null, false, zero and the empty string all count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
