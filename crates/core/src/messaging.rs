//! Message type sets and validation.

use crate::error::CoreError;

pub const TYPE_TEXT: &str = "text";
pub const TYPE_INQUIRY: &str = "inquiry";
pub const TYPE_OFFER: &str = "offer";
pub const TYPE_SYSTEM: &str = "system";
pub const TYPE_ALERT: &str = "alert";
pub const TYPE_AD_RESPONSE: &str = "ad_response";

pub const VALID_MESSAGE_TYPES: &[&str] = &[
    TYPE_TEXT,
    TYPE_INQUIRY,
    TYPE_OFFER,
    TYPE_SYSTEM,
    TYPE_ALERT,
    TYPE_AD_RESPONSE,
];

/// Valid priority values, shared with support tickets.
pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high"];

/// Maximum length for a message subject.
pub const MAX_SUBJECT_LEN: usize = 255;

/// Maximum length for a message body.
pub const MAX_BODY_LEN: usize = 20_000;

/// Validate a message type value.
pub fn validate_message_type(message_type: &str) -> Result<(), CoreError> {
    if VALID_MESSAGE_TYPES.contains(&message_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid message type '{message_type}'. Must be one of: {}",
            VALID_MESSAGE_TYPES.join(", ")
        )))
    }
}

/// Validate a message body: non-empty and within length limit. The subject
/// is optional but bounded.
pub fn validate_message(subject: &str, body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Message body must not be empty".to_string(),
        ));
    }
    if body.len() > MAX_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Message body too long: {} chars (max {MAX_BODY_LEN})",
            body.len()
        )));
    }
    if subject.len() > MAX_SUBJECT_LEN {
        return Err(CoreError::Validation(format!(
            "Subject too long: {} chars (max {MAX_SUBJECT_LEN})",
            subject.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_validation() {
        assert!(validate_message_type("text").is_ok());
        assert!(validate_message_type("ad_response").is_ok());
        assert!(validate_message_type("broadcast").is_err());
    }

    #[test]
    fn body_must_not_be_empty() {
        let err = validate_message("hi", "   ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn body_length_is_bounded() {
        let long = "x".repeat(MAX_BODY_LEN + 1);
        assert!(validate_message("", &long).is_err());
    }

    #[test]
    fn subject_length_is_bounded() {
        let long = "s".repeat(MAX_SUBJECT_LEN + 1);
        assert!(validate_message(&long, "body").is_err());
        assert!(validate_message("", "body").is_ok());
    }
}
