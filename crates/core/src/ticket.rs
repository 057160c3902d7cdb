//! Support-ticket category/status sets and escalation bounds.

use crate::error::CoreError;

pub const STATUS_OPEN: &str = "open";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";
pub const STATUS_ON_HOLD: &str = "on_hold";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
    STATUS_ON_HOLD,
];

pub const VALID_CATEGORIES: &[&str] = &[
    "account",
    "payment",
    "listing",
    "advertising",
    "technical",
    "other",
];

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// Escalation level bounds.
pub const MIN_ESCALATION: i32 = 1;
pub const MAX_ESCALATION: i32 = 5;

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid ticket category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        )))
    }
}

pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {}",
            VALID_PRIORITIES.join(", ")
        )))
    }
}

pub fn validate_escalation_level(level: i32) -> Result<(), CoreError> {
    if (MIN_ESCALATION..=MAX_ESCALATION).contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Escalation level must be between {MIN_ESCALATION} and {MAX_ESCALATION}, got {level}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_validation() {
        assert!(validate_status("open").is_ok());
        assert!(validate_status("on_hold").is_ok());
        assert!(validate_status("reopened").is_err());
    }

    #[test]
    fn category_validation() {
        assert!(validate_category("advertising").is_ok());
        assert!(validate_category("billing").is_err());
    }

    #[test]
    fn priority_validation() {
        assert!(validate_priority("urgent").is_ok());
        assert!(validate_priority("critical").is_err());
    }

    #[test]
    fn escalation_bounds() {
        assert!(validate_escalation_level(1).is_ok());
        assert!(validate_escalation_level(5).is_ok());
        assert!(validate_escalation_level(0).is_err());
        assert!(validate_escalation_level(6).is_err());
    }
}
