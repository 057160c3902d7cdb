//! Ad-campaign status machines and budget arithmetic.

use crate::error::CoreError;

// Lifecycle status.
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_PAUSED: &str = "paused";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_REJECTED: &str = "rejected";

pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_PENDING,
    STATUS_ACTIVE,
    STATUS_PAUSED,
    STATUS_COMPLETED,
    STATUS_REJECTED,
];

// Review outcome, set by staff.
pub const APPROVAL_PENDING: &str = "pending";
pub const APPROVAL_APPROVED: &str = "approved";
pub const APPROVAL_REJECTED: &str = "rejected";

pub const VALID_APPROVAL_STATUSES: &[&str] =
    &[APPROVAL_PENDING, APPROVAL_APPROVED, APPROVAL_REJECTED];

/// Valid bid strategies.
pub const VALID_BID_STRATEGIES: &[&str] = &["cpm", "cpc", "cpa", "flat"];

/// Remaining budget, derived at write time from budget and spend.
///
/// Recomputed on every campaign write so the stored value always equals
/// `budget - total_spent` immediately after a save.
pub fn remaining_budget(budget: f64, total_spent: f64) -> f64 {
    budget - total_spent
}

/// Validate a campaign status value.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid campaign status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate a bid strategy value.
pub fn validate_bid_strategy(strategy: &str) -> Result<(), CoreError> {
    if VALID_BID_STRATEGIES.contains(&strategy) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid bid strategy '{strategy}'. Must be one of: {}",
            VALID_BID_STRATEGIES.join(", ")
        )))
    }
}

/// Validate campaign money fields: budget and bid amount must be finite and
/// non-negative.
pub fn validate_budget(budget: f64, bid_amount: f64) -> Result<(), CoreError> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(CoreError::Validation(format!(
            "Budget must be a non-negative number, got {budget}"
        )));
    }
    if !bid_amount.is_finite() || bid_amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "Bid amount must be a non-negative number, got {bid_amount}"
        )));
    }
    Ok(())
}

/// Whether a status transition is allowed.
///
/// Draft campaigns go to review; reviewed campaigns run, pause, complete, or
/// are rejected. Completed and rejected are terminal.
pub fn can_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (STATUS_DRAFT, STATUS_PENDING)
            | (STATUS_PENDING, STATUS_ACTIVE)
            | (STATUS_PENDING, STATUS_REJECTED)
            | (STATUS_ACTIVE, STATUS_PAUSED)
            | (STATUS_ACTIVE, STATUS_COMPLETED)
            | (STATUS_PAUSED, STATUS_ACTIVE)
            | (STATUS_PAUSED, STATUS_COMPLETED)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_budget_is_budget_minus_spend() {
        assert_eq!(remaining_budget(1000.0, 250.0), 750.0);
        assert_eq!(remaining_budget(1000.0, 0.0), 1000.0);
        // Overspend surfaces as a negative remainder rather than clamping.
        assert_eq!(remaining_budget(100.0, 150.0), -50.0);
    }

    #[test]
    fn status_validation() {
        assert!(validate_status("draft").is_ok());
        assert!(validate_status("paused").is_ok());
        assert!(validate_status("archived").is_err());
    }

    #[test]
    fn bid_strategy_validation() {
        assert!(validate_bid_strategy("cpm").is_ok());
        assert!(validate_bid_strategy("flat").is_ok());
        assert!(validate_bid_strategy("cpv").is_err());
    }

    #[test]
    fn budget_validation() {
        assert!(validate_budget(500.0, 2.5).is_ok());
        assert!(validate_budget(-1.0, 2.5).is_err());
        assert!(validate_budget(500.0, f64::NAN).is_err());
    }

    #[test]
    fn lifecycle_transitions() {
        assert!(can_transition(STATUS_DRAFT, STATUS_PENDING));
        assert!(can_transition(STATUS_PENDING, STATUS_ACTIVE));
        assert!(can_transition(STATUS_ACTIVE, STATUS_PAUSED));
        assert!(can_transition(STATUS_PAUSED, STATUS_ACTIVE));

        // Terminal states.
        assert!(!can_transition(STATUS_COMPLETED, STATUS_ACTIVE));
        assert!(!can_transition(STATUS_REJECTED, STATUS_PENDING));
        // No skipping review.
        assert!(!can_transition(STATUS_DRAFT, STATUS_ACTIVE));
    }
}
