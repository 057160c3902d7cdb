//! User account validation and status sets.

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_BANNED: &str = "banned";
pub const STATUS_DELETED: &str = "deleted";

/// All valid account status values. `deleted` is the soft-delete flag; rows
/// are never hard-deleted.
pub const VALID_ACCOUNT_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ACTIVE,
    STATUS_SUSPENDED,
    STATUS_BANNED,
    STATUS_DELETED,
];

/// Maximum default search radius a user may persist, in kilometers.
pub const MAX_SEARCH_RADIUS_KM: f64 = 1000.0;

/// Minimal structural email check: exactly one `@` with non-empty local and
/// domain parts, and a dot in the domain. Deliverability is the mail
/// relay's problem.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid email address '{email}'"
        )))
    }
}

pub fn validate_account_status(status: &str) -> Result<(), CoreError> {
    if VALID_ACCOUNT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid account status '{status}'. Must be one of: {}",
            VALID_ACCOUNT_STATUSES.join(", ")
        )))
    }
}

/// Validate a persisted default search radius.
pub fn validate_search_radius(radius_km: f64) -> Result<(), CoreError> {
    if !radius_km.is_finite() || radius_km <= 0.0 || radius_km > MAX_SEARCH_RADIUS_KM {
        return Err(CoreError::Validation(format!(
            "Search radius must be between 0 and {MAX_SEARCH_RADIUS_KM} km, got {radius_km}"
        )));
    }
    Ok(())
}

/// Validate optional price-preference bounds: each non-negative, and min <= max
/// when both are present.
pub fn validate_price_bounds(min: Option<f64>, max: Option<f64>) -> Result<(), CoreError> {
    for (name, value) in [("min_price", min), ("max_price", max)] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Validation(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CoreError::Validation(format!(
                "min_price ({lo}) must not exceed max_price ({hi})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(validate_email("buyer@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co").is_ok());
    }

    #[test]
    fn email_validation_rejects_malformed() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user name@example.com").is_err());
    }

    #[test]
    fn account_status_validation() {
        assert!(validate_account_status("active").is_ok());
        assert!(validate_account_status("deleted").is_ok());
        assert!(validate_account_status("archived").is_err());
    }

    #[test]
    fn search_radius_bounds() {
        assert!(validate_search_radius(5.0).is_ok());
        assert!(validate_search_radius(0.0).is_err());
        assert!(validate_search_radius(1000.1).is_err());
        assert!(validate_search_radius(f64::NAN).is_err());
    }

    #[test]
    fn price_bounds_ordering() {
        assert!(validate_price_bounds(Some(1000.0), Some(2000.0)).is_ok());
        assert!(validate_price_bounds(None, Some(2000.0)).is_ok());
        assert!(validate_price_bounds(Some(3000.0), Some(2000.0)).is_err());
        assert!(validate_price_bounds(Some(-1.0), None).is_err());
    }
}
