//! User role constants and staff predicate.

pub const ROLE_BUYER: &str = "buyer";
pub const ROLE_SELLER: &str = "seller";
pub const ROLE_AGENT: &str = "agent";
pub const ROLE_LANDLORD: &str = "landlord";
pub const ROLE_TENANT: &str = "tenant";
pub const ROLE_BROKER: &str = "broker";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[
    ROLE_BUYER,
    ROLE_SELLER,
    ROLE_AGENT,
    ROLE_LANDLORD,
    ROLE_TENANT,
    ROLE_BROKER,
    ROLE_MODERATOR,
    ROLE_ADMIN,
];

/// Roles with administrative access to other users' records and to
/// platform-level content (announcements, legal documents, system config).
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MODERATOR
}

/// Whether a role value is one of the known roles.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_moderator_are_staff() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_MODERATOR));
        assert!(!is_staff(ROLE_BUYER));
        assert!(!is_staff(ROLE_AGENT));
    }

    #[test]
    fn role_validity() {
        assert!(is_valid_role("buyer"));
        assert!(is_valid_role("broker"));
        assert!(!is_valid_role("superuser"));
        assert!(!is_valid_role(""));
    }
}
