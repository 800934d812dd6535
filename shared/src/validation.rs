//! Validation utilities for the Clinic Cloud Admin Platform
//!
//! These back the `canSave` checks of the admin edit forms: each entity has
//! a conjunction of required-field checks recomputed on every field change.

use crate::models::{Clinic, Location, Organization, Role, Rule, User, UserRole};
use crate::types::is_wildcard;

// ============================================================================
// Entity Save Checks
// ============================================================================

/// Validate a user row before save
pub fn validate_user(user: &User) -> Result<(), &'static str> {
    if user.username.trim().is_empty() {
        return Err("Username is required");
    }
    if user.personal_data.first_name.trim().is_empty() {
        return Err("First name is required");
    }
    if user.personal_data.last_name.trim().is_empty() {
        return Err("Last name is required");
    }
    if let Some(ref email) = user.email {
        validate_email(email)?;
    }
    Ok(())
}

/// Validate a role row before save
pub fn validate_role(role: &Role) -> Result<(), &'static str> {
    if role.name.trim().is_empty() {
        return Err("Role name is required");
    }
    Ok(())
}

/// Validate an ACL rule before save
pub fn validate_rule(rule: &Rule) -> Result<(), &'static str> {
    if rule.subject.trim().is_empty() {
        return Err("Rule subject is required");
    }
    if rule.resource.trim().is_empty() {
        return Err("Rule resource is required");
    }
    if !rule.action.is_valid() {
        return Err("Rule action mask contains unknown bits");
    }
    Ok(())
}

/// Validate an organization row before save
pub fn validate_organization(organization: &Organization) -> Result<(), &'static str> {
    if organization.name.trim().is_empty() {
        return Err("Organization name is required");
    }
    Ok(())
}

/// Validate a clinic row before save
pub fn validate_clinic(clinic: &Clinic) -> Result<(), &'static str> {
    if clinic.name.trim().is_empty() {
        return Err("Clinic name is required");
    }
    if clinic.organization.trim().is_empty() {
        return Err("Clinic must belong to an organization");
    }
    if clinic.location.trim().is_empty() {
        return Err("Clinic must have a location");
    }
    Ok(())
}

/// Validate a location row before save
pub fn validate_location(location: &Location) -> Result<(), &'static str> {
    if location.name.trim().is_empty() {
        return Err("Location name is required");
    }
    Ok(())
}

/// Validate a role assignment before save
pub fn validate_user_role(user_role: &UserRole) -> Result<(), &'static str> {
    if user_role.user_id.trim().is_empty() {
        return Err("Role assignment requires a user");
    }
    if user_role.role_id.trim().is_empty() {
        return Err("Role assignment requires a role");
    }
    validate_domain_id(&user_role.domain_id)
}

// ============================================================================
// Field Checks
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a domain ID: a concrete ID or the wildcard
pub fn validate_domain_id(domain_id: &str) -> Result<(), &'static str> {
    if domain_id.trim().is_empty() {
        return Err("Domain ID is required");
    }
    if is_wildcard(domain_id) || !domain_id.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err("Domain ID must not contain whitespace")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonalData;
    use crate::types::RuleAction;

    fn user(username: &str, first: &str, last: &str) -> User {
        User {
            id: String::new(),
            username: username.into(),
            email: None,
            personal_data: PersonalData {
                first_name: first.into(),
                last_name: last.into(),
                ..PersonalData::default()
            },
        }
    }

    #[test]
    fn user_requires_name_parts() {
        assert!(validate_user(&user("jdoe", "Jane", "Doe")).is_ok());
        assert!(validate_user(&user("jdoe", "", "Doe")).is_err());
        assert!(validate_user(&user("jdoe", "Jane", "  ")).is_err());
        assert!(validate_user(&user("", "Jane", "Doe")).is_err());
    }

    #[test]
    fn user_email_checked_when_present() {
        let mut u = user("jdoe", "Jane", "Doe");
        u.email = Some("jane@clinic.example".into());
        assert!(validate_user(&u).is_ok());
        u.email = Some("not-an-email".into());
        assert!(validate_user(&u).is_err());
    }

    #[test]
    fn rule_rejects_unknown_action_bits() {
        let mut rule = Rule {
            id: String::new(),
            subject: "role-1".into(),
            resource: "/auth/users".into(),
            action: RuleAction::READ,
            deny: false,
        };
        assert!(validate_rule(&rule).is_ok());
        rule.action = RuleAction(8);
        assert!(validate_rule(&rule).is_err());
    }

    #[test]
    fn domain_id_accepts_wildcard() {
        assert!(validate_domain_id("*").is_ok());
        assert!(validate_domain_id("org-17").is_ok());
        assert!(validate_domain_id("").is_err());
        assert!(validate_domain_id("two words").is_err());
    }
}
