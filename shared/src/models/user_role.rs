//! Role assignment (user-role) models

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::{is_wildcard, DomainType};

/// A single (user, role, domain scope) binding.
///
/// `domain_id == "*"` grants the role across every instance of
/// `domain_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRole {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "roleID")]
    pub role_id: String,
    #[serde(rename = "domainType")]
    pub domain_type: DomainType,
    #[serde(rename = "domainID")]
    pub domain_id: String,
}

impl UserRole {
    pub fn is_wildcard(&self) -> bool {
        is_wildcard(&self.domain_id)
    }

    /// True if the assignment is scoped to exactly this domain instance.
    pub fn matches_domain(&self, domain_type: DomainType, domain_id: &str) -> bool {
        self.domain_type == domain_type && self.domain_id == domain_id
    }
}

impl Entity for UserRole {
    fn id(&self) -> &str {
        &self.id
    }
}
