//! Role and ACL rule models

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::RuleAction;

/// A named permission bundle with independent lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Entity for Role {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An ACL entry evaluated by the server's policy engine.
///
/// `subject` is a user or role ID; `resource` is a path string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub subject: String,
    pub resource: String,
    pub action: RuleAction,
    #[serde(default)]
    pub deny: bool,
}

impl Entity for Rule {
    fn id(&self) -> &str {
        &self.id
    }
}
