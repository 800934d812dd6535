//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain ID wildcard: a role assignment with this domain ID applies to
/// every instance of its domain type.
pub const WILDCARD_DOMAIN_ID: &str = "*";

/// Returns true if the domain ID is the wildcard.
pub fn is_wildcard(domain_id: &str) -> bool {
    domain_id == WILDCARD_DOMAIN_ID
}

/// Scope level at which a role assignment applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Global,
    Cloud,
    Organization,
    Clinic,
    Location,
    User,
}

impl DomainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Global => "global",
            DomainType::Cloud => "cloud",
            DomainType::Organization => "organization",
            DomainType::Clinic => "clinic",
            DomainType::Location => "location",
            DomainType::User => "user",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access-control action bitmask carried by ACL rules.
///
/// The server evaluates these; the client only edits and lists them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct RuleAction(pub u32);

impl RuleAction {
    pub const NONE: RuleAction = RuleAction(0);
    pub const READ: RuleAction = RuleAction(1);
    pub const WRITE: RuleAction = RuleAction(2);
    pub const DELETE: RuleAction = RuleAction(4);
    pub const UPDATE: RuleAction = RuleAction(16);

    /// All bits the server recognizes
    pub const ALL: RuleAction = RuleAction(1 | 2 | 4 | 16);

    pub fn contains(&self, other: RuleAction) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: RuleAction) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: RuleAction) {
        self.0 &= !other.0;
    }

    /// True if no unknown bits are set
    pub fn is_valid(&self) -> bool {
        self.0 & !Self::ALL.0 == 0
    }
}

/// Reference-code categories served by the discovery service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CodeCategory {
    Countries,
    Languages,
    Licenses,
}

impl CodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeCategory::Countries => "countries",
            CodeCategory::Languages => "languages",
            CodeCategory::Licenses => "licenses",
        }
    }
}

/// A single reference code (country, language, license, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Code {
    pub id: String,
    pub category: String,
    pub locale: String,
    pub title: String,
}

/// Health of a single platform component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentHealth {
    Ok,
    Degraded,
    Error,
}

/// One named component in the status report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub name: String,
    pub status: ComponentHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregated `/status` response for the UI status indicator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub local: Vec<ComponentStatus>,
    pub cloud: Vec<ComponentStatus>,
    pub external: Vec<ComponentStatus>,
}

impl StatusReport {
    /// Worst health across all components; `Ok` when everything is healthy
    /// or the report is empty.
    pub fn overall(&self) -> ComponentHealth {
        let mut overall = ComponentHealth::Ok;
        for component in self
            .local
            .iter()
            .chain(self.cloud.iter())
            .chain(self.external.iter())
        {
            match component.status {
                ComponentHealth::Error => return ComponentHealth::Error,
                ComponentHealth::Degraded => overall = ComponentHealth::Degraded,
                ComponentHealth::Ok => {}
            }
        }
        overall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_action_bit_operations() {
        let mut action = RuleAction::READ;
        action.insert(RuleAction::UPDATE);
        assert!(action.contains(RuleAction::READ));
        assert!(action.contains(RuleAction::UPDATE));
        assert!(!action.contains(RuleAction::DELETE));

        action.remove(RuleAction::READ);
        assert!(!action.contains(RuleAction::READ));
        assert_eq!(action, RuleAction::UPDATE);
    }

    #[test]
    fn rule_action_validity() {
        assert!(RuleAction::ALL.is_valid());
        assert!(RuleAction(1 | 2).is_valid());
        // Bit 8 is not assigned by the server
        assert!(!RuleAction(8).is_valid());
    }

    #[test]
    fn status_overall_rollup() {
        let mut report = StatusReport {
            local: vec![ComponentStatus {
                name: "database".into(),
                status: ComponentHealth::Ok,
                message: None,
            }],
            cloud: vec![],
            external: vec![],
        };
        assert_eq!(report.overall(), ComponentHealth::Ok);

        report.cloud.push(ComponentStatus {
            name: "sync".into(),
            status: ComponentHealth::Degraded,
            message: Some("queue backlog".into()),
        });
        assert_eq!(report.overall(), ComponentHealth::Degraded);

        report.external.push(ComponentStatus {
            name: "reporting".into(),
            status: ComponentHealth::Error,
            message: None,
        });
        assert_eq!(report.overall(), ComponentHealth::Error);
    }
}
