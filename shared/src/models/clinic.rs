//! Clinic models

use serde::{Deserialize, Serialize};

use super::Entity;

/// A clinic belonging to an organization, sited at a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Owning organization ID
    pub organization: String,
    /// Location ID where the clinic operates
    pub location: String,
}

impl Entity for Clinic {
    fn id(&self) -> &str {
        &self.id
    }
}
