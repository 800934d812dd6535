//! Location (site) models

use serde::{Deserialize, Serialize};

use super::Entity;

/// A physical site hosting clinics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country code from the discovery service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Patient capacity of the site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub electricity: bool,
    #[serde(default)]
    pub water_supply: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// IDs of clinics operating at this site
    #[serde(default)]
    pub clinics: Vec<String>,
}

impl Entity for Location {
    fn id(&self) -> &str {
        &self.id
    }
}
