//! User account models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Entity;

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub personal_data: PersonalData,
}

/// Profile data attached to a user account
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Language codes from the discovery service
    #[serde(default)]
    pub languages: Vec<String>,
    /// Professional licenses held, as license codes
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<Passport>,
}

/// Passport details for identity verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub number: String,
    pub issuing_country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl User {
    /// Display name for tables: "First Last", falling back to the username.
    pub fn display_name(&self) -> String {
        let first = self.personal_data.first_name.trim();
        let last = self.personal_data.last_name.trim();
        if first.is_empty() && last.is_empty() {
            self.username.clone()
        } else if first.is_empty() {
            last.to_string()
        } else if last.is_empty() {
            first.to_string()
        } else {
            format!("{} {}", first, last)
        }
    }
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}
