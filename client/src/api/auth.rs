//! Auth-service endpoints: session, batched permission checks, and CRUD
//! for every administered entity collection.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ClientResult;
use shared::{
    Clinic, DomainType, Location, Organization, Role, Rule, RuleAction, User, UserRole,
};

/// Credentials for `POST /auth/login`
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// One entry of the batched `POST /auth/validate` request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationQuery {
    pub resource: String,
    pub actions: RuleAction,
    #[serde(rename = "domainType")]
    pub domain_type: DomainType,
    #[serde(rename = "domainID")]
    pub domain_id: String,
}

/// One entry of the validate response; parallel to the request array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub query: ValidationQuery,
    pub result: bool,
}

impl ApiClient {
    // ========================================================================
    // Session
    // ========================================================================

    /// Exchange credentials for a raw bearer token
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        // 200 returns the token as a plain string, not JSON
        self.post_json_expect_text("auth/login", &LoginRequest { username, password })
            .await
    }

    /// Renew the current token; returns the replacement token
    pub async fn renew(&self) -> ClientResult<String> {
        self.get_text("auth/renew").await
    }

    /// Batched permission check against the server's policy engine
    pub async fn validate(
        &self,
        queries: &[ValidationQuery],
    ) -> ClientResult<Vec<ValidationResult>> {
        self.send_json(Method::POST, "auth/validate", queries).await
    }

    // ========================================================================
    // Generic collection plumbing
    // ========================================================================

    async fn list<T: DeserializeOwned>(&self, resource: &str) -> ClientResult<Vec<T>> {
        self.get_json(&format!("auth/{}", resource)).await
    }

    async fn get_one<T: DeserializeOwned>(&self, resource: &str, id: &str) -> ClientResult<T> {
        self.get_json(&format!("auth/{}/{}", resource, id)).await
    }

    async fn create<T: Serialize + DeserializeOwned>(
        &self,
        resource: &str,
        entity: &T,
    ) -> ClientResult<T> {
        self.send_json(Method::POST, &format!("auth/{}", resource), entity)
            .await
    }

    async fn update<T: Serialize + DeserializeOwned>(
        &self,
        resource: &str,
        id: &str,
        entity: &T,
    ) -> ClientResult<T> {
        self.send_json(Method::PUT, &format!("auth/{}/{}", resource, id), entity)
            .await
    }

    async fn delete(&self, resource: &str, id: &str) -> ClientResult<()> {
        self.delete_no_content(&format!("auth/{}/{}", resource, id))
            .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        self.list("users").await
    }

    pub async fn user(&self, id: &str) -> ClientResult<User> {
        self.get_one("users", id).await
    }

    pub async fn create_user(&self, user: &User) -> ClientResult<User> {
        self.create("users", user).await
    }

    pub async fn update_user(&self, user: &User) -> ClientResult<User> {
        self.update("users", &user.id, user).await
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        self.delete("users", id).await
    }

    // ========================================================================
    // Roles
    // ========================================================================

    pub async fn roles(&self) -> ClientResult<Vec<Role>> {
        self.list("roles").await
    }

    pub async fn create_role(&self, role: &Role) -> ClientResult<Role> {
        self.create("roles", role).await
    }

    pub async fn update_role(&self, role: &Role) -> ClientResult<Role> {
        self.update("roles", &role.id, role).await
    }

    pub async fn delete_role(&self, id: &str) -> ClientResult<()> {
        self.delete("roles", id).await
    }

    // ========================================================================
    // ACL rules
    // ========================================================================

    pub async fn rules(&self) -> ClientResult<Vec<Rule>> {
        self.list("rules").await
    }

    pub async fn create_rule(&self, rule: &Rule) -> ClientResult<Rule> {
        self.create("rules", rule).await
    }

    pub async fn update_rule(&self, rule: &Rule) -> ClientResult<Rule> {
        self.update("rules", &rule.id, rule).await
    }

    pub async fn delete_rule(&self, id: &str) -> ClientResult<()> {
        self.delete("rules", id).await
    }

    // ========================================================================
    // Organizations
    // ========================================================================

    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        self.list("organizations").await
    }

    pub async fn organization(&self, id: &str) -> ClientResult<Organization> {
        self.get_one("organizations", id).await
    }

    pub async fn create_organization(&self, org: &Organization) -> ClientResult<Organization> {
        self.create("organizations", org).await
    }

    pub async fn update_organization(&self, org: &Organization) -> ClientResult<Organization> {
        self.update("organizations", &org.id, org).await
    }

    pub async fn delete_organization(&self, id: &str) -> ClientResult<()> {
        self.delete("organizations", id).await
    }

    // ========================================================================
    // Clinics
    // ========================================================================

    pub async fn clinics(&self) -> ClientResult<Vec<Clinic>> {
        self.list("clinics").await
    }

    pub async fn create_clinic(&self, clinic: &Clinic) -> ClientResult<Clinic> {
        self.create("clinics", clinic).await
    }

    pub async fn update_clinic(&self, clinic: &Clinic) -> ClientResult<Clinic> {
        self.update("clinics", &clinic.id, clinic).await
    }

    pub async fn delete_clinic(&self, id: &str) -> ClientResult<()> {
        self.delete("clinics", id).await
    }

    // ========================================================================
    // Locations
    // ========================================================================

    pub async fn locations(&self) -> ClientResult<Vec<Location>> {
        self.list("locations").await
    }

    pub async fn create_location(&self, location: &Location) -> ClientResult<Location> {
        self.create("locations", location).await
    }

    pub async fn update_location(&self, location: &Location) -> ClientResult<Location> {
        self.update("locations", &location.id, location).await
    }

    pub async fn delete_location(&self, id: &str) -> ClientResult<()> {
        self.delete("locations", id).await
    }

    // ========================================================================
    // Role assignments
    // ========================================================================

    pub async fn user_roles(&self) -> ClientResult<Vec<UserRole>> {
        self.list("userRoles").await
    }

    pub async fn user_roles_for_user(&self, user_id: &str) -> ClientResult<Vec<UserRole>> {
        self.get_json(&format!("auth/userRoles?userID={}", user_id))
            .await
    }

    pub async fn user_roles_for_role(&self, role_id: &str) -> ClientResult<Vec<UserRole>> {
        self.get_json(&format!("auth/userRoles?roleID={}", role_id))
            .await
    }

    pub async fn user_roles_for_domain(
        &self,
        domain_type: DomainType,
        domain_id: &str,
    ) -> ClientResult<Vec<UserRole>> {
        self.get_json(&format!(
            "auth/userRoles?domainType={}&domainID={}",
            domain_type, domain_id
        ))
        .await
    }

    pub async fn create_user_role(&self, user_role: &UserRole) -> ClientResult<UserRole> {
        self.create("userRoles", user_role).await
    }

    pub async fn delete_user_role(&self, id: &str) -> ClientResult<()> {
        self.delete("userRoles", id).await
    }
}
