//! Page-level permission gating
//!
//! Three coarse flags derived from one batched validate call against three
//! fixed cloud-wide queries. The real authorization decision is made
//! server-side; the client only mirrors the booleans and re-requests them
//! while they are still unset.

use crate::api::{ApiClient, ValidationQuery, ValidationResult};
use crate::error::{Alert, ClientResult};
use crate::store::Store;
use shared::{DomainType, RuleAction, WILDCARD_DOMAIN_ID};

/// The batched validate call the permission probe needs; implemented by
/// `ApiClient` and by test fixtures.
pub trait ValidationBackend {
    fn validate(
        &self,
        queries: &[ValidationQuery],
    ) -> impl std::future::Future<Output = ClientResult<Vec<ValidationResult>>> + Send;
}

impl ValidationBackend for ApiClient {
    async fn validate(&self, queries: &[ValidationQuery]) -> ClientResult<Vec<ValidationResult>> {
        ApiClient::validate(self, queries).await
    }
}

/// Resources behind the three fixed permission queries
const SELF_RESOURCE: &str = "/auth/users/self";
const ADMIN_RESOURCE: &str = "/auth/users";
const SUPERADMIN_RESOURCE: &str = "/auth/rules";

/// Coarse permission flags for the current session.
///
/// `None` means "not yet loaded" and triggers a re-request; views render a
/// loading placeholder until all three are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePermissions {
    pub can_self: Option<bool>,
    pub can_admin: Option<bool>,
    pub can_superadmin: Option<bool>,
}

impl PagePermissions {
    pub fn loaded(&self) -> bool {
        self.can_self.is_some() && self.can_admin.is_some() && self.can_superadmin.is_some()
    }

    /// The fixed (resource, cloud, wildcard) query batch
    pub fn queries() -> Vec<ValidationQuery> {
        let cloud_wide = |resource: &str, actions: RuleAction| ValidationQuery {
            resource: resource.to_string(),
            actions,
            domain_type: DomainType::Cloud,
            domain_id: WILDCARD_DOMAIN_ID.to_string(),
        };
        vec![
            cloud_wide(SELF_RESOURCE, RuleAction::READ),
            cloud_wide(ADMIN_RESOURCE, RuleAction::WRITE),
            cloud_wide(SUPERADMIN_RESOURCE, RuleAction::WRITE),
        ]
    }

    /// Apply the parallel result array from the validate endpoint
    pub fn apply(&mut self, results: &[ValidationResult]) {
        let mut by_position = results.iter().map(|entry| entry.result);
        self.can_self = by_position.next().map(Some).unwrap_or(Some(false));
        self.can_admin = by_position.next().map(Some).unwrap_or(Some(false));
        self.can_superadmin = by_position.next().map(Some).unwrap_or(Some(false));
    }
}

/// Load the permission flags unless already present
pub async fn load_permissions<B: ValidationBackend>(store: &mut Store, backend: &B) {
    if store.permissions.loaded() {
        return;
    }
    match fetch(backend).await {
        Ok(permissions) => store.permissions = permissions,
        Err(err) => {
            // A failed permission probe leaves the flags unset so the next
            // render retries; the alert explains the failure
            if !err.is_forbidden() {
                store.push_alert(Alert::from_error(&err));
            } else {
                store.permissions = PagePermissions {
                    can_self: Some(false),
                    can_admin: Some(false),
                    can_superadmin: Some(false),
                };
            }
        }
    }
}

async fn fetch<B: ValidationBackend>(backend: &B) -> ClientResult<PagePermissions> {
    let results = backend.validate(&PagePermissions::queries()).await?;
    let mut permissions = PagePermissions::default();
    permissions.apply(&results);
    Ok(permissions)
}
