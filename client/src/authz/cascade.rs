//! Cascading membership removal
//!
//! Removing a user from an organization must also revoke the user's
//! assignments in every clinic under that organization, since
//! organization-level access implies clinic-level access. The protocol is
//! expressed over a small backend trait so it can be exercised against an
//! in-memory fixture as well as the live API.

use super::UserRoleIndex;
use crate::error::{ClientError, ClientResult};
use shared::{DomainType, Organization, UserRole};

/// The two API calls the cascade needs; implemented by `ApiClient` and by
/// test fixtures.
pub trait UserRoleBackend {
    fn fetch_domain_user_roles(
        &self,
        domain_type: DomainType,
        domain_id: &str,
    ) -> impl std::future::Future<Output = ClientResult<Vec<UserRole>>> + Send;

    fn delete_user_role(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = ClientResult<()>> + Send;
}

impl UserRoleBackend for crate::api::ApiClient {
    async fn fetch_domain_user_roles(
        &self,
        domain_type: DomainType,
        domain_id: &str,
    ) -> ClientResult<Vec<UserRole>> {
        self.user_roles_for_domain(domain_type, domain_id).await
    }

    async fn delete_user_role(&self, id: &str) -> ClientResult<()> {
        crate::api::ApiClient::delete_user_role(self, id).await
    }
}

/// Remove every assignment binding `user_id` to the given clinic.
///
/// When neither the clinic's domain slice nor the user's slice has been
/// loaded, the clinic-scoped assignments are fetched first and the
/// resolution retried - at most one extra round trip. Returns the number
/// of assignments deleted; a run that resolves nothing is a successful
/// no-op.
pub async fn remove_user_from_clinic<B: UserRoleBackend>(
    index: &mut UserRoleIndex,
    backend: &B,
    user_id: &str,
    clinic_id: &str,
) -> ClientResult<usize> {
    let outcome = remove_phase(index, backend, user_id, DomainType::Clinic, clinic_id).await;
    outcome.into_result()
}

/// Remove every assignment binding `user_id` to the organization, then
/// cascade to each clinic in the organization's `clinics` list.
///
/// Per-assignment deletes are attempted independently across the whole
/// fan-out: a failure at the organization level does not stop the clinic
/// phases. The first failure is reported after every phase has been
/// tried, leaving no compensating transaction for partial success.
pub async fn remove_user_from_organization<B: UserRoleBackend>(
    index: &mut UserRoleIndex,
    backend: &B,
    user_id: &str,
    organization: &Organization,
) -> ClientResult<usize> {
    let mut outcome = remove_phase(
        index,
        backend,
        user_id,
        DomainType::Organization,
        &organization.id,
    )
    .await;

    for clinic_id in &organization.clinics {
        let clinic_outcome =
            remove_phase(index, backend, user_id, DomainType::Clinic, clinic_id).await;
        outcome.absorb(clinic_outcome);
    }

    outcome.into_result()
}

/// Result of one domain-scoped removal phase: deletions that succeeded
/// plus the first failure, kept until the whole fan-out has run
struct PhaseOutcome {
    deleted: usize,
    first_error: Option<ClientError>,
}

impl PhaseOutcome {
    fn absorb(&mut self, other: PhaseOutcome) {
        self.deleted += other.deleted;
        if self.first_error.is_none() {
            self.first_error = other.first_error;
        }
    }

    fn into_result(self) -> ClientResult<usize> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(self.deleted),
        }
    }
}

async fn remove_phase<B: UserRoleBackend>(
    index: &mut UserRoleIndex,
    backend: &B,
    user_id: &str,
    domain_type: DomainType,
    domain_id: &str,
) -> PhaseOutcome {
    // Resolve from whichever index slice is populated; fetch-then-retry
    // when neither is, so the cascade never silently resolves nothing it
    // merely had not loaded.
    if !index.domain_loaded(domain_type, domain_id) && !index.user_loaded(user_id) {
        match backend
            .fetch_domain_user_roles(domain_type, domain_id)
            .await
        {
            Ok(fetched) => index.merge_for_domain(domain_type, domain_id, fetched),
            Err(err) => {
                tracing::warn!(%domain_type, domain_id, "failed to fetch role assignments: {}", err);
                return PhaseOutcome {
                    deleted: 0,
                    first_error: Some(err),
                };
            }
        }
    }

    let targets: Vec<String> = if index.domain_loaded(domain_type, domain_id) {
        index
            .user_roles_for_domain(domain_type, domain_id)
            .into_iter()
            .filter(|user_role| user_role.user_id == user_id)
            .map(|user_role| user_role.id.clone())
            .collect()
    } else {
        index
            .user_roles_for_user(user_id)
            .into_iter()
            .filter(|user_role| user_role.matches_domain(domain_type, domain_id))
            .map(|user_role| user_role.id.clone())
            .collect()
    };

    let mut deleted = 0;
    let mut first_error = None;
    for id in targets {
        match backend.delete_user_role(&id).await {
            Ok(()) => {
                index.remove(&id);
                deleted += 1;
            }
            Err(err) => {
                tracing::warn!(user_role = %id, "failed to delete role assignment: {}", err);
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    PhaseOutcome {
        deleted,
        first_error,
    }
}
