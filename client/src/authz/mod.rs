//! Domain-scoped authorization index
//!
//! Maintains three owned indices over the flat list of role assignments
//! (by user, by role, by domain) plus an arena of the records themselves.
//! Bulk loads rebuild all indices in one O(n) pass; point loads and
//! deletions update the indices incrementally so unrelated entries are
//! never invalidated. Derived sets (organization/clinic membership,
//! allowed clinics, wildcard grants) are pure queries over the indices.

mod cascade;

pub use cascade::{remove_user_from_clinic, remove_user_from_organization, UserRoleBackend};

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::ClientError;
use shared::{DomainType, Organization, UserRole};

/// Index over all loaded role assignments.
///
/// This is also the user-roles slice of the store: it carries the usual
/// `loading`/`forbidden`/`all_loaded` flags, and additionally remembers
/// which per-user and per-domain slices have been fetched so the cascade
/// logic can tell "empty" from "not loaded".
#[derive(Debug, Default)]
pub struct UserRoleIndex {
    records: HashMap<String, UserRole>,
    by_user: HashMap<String, BTreeSet<String>>,
    by_role: HashMap<String, BTreeSet<String>>,
    by_domain: HashMap<DomainType, HashMap<String, BTreeSet<String>>>,

    users_loaded: HashSet<String>,
    domains_loaded: HashSet<(DomainType, String)>,

    /// True once the full collection has been fetched; distinguishes an
    /// empty index from one that was never loaded
    pub all_loaded: bool,
    pub loading: bool,
    pub forbidden: bool,
}

impl UserRoleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UserRole> {
        self.records.get(id)
    }

    /// True when a bulk fetch should be dispatched (not loaded, none in
    /// flight) - duplicate in-flight requests are suppressed by `loading`
    pub fn needs_fetch(&self) -> bool {
        !self.all_loaded && !self.loading && !self.forbidden
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Record a load failure: 403 marks the slice forbidden, anything else
    /// only resets the loading flag
    pub fn load_failed(&mut self, err: &ClientError) {
        self.loading = false;
        if err.is_forbidden() {
            self.forbidden = true;
        }
    }

    // ========================================================================
    // Index maintenance
    // ========================================================================

    /// Bulk load: rebuild every index from the full assignment list
    pub fn replace_all(&mut self, user_roles: Vec<UserRole>) {
        self.records.clear();
        self.by_user.clear();
        self.by_role.clear();
        self.by_domain.clear();
        self.users_loaded.clear();
        self.domains_loaded.clear();

        // Route through insert so a payload repeating an ID cannot leave a
        // stale bucket link from the earlier occurrence
        for user_role in user_roles {
            self.insert(user_role);
        }

        self.all_loaded = true;
        self.loading = false;
        self.forbidden = false;
    }

    /// Point load of one user's assignments: replaces that user's records
    /// without touching unrelated entries
    pub fn merge_for_user(&mut self, user_id: &str, user_roles: Vec<UserRole>) {
        let stale: Vec<String> = self
            .by_user
            .get(user_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();
        for id in stale {
            self.remove(&id);
        }
        for user_role in user_roles {
            self.insert(user_role);
        }
        self.users_loaded.insert(user_id.to_string());
        self.loading = false;
    }

    /// Point load of one domain's assignments
    pub fn merge_for_domain(
        &mut self,
        domain_type: DomainType,
        domain_id: &str,
        user_roles: Vec<UserRole>,
    ) {
        let stale: Vec<String> = self
            .by_domain
            .get(&domain_type)
            .and_then(|by_id| by_id.get(domain_id))
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default();
        for id in stale {
            self.remove(&id);
        }
        for user_role in user_roles {
            self.insert(user_role);
        }
        self.domains_loaded
            .insert((domain_type, domain_id.to_string()));
        self.loading = false;
    }

    /// Insert or replace a single assignment in all three indices
    pub fn insert(&mut self, user_role: UserRole) {
        // Replacing an existing record must unlink its old buckets first
        if self.records.contains_key(&user_role.id) {
            self.remove(&user_role.id);
        }
        self.link(&user_role);
        self.records.insert(user_role.id.clone(), user_role);
    }

    /// Remove an assignment by ID from the arena and every index
    pub fn remove(&mut self, id: &str) -> Option<UserRole> {
        let user_role = self.records.remove(id)?;

        if let Some(ids) = self.by_user.get_mut(&user_role.user_id) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_user.remove(&user_role.user_id);
            }
        }
        if let Some(ids) = self.by_role.get_mut(&user_role.role_id) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_role.remove(&user_role.role_id);
            }
        }
        if let Some(by_id) = self.by_domain.get_mut(&user_role.domain_type) {
            if let Some(ids) = by_id.get_mut(&user_role.domain_id) {
                ids.remove(id);
                if ids.is_empty() {
                    by_id.remove(&user_role.domain_id);
                }
            }
            if by_id.is_empty() {
                self.by_domain.remove(&user_role.domain_type);
            }
        }

        Some(user_role)
    }

    /// Tear down the whole slice (logout, cascade invalidation)
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn link(&mut self, user_role: &UserRole) {
        self.by_user
            .entry(user_role.user_id.clone())
            .or_default()
            .insert(user_role.id.clone());
        self.by_role
            .entry(user_role.role_id.clone())
            .or_default()
            .insert(user_role.id.clone());
        self.by_domain
            .entry(user_role.domain_type)
            .or_default()
            .entry(user_role.domain_id.clone())
            .or_default()
            .insert(user_role.id.clone());
    }

    // ========================================================================
    // Loaded-ness
    // ========================================================================

    /// True if this user's assignments are known in full (bulk load or a
    /// point load for the user)
    pub fn user_loaded(&self, user_id: &str) -> bool {
        self.all_loaded || self.users_loaded.contains(user_id)
    }

    /// True if this domain's assignments are known in full
    pub fn domain_loaded(&self, domain_type: DomainType, domain_id: &str) -> bool {
        self.all_loaded
            || self
                .domains_loaded
                .contains(&(domain_type, domain_id.to_string()))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn user_roles_for_user(&self, user_id: &str) -> Vec<&UserRole> {
        self.collect(self.by_user.get(user_id))
    }

    pub fn user_roles_for_role(&self, role_id: &str) -> Vec<&UserRole> {
        self.collect(self.by_role.get(role_id))
    }

    pub fn user_roles_for_domain(
        &self,
        domain_type: DomainType,
        domain_id: &str,
    ) -> Vec<&UserRole> {
        self.collect(
            self.by_domain
                .get(&domain_type)
                .and_then(|by_id| by_id.get(domain_id)),
        )
    }

    /// Assignments granting a role across every instance of a domain type
    pub fn wildcard_assignments(&self, domain_type: DomainType) -> Vec<&UserRole> {
        self.user_roles_for_domain(domain_type, shared::WILDCARD_DOMAIN_ID)
    }

    /// IDs of organizations the user is a member of (wildcard excluded)
    pub fn organization_ids(&self, user_id: &str) -> BTreeSet<String> {
        self.domain_ids_for_user(user_id, DomainType::Organization)
    }

    /// IDs of clinics the user is a member of (wildcard excluded)
    pub fn clinic_ids(&self, user_id: &str) -> BTreeSet<String> {
        self.domain_ids_for_user(user_id, DomainType::Clinic)
    }

    /// IDs of users with an assignment scoped to the given domain instance
    pub fn user_ids_in_domain(&self, domain_type: DomainType, domain_id: &str) -> BTreeSet<String> {
        self.user_roles_for_domain(domain_type, domain_id)
            .into_iter()
            .map(|user_role| user_role.user_id.clone())
            .collect()
    }

    /// Clinics the user may be added to: the union of the `clinics` lists
    /// of every organization the user already belongs to
    pub fn allowed_clinic_ids<'a, I>(&self, user_id: &str, organizations: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a Organization>,
    {
        let member_of = self.organization_ids(user_id);
        let mut allowed = BTreeSet::new();
        for organization in organizations {
            if member_of.contains(&organization.id) {
                allowed.extend(organization.clinics.iter().cloned());
            }
        }
        allowed
    }

    fn domain_ids_for_user(&self, user_id: &str, domain_type: DomainType) -> BTreeSet<String> {
        self.user_roles_for_user(user_id)
            .into_iter()
            .filter(|user_role| user_role.domain_type == domain_type && !user_role.is_wildcard())
            .map(|user_role| user_role.domain_id.clone())
            .collect()
    }

    fn collect(&self, ids: Option<&BTreeSet<String>>) -> Vec<&UserRole> {
        ids.map(|ids| ids.iter().filter_map(|id| self.records.get(id)).collect())
            .unwrap_or_default()
    }
}
