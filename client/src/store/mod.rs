//! Client-side application state
//!
//! One explicit `Store` struct owns every cached slice. It is constructed
//! at startup, mutated only through the action layer, and torn down on
//! logout. It is never ambient or static.

mod actions;
mod cache;

pub use actions::*;
pub use cache::EntityCache;

use std::collections::HashMap;

use crate::authz::UserRoleIndex;
use crate::error::Alert;
use crate::permissions::PagePermissions;
use shared::{Clinic, Code, CodeCategory, Location, Organization, Role, Rule, User};

/// The whole client-side cache
#[derive(Debug, Default)]
pub struct Store {
    pub users: EntityCache<User>,
    pub roles: EntityCache<Role>,
    pub rules: EntityCache<Rule>,
    pub organizations: EntityCache<Organization>,
    pub clinics: EntityCache<Clinic>,
    pub locations: EntityCache<Location>,
    pub user_roles: UserRoleIndex,

    /// Reference code lists keyed by (category, locale)
    pub codes: HashMap<(CodeCategory, String), Vec<Code>>,

    /// Coarse page-level permission flags from the batched validate call
    pub permissions: PagePermissions,

    /// Global single-slot alert; a new alert replaces the previous one
    pub alert: Option<Alert>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the alert slot
    pub fn push_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Tear down every slice (logout)
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Invalidation after a clinic-level write: clinic membership feeds
    /// the organization, user-role and location views, so all of them are
    /// refetched next time they render.
    pub fn clear_after_clinic_change(&mut self) {
        self.organizations.clear();
        self.user_roles.clear();
        self.locations.clear();
    }

    /// Invalidation after an organization-level write
    pub fn clear_after_organization_change(&mut self) {
        self.clinics.clear();
        self.user_roles.clear();
        self.locations.clear();
    }

    /// Invalidation after a location-level write
    pub fn clear_after_location_change(&mut self) {
        self.clinics.clear();
        self.user_roles.clear();
    }
}
