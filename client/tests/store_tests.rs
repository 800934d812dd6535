//! Tests for the normalized entity store: cache keying, load flags, the
//! forbidden transition, alert slotting, and cascade invalidation.

use admin_client::error::{Alert, ClientError};
use admin_client::store::EntityCache;
use admin_client::{Store, UserRoleIndex};
use shared::{Entity, Role};

fn role(id: &str, name: &str) -> Role {
    Role {
        id: id.into(),
        name: name.into(),
    }
}

fn forbidden() -> ClientError {
    ClientError::Forbidden
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        code: 500,
        message: "internal error".into(),
    }
}

// =============================================================================
// Cache keying (create vs update)
// =============================================================================

#[test]
fn create_keys_cache_by_server_assigned_id() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    cache.replace_all(vec![]);

    // A create round trip: the draft had no ID, the echo carries one
    let echo = role("r42", "auditor");
    cache.upsert(echo);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("r42").map(|r| r.name.as_str()), Some("auditor"));
}

#[test]
fn update_does_not_duplicate_the_key() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    cache.replace_all(vec![role("r1", "doctor")]);

    let mut updated = role("r1", "physician");
    cache.upsert(updated.clone());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("r1").map(|r| r.name.as_str()), Some("physician"));

    updated.name = "clinician".into();
    cache.upsert(updated);
    assert_eq!(cache.len(), 1);
}

// =============================================================================
// Load flags and the forbidden transition
// =============================================================================

#[test]
fn forbidden_failure_sets_flag_and_clears_loading() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    cache.begin_load();
    assert!(cache.loading);

    cache.load_failed(&forbidden());
    assert!(cache.forbidden);
    assert!(!cache.loading);
    // A forbidden slice is not refetched
    assert!(!cache.needs_fetch());
}

#[test]
fn other_failures_leave_forbidden_unset() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    cache.begin_load();
    cache.load_failed(&server_error());
    assert!(!cache.forbidden);
    assert!(!cache.loading);
    // Retriable on the next render
    assert!(cache.needs_fetch());
}

#[test]
fn loading_flag_suppresses_duplicate_fetches() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    assert!(cache.needs_fetch());
    cache.begin_load();
    assert!(!cache.needs_fetch());
    cache.replace_all(vec![role("r1", "doctor")]);
    assert!(!cache.needs_fetch());
    assert!(cache.all_loaded);
}

#[test]
fn empty_load_is_distinct_from_not_loaded() {
    let mut cache: EntityCache<Role> = EntityCache::new();
    assert!(cache.is_empty());
    assert!(!cache.all_loaded);
    cache.replace_all(vec![]);
    assert!(cache.is_empty());
    assert!(cache.all_loaded);
}

#[test]
fn user_role_index_shares_the_flag_protocol() {
    let mut index = UserRoleIndex::new();
    index.begin_load();
    index.load_failed(&forbidden());
    assert!(index.forbidden);
    assert!(!index.loading);
    assert!(!index.needs_fetch());

    let mut index = UserRoleIndex::new();
    index.load_failed(&server_error());
    assert!(!index.forbidden);
}

// =============================================================================
// Store-level behavior
// =============================================================================

#[test]
fn alert_slot_holds_one_alert() {
    let mut store = Store::new();
    store.push_alert(Alert::error("first"));
    store.push_alert(Alert::from_error(&server_error()));

    let alert = store.alert.as_ref().expect("alert present");
    assert_eq!(alert.message, "internal error");
    assert_eq!(alert.code, Some(500));

    store.dismiss_alert();
    assert!(store.alert.is_none());
}

#[test]
fn logout_clears_every_slice() {
    let mut store = Store::new();
    store.roles.replace_all(vec![role("r1", "doctor")]);
    store.users.begin_load();
    store.push_alert(Alert::info("loaded"));

    store.clear_all();
    assert!(store.roles.is_empty());
    assert!(!store.roles.all_loaded);
    assert!(!store.users.loading);
    assert!(store.alert.is_none());
}

#[test]
fn clinic_change_invalidates_dependent_slices() {
    let mut store = Store::new();
    store.roles.replace_all(vec![role("r1", "doctor")]);
    store.organizations.replace_all(vec![]);
    store.locations.replace_all(vec![]);
    store.user_roles.replace_all(vec![]);
    store.clinics.replace_all(vec![]);

    store.clear_after_clinic_change();

    // Clinic membership feeds these three derived views
    assert!(!store.organizations.all_loaded);
    assert!(!store.locations.all_loaded);
    assert!(!store.user_roles.all_loaded);
    // Unrelated slices keep their cache
    assert!(store.roles.all_loaded);
    assert!(store.clinics.all_loaded);
}

#[test]
fn organization_change_invalidates_dependent_slices() {
    let mut store = Store::new();
    store.clinics.replace_all(vec![]);
    store.locations.replace_all(vec![]);
    store.user_roles.replace_all(vec![]);
    store.organizations.replace_all(vec![]);

    store.clear_after_organization_change();

    assert!(!store.clinics.all_loaded);
    assert!(!store.locations.all_loaded);
    assert!(!store.user_roles.all_loaded);
    assert!(store.organizations.all_loaded);
}

#[test]
fn entity_ids_key_the_cache() {
    let r = role("r7", "auditor");
    assert_eq!(r.id(), "r7");
}
