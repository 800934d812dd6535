//! Action layer: every store mutation that touches the network
//!
//! All fetch failures are caught here and turned into an alert plus a
//! state-flag reset; callers never see raw errors escape to the view
//! layer - views only observe flags. A 403 suppresses the view via the
//! `forbidden` flag instead of alerting. Nothing is retried automatically
//! except token renewal (see `session`).

use crate::api::ApiClient;
use crate::authz;
use crate::error::{Alert, ClientError, ClientResult};
use crate::store::Store;
use shared::{
    Clinic, Code, CodeCategory, DomainType, Location, Organization, Role, Rule, User, UserRole,
};

fn report_load_failure(store: &mut Store, err: &ClientError) {
    if !err.is_forbidden() {
        store.push_alert(Alert::from_error(err));
    }
}

fn report_write_failure(store: &mut Store, err: &ClientError) {
    store.push_alert(Alert::from_error(err));
}

// ============================================================================
// Users
// ============================================================================

/// Fetch the user collection unless it is loaded or a fetch is in flight
pub async fn load_users(store: &mut Store, api: &ApiClient) {
    if !store.users.needs_fetch() {
        return;
    }
    store.users.begin_load();
    match api.users().await {
        Ok(users) => store.users.replace_all(users),
        Err(err) => {
            store.users.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

/// Fetch a single user if not already cached
pub async fn load_user(store: &mut Store, api: &ApiClient, id: &str) {
    if store.users.contains(id) {
        return;
    }
    match api.user(id).await {
        Ok(user) => store.users.upsert(user),
        Err(err) => {
            store.users.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

/// Create or update a user; the server echo keys the cache
pub async fn save_user(store: &mut Store, api: &ApiClient, user: User) -> bool {
    let result = if user.id.is_empty() {
        api.create_user(&user).await
    } else {
        api.update_user(&user).await
    };
    match result {
        Ok(echo) => {
            store.users.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

/// Delete a user, first revoking every role assignment that references it
pub async fn delete_user(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    let cleanup = async {
        let assignments = api.user_roles_for_user(id).await?;
        store.user_roles.merge_for_user(id, assignments);
        let ids: Vec<String> = store
            .user_roles
            .user_roles_for_user(id)
            .into_iter()
            .map(|user_role| user_role.id.clone())
            .collect();
        for user_role_id in ids {
            api.delete_user_role(&user_role_id).await?;
            store.user_roles.remove(&user_role_id);
        }
        api.delete_user(id).await
    };
    match cleanup.await {
        Ok(()) => {
            store.users.remove(id);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// Roles
// ============================================================================

pub async fn load_roles(store: &mut Store, api: &ApiClient) {
    if !store.roles.needs_fetch() {
        return;
    }
    store.roles.begin_load();
    match api.roles().await {
        Ok(roles) => store.roles.replace_all(roles),
        Err(err) => {
            store.roles.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_role(store: &mut Store, api: &ApiClient, role: Role) -> bool {
    let result = if role.id.is_empty() {
        api.create_role(&role).await
    } else {
        api.update_role(&role).await
    };
    match result {
        Ok(echo) => {
            store.roles.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

/// Delete a role; assignments referencing it become dangling server-side,
/// so the user-role slice is invalidated
pub async fn delete_role(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    match api.delete_role(id).await {
        Ok(()) => {
            store.roles.remove(id);
            store.user_roles.clear();
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// ACL rules
// ============================================================================

pub async fn load_rules(store: &mut Store, api: &ApiClient) {
    if !store.rules.needs_fetch() {
        return;
    }
    store.rules.begin_load();
    match api.rules().await {
        Ok(rules) => store.rules.replace_all(rules),
        Err(err) => {
            store.rules.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_rule(store: &mut Store, api: &ApiClient, rule: Rule) -> bool {
    let result = if rule.id.is_empty() {
        api.create_rule(&rule).await
    } else {
        api.update_rule(&rule).await
    };
    match result {
        Ok(echo) => {
            store.rules.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

pub async fn delete_rule(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    match api.delete_rule(id).await {
        Ok(()) => {
            store.rules.remove(id);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// Organizations
// ============================================================================

pub async fn load_organizations(store: &mut Store, api: &ApiClient) {
    if !store.organizations.needs_fetch() {
        return;
    }
    store.organizations.begin_load();
    match api.organizations().await {
        Ok(organizations) => store.organizations.replace_all(organizations),
        Err(err) => {
            store.organizations.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_organization(store: &mut Store, api: &ApiClient, org: Organization) -> bool {
    let result = if org.id.is_empty() {
        api.create_organization(&org).await
    } else {
        api.update_organization(&org).await
    };
    match result {
        Ok(echo) => {
            store.organizations.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

/// Delete an organization: scoped role assignments are removed first,
/// then the entity; dependent slices are invalidated afterwards
pub async fn delete_organization(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    let result = async {
        delete_domain_scoped_assignments(store, api, DomainType::Organization, id).await?;
        api.delete_organization(id).await
    };
    match result.await {
        Ok(()) => {
            store.organizations.remove(id);
            store.clear_after_organization_change();
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// Clinics
// ============================================================================

pub async fn load_clinics(store: &mut Store, api: &ApiClient) {
    if !store.clinics.needs_fetch() {
        return;
    }
    store.clinics.begin_load();
    match api.clinics().await {
        Ok(clinics) => store.clinics.replace_all(clinics),
        Err(err) => {
            store.clinics.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_clinic(store: &mut Store, api: &ApiClient, clinic: Clinic) -> bool {
    let result = if clinic.id.is_empty() {
        api.create_clinic(&clinic).await
    } else {
        api.update_clinic(&clinic).await
    };
    match result {
        Ok(echo) => {
            store.clinics.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

pub async fn delete_clinic(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    let result = async {
        delete_domain_scoped_assignments(store, api, DomainType::Clinic, id).await?;
        api.delete_clinic(id).await
    };
    match result.await {
        Ok(()) => {
            store.clinics.remove(id);
            store.clear_after_clinic_change();
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// Locations
// ============================================================================

pub async fn load_locations(store: &mut Store, api: &ApiClient) {
    if !store.locations.needs_fetch() {
        return;
    }
    store.locations.begin_load();
    match api.locations().await {
        Ok(locations) => store.locations.replace_all(locations),
        Err(err) => {
            store.locations.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_location(store: &mut Store, api: &ApiClient, location: Location) -> bool {
    let result = if location.id.is_empty() {
        api.create_location(&location).await
    } else {
        api.update_location(&location).await
    };
    match result {
        Ok(echo) => {
            store.locations.upsert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

pub async fn delete_location(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    let result = async {
        delete_domain_scoped_assignments(store, api, DomainType::Location, id).await?;
        api.delete_location(id).await
    };
    match result.await {
        Ok(()) => {
            store.locations.remove(id);
            store.clear_after_location_change();
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

// ============================================================================
// Role assignments
// ============================================================================

/// Bulk fetch of all role assignments with in-flight suppression
pub async fn load_user_roles(store: &mut Store, api: &ApiClient) {
    if !store.user_roles.needs_fetch() {
        return;
    }
    store.user_roles.begin_load();
    match api.user_roles().await {
        Ok(user_roles) => store.user_roles.replace_all(user_roles),
        Err(err) => {
            store.user_roles.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

/// Point load of one user's assignments, merged without invalidating
/// unrelated index entries
pub async fn load_user_roles_for_user(store: &mut Store, api: &ApiClient, user_id: &str) {
    if store.user_roles.user_loaded(user_id) {
        return;
    }
    match api.user_roles_for_user(user_id).await {
        Ok(user_roles) => store.user_roles.merge_for_user(user_id, user_roles),
        Err(err) => {
            store.user_roles.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

/// Point load of one domain's assignments
pub async fn load_user_roles_for_domain(
    store: &mut Store,
    api: &ApiClient,
    domain_type: DomainType,
    domain_id: &str,
) {
    if store.user_roles.domain_loaded(domain_type, domain_id) {
        return;
    }
    match api.user_roles_for_domain(domain_type, domain_id).await {
        Ok(user_roles) => store
            .user_roles
            .merge_for_domain(domain_type, domain_id, user_roles),
        Err(err) => {
            store.user_roles.load_failed(&err);
            report_load_failure(store, &err);
        }
    }
}

pub async fn save_user_role(store: &mut Store, api: &ApiClient, user_role: UserRole) -> bool {
    match api.create_user_role(&user_role).await {
        Ok(echo) => {
            store.user_roles.insert(echo);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

pub async fn delete_user_role(store: &mut Store, api: &ApiClient, id: &str) -> bool {
    match api.delete_user_role(id).await {
        Ok(()) => {
            store.user_roles.remove(id);
            true
        }
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

/// Revoke a user's membership in one clinic; the caller owns the
/// composite user-facing notification, so only failures alert here
pub async fn remove_user_from_clinic(
    store: &mut Store,
    api: &ApiClient,
    user_id: &str,
    clinic_id: &str,
) -> bool {
    match authz::remove_user_from_clinic(&mut store.user_roles, api, user_id, clinic_id).await {
        Ok(_) => true,
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

/// Revoke a user's membership in an organization and all of its clinics
pub async fn remove_user_from_organization(
    store: &mut Store,
    api: &ApiClient,
    user_id: &str,
    organization: &Organization,
) -> bool {
    match authz::remove_user_from_organization(&mut store.user_roles, api, user_id, organization)
        .await
    {
        Ok(_) => true,
        Err(err) => {
            report_write_failure(store, &err);
            false
        }
    }
}

async fn delete_domain_scoped_assignments(
    store: &mut Store,
    api: &ApiClient,
    domain_type: DomainType,
    domain_id: &str,
) -> ClientResult<()> {
    let assignments = api.user_roles_for_domain(domain_type, domain_id).await?;
    store
        .user_roles
        .merge_for_domain(domain_type, domain_id, assignments);
    let ids: Vec<String> = store
        .user_roles
        .user_roles_for_domain(domain_type, domain_id)
        .into_iter()
        .map(|user_role| user_role.id.clone())
        .collect();
    for id in ids {
        api.delete_user_role(&id).await?;
        store.user_roles.remove(&id);
    }
    Ok(())
}

// ============================================================================
// Reference codes
// ============================================================================

/// Fetch a reference code list if not already cached for the locale
pub async fn load_codes<'s>(
    store: &'s mut Store,
    api: &ApiClient,
    category: CodeCategory,
    locale: &str,
) -> Option<&'s [Code]> {
    let key = (category, locale.to_string());
    if !store.codes.contains_key(&key) {
        match api.codes(category, locale).await {
            Ok(codes) => {
                store.codes.insert(key.clone(), codes);
            }
            Err(err) => {
                report_load_failure(store, &err);
                return None;
            }
        }
    }
    store.codes.get(&key).map(|codes| codes.as_slice())
}
