//! Tests for the domain-scoped authorization index
//!
//! Covers index construction, incremental maintenance, and the derived
//! membership queries used by the admin views.

use admin_client::UserRoleIndex;
use shared::{DomainType, Organization, UserRole, WILDCARD_DOMAIN_ID};

fn assignment(
    id: &str,
    user_id: &str,
    role_id: &str,
    domain_type: DomainType,
    domain_id: &str,
) -> UserRole {
    UserRole {
        id: id.into(),
        user_id: user_id.into(),
        role_id: role_id.into(),
        domain_type,
        domain_id: domain_id.into(),
    }
}

fn organization(id: &str, clinics: &[&str]) -> Organization {
    Organization {
        id: id.into(),
        name: format!("org {}", id),
        legal_status: None,
        service_type: None,
        address: None,
        representative: None,
        primary_contact: None,
        clinics: clinics.iter().map(|c| c.to_string()).collect(),
    }
}

fn sample_index() -> UserRoleIndex {
    let mut index = UserRoleIndex::new();
    index.replace_all(vec![
        assignment("ur1", "u1", "doctor", DomainType::Clinic, "c1"),
        assignment("ur2", "u1", "member", DomainType::Organization, "o1"),
        assignment("ur3", "u2", "doctor", DomainType::Clinic, "c1"),
        assignment("ur4", "u2", "admin", DomainType::Cloud, WILDCARD_DOMAIN_ID),
        assignment("ur5", "u3", "member", DomainType::Organization, "o2"),
    ]);
    index
}

// =============================================================================
// Index construction and partitioning
// =============================================================================

mod build {
    use super::*;

    #[test]
    fn every_record_lands_in_each_axis_exactly_once() {
        let index = sample_index();
        assert_eq!(index.len(), 5);

        // User axis partitions the records
        let per_user: usize = ["u1", "u2", "u3"]
            .iter()
            .map(|u| index.user_roles_for_user(u).len())
            .sum();
        assert_eq!(per_user, 5);

        // Role axis partitions the records
        let per_role: usize = ["doctor", "member", "admin"]
            .iter()
            .map(|r| index.user_roles_for_role(r).len())
            .sum();
        assert_eq!(per_role, 5);

        // Domain axis partitions the records
        let per_domain = index.user_roles_for_domain(DomainType::Clinic, "c1").len()
            + index
                .user_roles_for_domain(DomainType::Organization, "o1")
                .len()
            + index
                .user_roles_for_domain(DomainType::Organization, "o2")
                .len()
            + index
                .user_roles_for_domain(DomainType::Cloud, WILDCARD_DOMAIN_ID)
                .len();
        assert_eq!(per_domain, 5);
    }

    #[test]
    fn bulk_load_sets_the_loaded_flag() {
        let mut index = UserRoleIndex::new();
        assert!(!index.user_loaded("u1"));
        index.replace_all(vec![]);
        assert!(index.all_loaded);
        assert!(index.is_empty());
        // After a bulk load, every slice counts as loaded
        assert!(index.user_loaded("u1"));
        assert!(index.domain_loaded(DomainType::Clinic, "c9"));
    }

    #[test]
    fn queries_on_unknown_keys_are_empty() {
        let index = sample_index();
        assert!(index.user_roles_for_user("nobody").is_empty());
        assert!(index.user_roles_for_role("ghost").is_empty());
        assert!(index
            .user_roles_for_domain(DomainType::Location, "l1")
            .is_empty());
    }
}

// =============================================================================
// Incremental maintenance
// =============================================================================

mod maintenance {
    use super::*;

    #[test]
    fn remove_leaves_no_dangling_reference() {
        let mut index = sample_index();
        let removed = index.remove("ur1").expect("ur1 exists");
        assert_eq!(removed.user_id, "u1");

        assert!(index.get("ur1").is_none());
        assert!(index
            .user_roles_for_user("u1")
            .iter()
            .all(|ur| ur.id != "ur1"));
        assert!(index
            .user_roles_for_role("doctor")
            .iter()
            .all(|ur| ur.id != "ur1"));
        assert!(index
            .user_roles_for_domain(DomainType::Clinic, "c1")
            .iter()
            .all(|ur| ur.id != "ur1"));
        assert_eq!(index.len(), 4);

        // Removing the same ID again is a no-op
        assert!(index.remove("ur1").is_none());
    }

    #[test]
    fn bulk_load_with_repeated_id_keeps_only_the_last_record() {
        let mut index = UserRoleIndex::new();
        // The later occurrence wins; the earlier one must not leave a
        // stray bucket entry behind
        index.replace_all(vec![
            assignment("ur1", "u1", "doctor", DomainType::Clinic, "c1"),
            assignment("ur1", "u2", "nurse", DomainType::Clinic, "c2"),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("ur1").expect("ur1 exists").user_id, "u2");
        assert!(index.user_roles_for_user("u1").is_empty());
        assert!(index.user_roles_for_role("doctor").is_empty());
        assert!(index
            .user_roles_for_domain(DomainType::Clinic, "c1")
            .is_empty());
        assert_eq!(index.user_roles_for_user("u2").len(), 1);
    }

    #[test]
    fn insert_replaces_existing_record_in_all_axes() {
        let mut index = sample_index();
        // Reassign ur1 to a different user and domain
        index.insert(assignment("ur1", "u9", "doctor", DomainType::Clinic, "c2"));

        assert!(index.user_roles_for_user("u1").iter().all(|ur| ur.id != "ur1"));
        assert_eq!(index.user_roles_for_user("u9").len(), 1);
        assert!(index
            .user_roles_for_domain(DomainType::Clinic, "c1")
            .iter()
            .all(|ur| ur.id != "ur1"));
        assert_eq!(
            index.user_roles_for_domain(DomainType::Clinic, "c2").len(),
            1
        );
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn point_load_replaces_only_that_users_slice() {
        let mut index = UserRoleIndex::new();
        index.merge_for_user(
            "u1",
            vec![assignment("ur1", "u1", "doctor", DomainType::Clinic, "c1")],
        );
        index.merge_for_user(
            "u2",
            vec![assignment("ur2", "u2", "member", DomainType::Organization, "o1")],
        );
        assert!(index.user_loaded("u1"));
        assert!(!index.user_loaded("u3"));

        // Refresh u1 with a different assignment set
        index.merge_for_user(
            "u1",
            vec![assignment("ur9", "u1", "member", DomainType::Organization, "o1")],
        );
        assert_eq!(index.user_roles_for_user("u1").len(), 1);
        assert_eq!(index.user_roles_for_user("u1")[0].id, "ur9");
        // u2 untouched
        assert_eq!(index.user_roles_for_user("u2").len(), 1);
    }

    #[test]
    fn domain_point_load_marks_the_domain_slice() {
        let mut index = UserRoleIndex::new();
        index.merge_for_domain(
            DomainType::Clinic,
            "c1",
            vec![
                assignment("ur1", "u1", "doctor", DomainType::Clinic, "c1"),
                assignment("ur3", "u2", "doctor", DomainType::Clinic, "c1"),
            ],
        );
        assert!(index.domain_loaded(DomainType::Clinic, "c1"));
        assert!(!index.domain_loaded(DomainType::Clinic, "c2"));
        assert_eq!(
            index.user_roles_for_domain(DomainType::Clinic, "c1").len(),
            2
        );
    }
}

// =============================================================================
// Derived membership queries
// =============================================================================

mod derived {
    use super::*;

    #[test]
    fn wildcard_assignments_are_queryable() {
        let index = sample_index();
        let wildcards = index.wildcard_assignments(DomainType::Cloud);
        assert_eq!(wildcards.len(), 1);
        assert_eq!(wildcards[0].id, "ur4");
        assert!(wildcards[0].is_wildcard());
    }

    #[test]
    fn organization_and_clinic_membership() {
        let index = sample_index();
        assert_eq!(
            index.organization_ids("u1").into_iter().collect::<Vec<_>>(),
            vec!["o1".to_string()]
        );
        assert_eq!(
            index.clinic_ids("u1").into_iter().collect::<Vec<_>>(),
            vec!["c1".to_string()]
        );
        // Wildcard cloud grants do not count as concrete membership
        assert!(index.organization_ids("u2").is_empty());
    }

    #[test]
    fn user_ids_in_domain() {
        let index = sample_index();
        let users = index.user_ids_in_domain(DomainType::Clinic, "c1");
        assert_eq!(
            users.into_iter().collect::<Vec<_>>(),
            vec!["u1".to_string(), "u2".to_string()]
        );
    }

    #[test]
    fn allowed_clinics_is_union_over_member_organizations() {
        let mut index = UserRoleIndex::new();
        index.replace_all(vec![
            assignment("ur1", "u1", "member", DomainType::Organization, "o1"),
            assignment("ur2", "u1", "member", DomainType::Organization, "o2"),
            assignment("ur3", "u2", "member", DomainType::Organization, "o3"),
        ]);
        let organizations = [
            organization("o1", &["c1", "c2"]),
            organization("o2", &["c2", "c3"]),
            organization("o3", &["c9"]),
        ];

        let allowed = index.allowed_clinic_ids("u1", organizations.iter());
        assert_eq!(
            allowed.into_iter().collect::<Vec<_>>(),
            vec!["c1".to_string(), "c2".to_string(), "c3".to_string()]
        );
    }

    #[test]
    fn allowed_clinics_empty_without_memberships() {
        let index = sample_index();
        let organizations = [organization("o9", &["c1"])];
        assert!(index
            .allowed_clinic_ids("u1", organizations.iter())
            .is_empty());
        assert!(index
            .allowed_clinic_ids("nobody", organizations.iter())
            .is_empty());
    }
}

// =============================================================================
// Partition property over generated assignment lists
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_assignments() -> impl Strategy<Value = Vec<UserRole>> {
        let domain = prop_oneof![
            Just(DomainType::Organization),
            Just(DomainType::Clinic),
            Just(DomainType::Location),
            Just(DomainType::Cloud),
        ];
        prop::collection::vec((0..6u32, 0..4u32, domain, 0..5u32), 0..40).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(n, (user, role, domain_type, dom))| UserRole {
                    id: format!("ur{}", n),
                    user_id: format!("u{}", user),
                    role_id: format!("r{}", role),
                    domain_type,
                    domain_id: if dom == 0 {
                        WILDCARD_DOMAIN_ID.to_string()
                    } else {
                        format!("d{}", dom)
                    },
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn index_partitions_every_axis(assignments in arb_assignments()) {
            let total = assignments.len();
            let mut index = UserRoleIndex::new();
            index.replace_all(assignments.clone());
            prop_assert_eq!(index.len(), total);

            for user_role in &assignments {
                let in_user = index
                    .user_roles_for_user(&user_role.user_id)
                    .iter()
                    .filter(|ur| ur.id == user_role.id)
                    .count();
                let in_role = index
                    .user_roles_for_role(&user_role.role_id)
                    .iter()
                    .filter(|ur| ur.id == user_role.id)
                    .count();
                let in_domain = index
                    .user_roles_for_domain(user_role.domain_type, &user_role.domain_id)
                    .iter()
                    .filter(|ur| ur.id == user_role.id)
                    .count();
                prop_assert_eq!((in_user, in_role, in_domain), (1, 1, 1));
            }
        }

        #[test]
        fn removal_never_leaves_danglers(assignments in arb_assignments()) {
            let mut index = UserRoleIndex::new();
            index.replace_all(assignments.clone());
            for user_role in &assignments {
                index.remove(&user_role.id);
                prop_assert!(index
                    .user_roles_for_user(&user_role.user_id)
                    .iter()
                    .all(|ur| ur.id != user_role.id));
                prop_assert!(index
                    .user_roles_for_domain(user_role.domain_type, &user_role.domain_id)
                    .iter()
                    .all(|ur| ur.id != user_role.id));
            }
            prop_assert!(index.is_empty());
        }
    }
}
