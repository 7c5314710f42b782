use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use super::{Resolver, UniversalRolePolicy};
use crate::membership::StaticMembershipIndex;
use crate::store::cache::{ContractDirectory, EmployeeDirectory, TagDirectory};
use crate::types::{
    Assignment, Contract, Employee, Project, ReferenceBundle, ReferenceKind, Role, Side, Tag,
};

fn fixture_resolver() -> Resolver<StaticMembershipIndex> {
    // Roster: e1..e3 active, e4 inactive.
    let employees = EmployeeDirectory::new(vec![
        Employee::active("e1"),
        Employee::active("e2"),
        Employee::active("e3"),
        Employee::inactive("e4"),
    ]);
    let tags = TagDirectory::new(vec![
        Tag::new("t1", vec!["e1".to_string(), "e4".to_string()]),
        Tag::new("t2", vec!["e2".to_string(), "e3".to_string()]),
    ]);
    let contracts = ContractDirectory::new(vec![
        Contract::new("c1", vec![Project::new("p1", "Rollout")]),
        Contract::new("c2", vec![]),
    ]);
    let membership = StaticMembershipIndex::new()
        .with_contract("c1", vec!["e2".to_string(), "e4".to_string()])
        .with_project("p1", vec!["e3".to_string(), "e4".to_string()]);

    Resolver::new(
        Arc::new(employees),
        Arc::new(tags),
        Arc::new(contracts),
        Arc::new(membership),
        UniversalRolePolicy::default(),
    )
}

fn set_of(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_employee_reference_passes_through() {
    let resolver = fixture_resolver();
    let bundle = ReferenceBundle::of_employees(vec!["e4".to_string(), "ghost".to_string()]);

    // Direct references skip both the existence and the activity
    // check.
    assert_eq!(resolver.expand_bundle(&bundle), set_of(&["e4", "ghost"]));
}

#[test]
fn test_tag_expansion_filters_inactive() {
    let resolver = fixture_resolver();
    let bundle = ReferenceBundle::of_tags(vec!["t1".to_string()]);

    assert_eq!(resolver.expand_bundle(&bundle), set_of(&["e1"]));
}

#[test]
fn test_unknown_references_expand_to_nothing() {
    let resolver = fixture_resolver();

    for bundle in [
        ReferenceBundle::of_tags(vec!["t9".to_string()]),
        ReferenceBundle::of_contracts(vec!["c9".to_string()]),
        ReferenceBundle::of_projects(vec!["p9".to_string()]),
    ] {
        assert!(resolver.expand_bundle(&bundle).is_empty());
    }
}

#[test]
fn test_contract_and_project_expansion() {
    let resolver = fixture_resolver();

    // c1 staffs e2 (active) and e4 (inactive).
    let contracts = ReferenceBundle::of_contracts(vec!["c1".to_string()]);
    assert_eq!(resolver.expand_bundle(&contracts), set_of(&["e2"]));

    // p1 staffs e3 (active) and e4 (inactive); the project is found
    // through its owning contract.
    let projects = ReferenceBundle::of_projects(vec!["p1".to_string()]);
    assert_eq!(resolver.expand_bundle(&projects), set_of(&["e3"]));

    // c2 exists but has no membership entries.
    let empty = ReferenceBundle::of_contracts(vec!["c2".to_string()]);
    assert!(resolver.expand_bundle(&empty).is_empty());
}

#[test]
fn test_active_filter_asymmetry() {
    let resolver = fixture_resolver();

    // e4 is inactive: excluded when reached through tag t1, included
    // when referenced directly in the same bundle.
    let via_tag = ReferenceBundle::of_tags(vec!["t1".to_string()]);
    assert!(!resolver.expand_bundle(&via_tag).contains("e4"));

    let direct = ReferenceBundle {
        employees: vec!["e4".to_string()],
        tags: vec!["t1".to_string()],
        ..ReferenceBundle::default()
    };
    assert_eq!(resolver.expand_bundle(&direct), set_of(&["e1", "e4"]));
}

#[test]
fn test_bundle_union_matches_individual_expansions() {
    let resolver = fixture_resolver();
    let bundle = ReferenceBundle {
        employees: vec!["e1".to_string()],
        tags: vec!["t2".to_string()],
        ..ReferenceBundle::default()
    };

    let combined = resolver.expand_bundle(&bundle);
    let mut expected =
        resolver.expand_bundle(&ReferenceBundle::of_employees(vec!["e1".to_string()]));
    expected.extend(resolver.expand_bundle(&ReferenceBundle::of_tags(vec!["t2".to_string()])));

    assert_eq!(combined, expected);
    assert_eq!(combined, set_of(&["e1", "e2", "e3"]));
}

#[test]
fn test_universal_role_members_side() {
    let resolver = fixture_resolver();
    let admin = Role::new("r1", "Admin");
    let assignment = Assignment::new("admins")
        .with_users(ReferenceBundle::of_employees(vec!["e1".to_string()]))
        .with_members(ReferenceBundle::default());

    // The declared (empty) members bundle is bypassed; the whole
    // roster comes back, inactive employees included.
    let members = resolver.expand_side(&admin, Side::Members, &assignment);
    assert_eq!(members, set_of(&["e1", "e2", "e3", "e4"]));

    // The users side expands normally.
    let users = resolver.expand_side(&admin, Side::Users, &assignment);
    assert_eq!(users, set_of(&["e1"]));
}

#[test]
fn test_universal_role_ignores_other_names() {
    let resolver = fixture_resolver();
    let role = Role::new("r2", "Project Manager");
    let assignment =
        Assignment::new("pm").with_members(ReferenceBundle::of_tags(vec!["t1".to_string()]));

    let members = resolver.expand_side(&role, Side::Members, &assignment);
    assert_eq!(members, set_of(&["e1"]));
}

#[test]
fn test_universal_role_policy_applies() {
    let policy = UniversalRolePolicy::default();
    let admin = Role::new("r1", "Admin");
    let other = Role::new("r2", "Operations");

    assert!(policy.applies(&admin, Side::Members));
    assert!(!policy.applies(&admin, Side::Users));
    assert!(!policy.applies(&other, Side::Members));

    let renamed = UniversalRolePolicy::named("Superuser");
    assert_eq!(renamed.role_name(), "Superuser");
    assert!(!renamed.applies(&admin, Side::Members));
    assert!(renamed.applies(&Role::new("r3", "Superuser"), Side::Members));
}

proptest! {
    // Direct references are pass-through, so a bundle of employee ids
    // must resolve to exactly the deduplicated id set no matter how
    // many times an id repeats.
    #[test]
    fn prop_direct_expansion_deduplicates(ids in proptest::collection::vec("[a-e][0-9]", 0..20)) {
        let resolver = fixture_resolver();
        let bundle = ReferenceBundle::of_employees(ids.clone());

        let expanded = resolver.expand_bundle(&bundle);
        let expected: BTreeSet<String> = ids.into_iter().collect();
        prop_assert_eq!(expanded, expected);
    }

    // Resolution is a pure function of the snapshot.
    #[test]
    fn prop_expansion_is_stable(ids in proptest::collection::vec("[a-e][0-9]", 0..10)) {
        let resolver = fixture_resolver();
        let bundle = ReferenceBundle {
            employees: ids,
            tags: vec!["t1".to_string(), "t2".to_string()],
            ..ReferenceBundle::default()
        };

        prop_assert_eq!(resolver.expand_bundle(&bundle), resolver.expand_bundle(&bundle));
    }
}

#[test]
fn test_expansion_order_is_fixed() {
    assert_eq!(
        ReferenceKind::ALL,
        [
            ReferenceKind::Employees,
            ReferenceKind::Tags,
            ReferenceKind::Contracts,
            ReferenceKind::Projects,
        ]
    );
}
