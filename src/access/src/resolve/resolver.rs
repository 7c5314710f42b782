//! Bundle resolution with the universal-role override

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Expander, UniversalRolePolicy};
use crate::membership::MembershipIndex;
use crate::store::cache::{ContractDirectory, EmployeeDirectory, TagDirectory};
use crate::types::{Assignment, EmployeeId, ReferenceBundle, ReferenceKind, Role, Side};

/// Unions reference expansions across a bundle
///
/// A resolver works over one snapshot of the cached directories, so
/// every expansion within a query observes the same collections.
pub struct Resolver<M> {
    expander: Expander<M>,
    policy: UniversalRolePolicy,
}

impl<M: MembershipIndex> Resolver<M> {
    /// Build a resolver over one snapshot of the cached directories
    pub fn new(
        employees: Arc<EmployeeDirectory>,
        tags: Arc<TagDirectory>,
        contracts: Arc<ContractDirectory>,
        membership: Arc<M>,
        policy: UniversalRolePolicy,
    ) -> Self {
        Self {
            expander: Expander::new(employees, tags, contracts, membership),
            policy,
        }
    }

    /// Expand every reference in a bundle and union the results
    ///
    /// Kinds are walked in fixed order (employees, tags, contracts,
    /// projects); set semantics deduplicate employees reachable
    /// through more than one reference.
    pub fn expand_bundle(&self, bundle: &ReferenceBundle) -> BTreeSet<EmployeeId> {
        let mut union = BTreeSet::new();
        for kind in ReferenceKind::ALL {
            for id in bundle.ids(kind) {
                union.extend(self.expander.expand(kind, id));
            }
        }
        union
    }

    /// Expand one side of an assignment, honoring the universal role
    ///
    /// When the policy applies (the admin group's `members` side) the
    /// declared bundle is bypassed entirely and the full roster is
    /// returned, with no active filter.
    pub fn expand_side(
        &self,
        role: &Role,
        side: Side,
        assignment: &Assignment,
    ) -> BTreeSet<EmployeeId> {
        if self.policy.applies(role, side) {
            return self.expander.roster().ids().cloned().collect();
        }
        self.expand_bundle(assignment.bundle(side))
    }

    /// The policy consulted before generic expansion
    pub fn policy(&self) -> &UniversalRolePolicy {
        &self.policy
    }
}
