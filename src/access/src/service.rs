//! Top-level role queries
//!
//! Every query walks all roles and all assignments with a fresh roles
//! fetch, so policy edits are visible immediately, while the employee,
//! tag, and contract collections come from the fetch-once cache.
//! Queries are pure functions of those collections at call time; no
//! state survives between calls.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::membership::MembershipIndex;
use crate::resolve::{Resolver, UniversalRolePolicy};
use crate::store::cache::EntityCache;
use crate::store::EntityStore;
use crate::types::{EmployeeId, ReferenceKind, Role, Side};

/// Role-level predicate used to skip whole roles before any expansion
/// work
pub type RolePredicate = dyn Fn(&Role) -> bool + Send + Sync;

/// Predicate keeping only roles listed on member profile pages
///
/// A role without the flag is shown.
pub fn shown_on_member_profile(role: &Role) -> bool {
    role.flags.show_on_member_profile.unwrap_or(true)
}

/// Directional role queries over the cached collections
///
/// The service owns no mutable state of its own; the only shared
/// state underneath is the entity cache's per-collection slot.
pub struct RoleQueryService<S, M> {
    cache: Arc<EntityCache<S>>,
    membership: Arc<M>,
    policy: UniversalRolePolicy,
}

impl<S: EntityStore, M: MembershipIndex> RoleQueryService<S, M> {
    /// Create a service with the default universal-role policy
    pub fn new(cache: Arc<EntityCache<S>>, membership: Arc<M>) -> Self {
        Self::with_policy(cache, membership, UniversalRolePolicy::default())
    }

    /// Create a service with a custom universal-role policy
    pub fn with_policy(
        cache: Arc<EntityCache<S>>,
        membership: Arc<M>,
        policy: UniversalRolePolicy,
    ) -> Self {
        Self {
            cache,
            membership,
            policy,
        }
    }

    /// The entity cache backing this service
    pub fn cache(&self) -> &EntityCache<S> {
        &self.cache
    }

    /// Counterpart employees across all roles, flattened
    ///
    /// For each assignment whose `side` expansion contains
    /// `employee_id`, the opposite side's expansion is unioned into
    /// the result. With `side = Users` this answers "who does this
    /// employee lead"; with `side = Members`, "who leads this
    /// employee".
    #[instrument(skip(self))]
    pub async fn get_employees(
        &self,
        employee_id: &str,
        side: Side,
    ) -> Result<Vec<EmployeeId>> {
        let roles = self.cache.roles().await?;
        let resolver = self.resolver().await?;
        let other_side = side.opposite();

        let mut result = BTreeSet::new();
        for role in &roles {
            for assignment in &role.assignments {
                if resolver.expand_side(role, side, assignment).contains(employee_id) {
                    result.extend(resolver.expand_side(role, other_side, assignment));
                }
            }
        }

        debug!(count = result.len(), "resolved counterpart employees");
        Ok(result.into_iter().collect())
    }

    /// Counterpart employees grouped by role name
    ///
    /// Same traversal as [`get_employees`](Self::get_employees), but
    /// grouped by role name. A role the employee appears in is listed
    /// even when the counterpart side resolves to nothing. The
    /// optional predicate skips whole roles before any expansion work
    /// is spent on them.
    #[instrument(skip(self, filter))]
    pub async fn get_roled_employees(
        &self,
        employee_id: &str,
        side: Side,
        filter: Option<&RolePredicate>,
    ) -> Result<HashMap<String, Vec<EmployeeId>>> {
        let roles = self.cache.roles().await?;
        let resolver = self.resolver().await?;
        let other_side = side.opposite();

        let mut result = HashMap::new();
        for role in &roles {
            if let Some(filter) = filter {
                if !filter(role) {
                    continue;
                }
            }

            let mut counterparts = BTreeSet::new();
            let mut matched = false;
            for assignment in &role.assignments {
                if resolver.expand_side(role, side, assignment).contains(employee_id) {
                    matched = true;
                    counterparts.extend(resolver.expand_side(role, other_side, assignment));
                }
            }
            if matched {
                result.insert(role.name.clone(), counterparts.into_iter().collect());
            }
        }

        debug!(roles = result.len(), "resolved counterpart employees by role");
        Ok(result)
    }

    /// Leaders per governed entity of one reference kind
    ///
    /// For every assignment with a non-empty resolved `users` side,
    /// each id of `kind` declared in that assignment's `members`
    /// bundle maps to those leaders. Assignments with zero resolved
    /// leaders contribute no mapping at all, even when their bundles
    /// list relevant ids.
    #[instrument(skip(self))]
    pub async fn get_type_leaders(
        &self,
        kind: ReferenceKind,
    ) -> Result<HashMap<String, Vec<EmployeeId>>> {
        let roles = self.cache.roles().await?;
        let resolver = self.resolver().await?;

        let mut leaders_by_entity: HashMap<String, BTreeSet<EmployeeId>> = HashMap::new();
        for role in &roles {
            for assignment in &role.assignments {
                let leaders = resolver.expand_side(role, Side::Users, assignment);
                if leaders.is_empty() {
                    continue;
                }
                for entity_id in assignment.members.ids(kind) {
                    leaders_by_entity
                        .entry(entity_id.clone())
                        .or_default()
                        .extend(leaders.iter().cloned());
                }
            }
        }

        debug!(entities = leaders_by_entity.len(), "resolved leaders by entity");
        Ok(leaders_by_entity
            .into_iter()
            .map(|(entity_id, leaders)| (entity_id, leaders.into_iter().collect()))
            .collect())
    }

    /// Snapshot the cached directories into a resolver
    ///
    /// Suspends only while a cold cache slot performs its one-time
    /// backing fetch.
    async fn resolver(&self) -> Result<Resolver<M>> {
        let employees = self.cache.employees().await?;
        let tags = self.cache.tags().await?;
        let contracts = self.cache.contracts().await?;
        Ok(Resolver::new(
            employees,
            tags,
            contracts,
            Arc::clone(&self.membership),
            self.policy.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoleFlags;

    #[test]
    fn test_shown_on_member_profile_defaults_to_shown() {
        let unset = Role::new("r1", "Payroll");
        assert!(shown_on_member_profile(&unset));

        let hidden = Role::new("r2", "Audit").with_flags(RoleFlags {
            show_on_member_profile: Some(false),
        });
        assert!(!shown_on_member_profile(&hidden));

        let shown = Role::new("r3", "Leads").with_flags(RoleFlags {
            show_on_member_profile: Some(true),
        });
        assert!(shown_on_member_profile(&shown));
    }
}
