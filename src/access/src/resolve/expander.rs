//! Single-reference expansion

use std::sync::Arc;
use tracing::trace;

use crate::membership::MembershipIndex;
use crate::store::cache::{ContractDirectory, EmployeeDirectory, TagDirectory};
use crate::types::{EmployeeId, ReferenceKind};

/// Converts one `(kind, id)` reference into concrete employee ids
///
/// Expansion rules differ by kind:
/// - direct employee references pass through unconditionally, with no
///   existence or activity check;
/// - tag, contract, and project references resolve to the referenced
///   population filtered to active employees.
///
/// An id absent from its collection expands to nothing. Absent
/// references are routine (a tag deleted after a role was authored,
/// say), not exceptional.
pub struct Expander<M> {
    employees: Arc<EmployeeDirectory>,
    tags: Arc<TagDirectory>,
    contracts: Arc<ContractDirectory>,
    membership: Arc<M>,
}

impl<M: MembershipIndex> Expander<M> {
    /// Build an expander over one snapshot of the cached directories
    pub fn new(
        employees: Arc<EmployeeDirectory>,
        tags: Arc<TagDirectory>,
        contracts: Arc<ContractDirectory>,
        membership: Arc<M>,
    ) -> Self {
        Self {
            employees,
            tags,
            contracts,
            membership,
        }
    }

    /// The employee roster backing this expander
    pub fn roster(&self) -> &EmployeeDirectory {
        &self.employees
    }

    /// Expand one reference into employee ids
    pub fn expand(&self, kind: ReferenceKind, id: &str) -> Vec<EmployeeId> {
        let expanded = match kind {
            ReferenceKind::Employees => vec![id.to_string()],
            ReferenceKind::Tags => self
                .tags
                .get(id)
                .map(|tag| {
                    tag.employees
                        .iter()
                        .filter(|employee_id| self.employees.is_active(employee_id))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            ReferenceKind::Contracts => self
                .contracts
                .get(id)
                .map(|contract| {
                    self.active_only(
                        self.membership
                            .contract_employees(contract, &self.employees),
                    )
                })
                .unwrap_or_default(),
            ReferenceKind::Projects => self
                .contracts
                .project(id)
                .map(|project| {
                    self.active_only(
                        self.membership.project_employees(project, &self.employees),
                    )
                })
                .unwrap_or_default(),
        };
        trace!(kind = %kind, id, count = expanded.len(), "reference expanded");
        expanded
    }

    fn active_only(&self, ids: Vec<EmployeeId>) -> Vec<EmployeeId> {
        ids.into_iter()
            .filter(|id| self.employees.is_active(id))
            .collect()
    }
}
