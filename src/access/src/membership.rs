//! Contract and project membership collaborator
//!
//! Contract records do not store their employees directly; membership
//! is derived elsewhere in the platform (staffing tables, allocation
//! feeds). The engine consumes that knowledge through the
//! [`MembershipIndex`] seam and stays agnostic of how it is computed.

use std::collections::HashMap;

use crate::store::cache::EmployeeDirectory;
use crate::types::{Contract, ContractId, EmployeeId, Project, ProjectId};

/// Membership lookup collaborator
///
/// Both calls are pure functions of the record and the roster handed
/// in; implementations must not block.
pub trait MembershipIndex: Send + Sync {
    /// Employees assigned to a contract
    fn contract_employees(
        &self,
        contract: &Contract,
        roster: &EmployeeDirectory,
    ) -> Vec<EmployeeId>;

    /// Employees assigned to a project
    fn project_employees(
        &self,
        project: &Project,
        roster: &EmployeeDirectory,
    ) -> Vec<EmployeeId>;
}

/// Map-backed membership index
///
/// Used by tests and fixtures; production deployments inject an index
/// backed by the staffing service.
#[derive(Debug, Clone, Default)]
pub struct StaticMembershipIndex {
    contracts: HashMap<ContractId, Vec<EmployeeId>>,
    projects: HashMap<ProjectId, Vec<EmployeeId>>,
}

impl StaticMembershipIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign employees to a contract
    pub fn with_contract(
        mut self,
        id: impl Into<String>,
        employees: Vec<EmployeeId>,
    ) -> Self {
        self.contracts.insert(id.into(), employees);
        self
    }

    /// Assign employees to a project
    pub fn with_project(
        mut self,
        id: impl Into<String>,
        employees: Vec<EmployeeId>,
    ) -> Self {
        self.projects.insert(id.into(), employees);
        self
    }
}

impl MembershipIndex for StaticMembershipIndex {
    fn contract_employees(
        &self,
        contract: &Contract,
        roster: &EmployeeDirectory,
    ) -> Vec<EmployeeId> {
        self.contracts
            .get(&contract.id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| roster.get(id).is_some())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn project_employees(
        &self,
        project: &Project,
        roster: &EmployeeDirectory,
    ) -> Vec<EmployeeId> {
        self.projects
            .get(&project.id)
            .map(|ids| {
                ids.iter()
                    .filter(|id| roster.get(id).is_some())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Employee;

    #[test]
    fn test_static_index_lookup() {
        let roster = EmployeeDirectory::new(vec![
            Employee::active("e1"),
            Employee::active("e2"),
        ]);
        let index = StaticMembershipIndex::new()
            .with_contract("c1", vec!["e1".to_string(), "e2".to_string()])
            .with_project("p1", vec!["e2".to_string()]);

        let contract = Contract::new("c1", vec![]);
        assert_eq!(index.contract_employees(&contract, &roster), ["e1", "e2"]);

        let project = Project::new("p1", "Rollout");
        assert_eq!(index.project_employees(&project, &roster), ["e2"]);
    }

    #[test]
    fn test_static_index_unknown_and_off_roster() {
        let roster = EmployeeDirectory::new(vec![Employee::active("e1")]);
        let index = StaticMembershipIndex::new()
            .with_contract("c1", vec!["e1".to_string(), "ghost".to_string()]);

        // Unknown contract yields nothing.
        let unknown = Contract::new("c9", vec![]);
        assert!(index.contract_employees(&unknown, &roster).is_empty());

        // Assignments pointing outside the roster are dropped.
        let contract = Contract::new("c1", vec![]);
        assert_eq!(index.contract_employees(&contract, &roster), ["e1"]);
    }
}
