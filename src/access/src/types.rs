//! Core record model for access resolution

use serde::{Deserialize, Serialize};

/// Unique employee identifier
pub type EmployeeId = String;

/// Unique tag identifier
pub type TagId = String;

/// Unique contract identifier
pub type ContractId = String;

/// Unique project identifier
pub type ProjectId = String;

/// Unique role identifier
pub type RoleId = String;

/// Employee record as persisted by the portal
///
/// Only the fields the resolution engine consumes are modeled here;
/// the surrounding service layer owns the full employee document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee identifier
    pub id: EmployeeId,

    /// Employment status code; anything above zero counts as active
    #[serde(default)]
    pub work_status: i64,
}

impl Employee {
    /// Create a new employee record
    pub fn new(id: impl Into<String>, work_status: i64) -> Self {
        Self {
            id: id.into(),
            work_status,
        }
    }

    /// Shorthand for an active employee (`work_status = 1`)
    pub fn active(id: impl Into<String>) -> Self {
        Self::new(id, 1)
    }

    /// Shorthand for an inactive employee (`work_status = 0`)
    pub fn inactive(id: impl Into<String>) -> Self {
        Self::new(id, 0)
    }

    /// Whether this employee is currently employed
    pub fn is_active(&self) -> bool {
        self.work_status > 0
    }
}

/// Tag with direct employee membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag identifier
    pub id: TagId,

    /// Employees carrying this tag
    #[serde(default)]
    pub employees: Vec<EmployeeId>,
}

impl Tag {
    /// Create a new tag record
    pub fn new(id: impl Into<String>, employees: Vec<EmployeeId>) -> Self {
        Self {
            id: id.into(),
            employees,
        }
    }
}

/// Project nested inside a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier
    pub id: ProjectId,

    /// Human-readable project name
    #[serde(default)]
    pub name: String,
}

impl Project {
    /// Create a new project record
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Contract record; employee membership is resolved through the
/// external [`MembershipIndex`](crate::membership::MembershipIndex),
/// never stored on the record itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Contract identifier
    pub id: ContractId,

    /// Projects billed under this contract
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Contract {
    /// Create a new contract record
    pub fn new(id: impl Into<String>, projects: Vec<Project>) -> Self {
        Self {
            id: id.into(),
            projects,
        }
    }
}

/// Presentation flags attached to a role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleFlags {
    /// Whether the role is listed on member profile pages;
    /// absent means shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on_member_profile: Option<bool>,
}

/// Role (access group): a named policy template grouping one or more
/// assignments
///
/// `name` is the grouping key for query result maps and is expected to
/// be unique across the roles collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role identifier
    pub id: RoleId,

    /// Unique role name (e.g. "Project Manager")
    pub name: String,

    /// Presentation flags
    #[serde(default)]
    pub flags: RoleFlags,

    /// Leader/governed pairings declared on this role
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Role {
    /// Create a new role with no assignments
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flags: RoleFlags::default(),
            assignments: Vec::new(),
        }
    }

    /// Append an assignment
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Replace the presentation flags
    pub fn with_flags(mut self, flags: RoleFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// One users/members pairing inside a role
///
/// The two sides are asymmetric: `users` are the leaders, `members`
/// are the governed population.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assignment name
    #[serde(default)]
    pub name: String,

    /// Leader references
    #[serde(default)]
    pub users: ReferenceBundle,

    /// Governed references
    #[serde(default)]
    pub members: ReferenceBundle,
}

impl Assignment {
    /// Create a new empty assignment
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the leader bundle
    pub fn with_users(mut self, users: ReferenceBundle) -> Self {
        self.users = users;
        self
    }

    /// Set the governed bundle
    pub fn with_members(mut self, members: ReferenceBundle) -> Self {
        self.members = members;
        self
    }

    /// Select the bundle for one side of the pairing
    pub fn bundle(&self, side: Side) -> &ReferenceBundle {
        match side {
            Side::Users => &self.users,
            Side::Members => &self.members,
        }
    }
}

/// Four parallel reference-type lists representing a unioned employee
/// set
///
/// A record missing any of the lists deserializes with that list
/// empty; a malformed bundle is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceBundle {
    /// Directly referenced employees
    pub employees: Vec<EmployeeId>,

    /// Referenced tags
    pub tags: Vec<TagId>,

    /// Referenced contracts
    pub contracts: Vec<ContractId>,

    /// Referenced projects
    pub projects: Vec<ProjectId>,
}

impl ReferenceBundle {
    /// Bundle referencing only employees
    pub fn of_employees(ids: Vec<EmployeeId>) -> Self {
        Self {
            employees: ids,
            ..Self::default()
        }
    }

    /// Bundle referencing only tags
    pub fn of_tags(ids: Vec<TagId>) -> Self {
        Self {
            tags: ids,
            ..Self::default()
        }
    }

    /// Bundle referencing only contracts
    pub fn of_contracts(ids: Vec<ContractId>) -> Self {
        Self {
            contracts: ids,
            ..Self::default()
        }
    }

    /// Bundle referencing only projects
    pub fn of_projects(ids: Vec<ProjectId>) -> Self {
        Self {
            projects: ids,
            ..Self::default()
        }
    }

    /// The id list for one reference kind
    pub fn ids(&self, kind: ReferenceKind) -> &[String] {
        match kind {
            ReferenceKind::Employees => &self.employees,
            ReferenceKind::Tags => &self.tags,
            ReferenceKind::Contracts => &self.contracts,
            ReferenceKind::Projects => &self.projects,
        }
    }

    /// Whether all four lists are empty
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
            && self.tags.is_empty()
            && self.contracts.is_empty()
            && self.projects.is_empty()
    }
}

/// Kind of a single reference inside a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Employees,
    Tags,
    Contracts,
    Projects,
}

impl ReferenceKind {
    /// All kinds in expansion order
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Employees,
        ReferenceKind::Tags,
        ReferenceKind::Contracts,
        ReferenceKind::Projects,
    ];

    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::Employees => "employees",
            ReferenceKind::Tags => "tags",
            ReferenceKind::Contracts => "contracts",
            ReferenceKind::Projects => "projects",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of an assignment: leaders or governed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Leaders of the assignment
    Users,
    /// Governed population of the assignment
    Members,
}

impl Side {
    /// The opposite side (`Users` ↔ `Members`)
    pub fn opposite(self) -> Side {
        match self {
            Side::Users => Side::Members,
            Side::Members => Side::Users,
        }
    }

    /// Wire name of the side
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Users => "users",
            Side::Members => "members",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four backing collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Employees,
    Tags,
    Contracts,
    Roles,
}

impl CollectionKind {
    /// Collection name as known to the backing store
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Employees => "employees",
            CollectionKind::Tags => "tags",
            CollectionKind::Contracts => "contracts",
            CollectionKind::Roles => "roles",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
