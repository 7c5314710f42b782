//! # Tessera Access
//!
//! Access control resolution engine for the Tessera HR platform.
//!
//! Roles (access groups) declare assignments whose two sides, `users`
//! (leaders) and `members` (governed), reference employees directly or
//! indirectly through tags, contracts, and projects. This crate turns
//! those declarations into concrete employee-id sets in both
//! directions.
//!
//! ## Features
//!
//! - **Reference expansion** across four reference kinds, with the
//!   intentional activity asymmetry: direct employee references pass
//!   through unfiltered, indirect ones keep active employees only
//! - **Universal admin membership**: the admin group's `members` side
//!   resolves to the entire roster regardless of its declared bundles
//! - **Fetch-once caching** of the employee, tag, and contract
//!   collections with single-flight fills; roles are refetched on
//!   every query so policy edits apply immediately
//! - **Injected collaborators** for storage ([`EntityStore`]) and
//!   contract/project membership ([`MembershipIndex`])
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tessera_access::{
//!     Employee, EntityCache, InMemoryEntityStore, ReferenceBundle, Role,
//!     RoleQueryService, Side, StaticMembershipIndex, Assignment,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryEntityStore::new()
//!     .with_employees(vec![Employee::active("u1"), Employee::active("e2")])
//!     .with_roles(vec![Role::new("r1", "Team Lead").with_assignment(
//!         Assignment::new("leads")
//!             .with_users(ReferenceBundle::of_employees(vec!["u1".into()]))
//!             .with_members(ReferenceBundle::of_employees(vec!["e2".into()])),
//!     )]);
//!
//! let cache = Arc::new(EntityCache::new(store));
//! let service = RoleQueryService::new(cache, Arc::new(StaticMembershipIndex::new()));
//!
//! // Who does u1 lead?
//! let led = service.get_employees("u1", Side::Users).await?;
//! assert_eq!(led, vec!["e2".to_string()]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod membership;
pub mod resolve;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{AccessError, Result};
pub use membership::{MembershipIndex, StaticMembershipIndex};
pub use resolve::{Expander, Resolver, UniversalRolePolicy, DEFAULT_UNIVERSAL_ROLE};
pub use service::{shown_on_member_profile, RolePredicate, RoleQueryService};
pub use store::cache::{
    CacheStats, ContractDirectory, EmployeeDirectory, EntityCache, TagDirectory,
};
pub use store::{EntityStore, InMemoryEntityStore};
pub use types::{
    Assignment, CollectionKind, Contract, ContractId, Employee, EmployeeId, Project, ProjectId,
    ReferenceBundle, ReferenceKind, Role, RoleFlags, RoleId, Side, Tag, TagId,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
