//! Reference expansion and bundle resolution
//!
//! Turning declared references into concrete employee sets happens in
//! two layers: the [`Expander`] converts one `(kind, id)` reference
//! into employee ids, and the [`Resolver`] unions expansions across a
//! bundle and applies the universal-role override.

mod expander;
mod resolver;

#[cfg(test)]
mod tests;

pub use expander::Expander;
pub use resolver::Resolver;

use crate::types::{Role, Side};

/// Default name of the role that governs the entire population
pub const DEFAULT_UNIVERSAL_ROLE: &str = "Admin";

/// Policy marking one role's `members` side as the whole roster
///
/// The admin group conceptually governs every employee rather than an
/// enumerable membership list, so its `members` side resolves to the
/// full collection no matter what its bundles declare. The check
/// lives here, outside the generic expansion path, so it stays
/// visible and testable on its own.
#[derive(Debug, Clone)]
pub struct UniversalRolePolicy {
    role_name: String,
}

impl UniversalRolePolicy {
    /// Policy for a custom role name
    pub fn named(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
        }
    }

    /// The role name this policy watches for
    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    /// Whether the override applies to this role and side
    ///
    /// Only the `members` side is universal; the `users` side of the
    /// admin group expands like any other bundle.
    pub fn applies(&self, role: &Role, side: Side) -> bool {
        side == Side::Members && role.name == self.role_name
    }
}

impl Default for UniversalRolePolicy {
    fn default() -> Self {
        Self::named(DEFAULT_UNIVERSAL_ROLE)
    }
}
