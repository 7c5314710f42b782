//! Entity store contract and in-memory implementation
//!
//! The engine consumes one bulk read per backing collection and never
//! writes. Retry and backoff live with the storage collaborator, not
//! here; a failed fetch surfaces to the query caller unmodified.

pub mod cache;

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::error::{AccessError, Result};
use crate::types::{CollectionKind, Contract, Employee, Role, Tag};

/// Bulk-read access to the four backing collections
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetch every employee record
    async fn fetch_employees(&self) -> Result<Vec<Employee>>;

    /// Fetch every tag record
    async fn fetch_tags(&self) -> Result<Vec<Tag>>;

    /// Fetch every contract record
    async fn fetch_contracts(&self) -> Result<Vec<Contract>>;

    /// Fetch every role record
    async fn fetch_roles(&self) -> Result<Vec<Role>>;
}

/// In-memory entity store
///
/// Backs tests and fixtures. Each fetch is counted per collection so
/// callers can assert how often the backing store was actually hit,
/// and individual collections can be made to fail or to respond
/// slowly.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    employees: RwLock<Vec<Employee>>,
    tags: RwLock<Vec<Tag>>,
    contracts: RwLock<Vec<Contract>>,
    roles: RwLock<Vec<Role>>,
    failing: DashMap<CollectionKind, String>,
    fetch_counts: DashMap<CollectionKind, usize>,
    fetch_delay: Option<Duration>,
}

impl InMemoryEntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the employees collection
    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = RwLock::new(employees);
        self
    }

    /// Seed the tags collection
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = RwLock::new(tags);
        self
    }

    /// Seed the contracts collection
    pub fn with_contracts(mut self, contracts: Vec<Contract>) -> Self {
        self.contracts = RwLock::new(contracts);
        self
    }

    /// Seed the roles collection
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = RwLock::new(roles);
        self
    }

    /// Delay every fetch, so racing callers genuinely overlap
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Replace the roles collection in place
    ///
    /// Role edits must be visible to the next query without any cache
    /// interaction, which this simulates.
    pub async fn replace_roles(&self, roles: Vec<Role>) {
        *self.roles.write().await = roles;
    }

    /// Make fetches of one collection fail with the given message
    pub fn set_failing(&self, collection: CollectionKind, message: impl Into<String>) {
        self.failing.insert(collection, message.into());
    }

    /// Restore a failing collection
    pub fn clear_failing(&self, collection: CollectionKind) {
        self.failing.remove(&collection);
    }

    /// How many times a collection has been fetched
    pub fn fetch_count(&self, collection: CollectionKind) -> usize {
        self.fetch_counts.get(&collection).map(|v| *v).unwrap_or(0)
    }

    async fn observe(&self, collection: CollectionKind) -> Result<()> {
        *self.fetch_counts.entry(collection).or_insert(0) += 1;
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.failing.get(&collection) {
            return Err(AccessError::fetch(collection, message.value().clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        self.observe(CollectionKind::Employees).await?;
        Ok(self.employees.read().await.clone())
    }

    async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        self.observe(CollectionKind::Tags).await?;
        Ok(self.tags.read().await.clone())
    }

    async fn fetch_contracts(&self) -> Result<Vec<Contract>> {
        self.observe(CollectionKind::Contracts).await?;
        Ok(self.contracts.read().await.clone())
    }

    async fn fetch_roles(&self) -> Result<Vec<Role>> {
        self.observe(CollectionKind::Roles).await?;
        Ok(self.roles.read().await.clone())
    }
}
