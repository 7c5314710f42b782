//! Fetch-once entity cache
//!
//! Employees, tags, and contracts are fetched at most once per process
//! and indexed into directories on fill; later callers share the
//! stored result, and callers racing on an empty slot are coalesced
//! into a single backing fetch. Roles are deliberately excluded: role
//! edits must take effect on the very next query, so every query
//! refetches them. There is no TTL and no invalidation API.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use super::EntityStore;
use crate::error::{AccessError, Result};
use crate::types::{
    CollectionKind, Contract, ContractId, Employee, EmployeeId, Project, Role, Tag, TagId,
};

/// Employee roster indexed by id
///
/// Keeps the store's record order so full-roster expansions are
/// reproducible.
#[derive(Debug, Clone)]
pub struct EmployeeDirectory {
    records: Vec<Employee>,
    index: HashMap<EmployeeId, usize>,
}

impl EmployeeDirectory {
    /// Index a fetched employee collection
    pub fn new(records: Vec<Employee>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, employee)| (employee.id.clone(), position))
            .collect();
        Self { records, index }
    }

    /// Look up one employee by id
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Whether the employee exists and is active
    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).map(Employee::is_active).unwrap_or(false)
    }

    /// All employee ids in roster order
    pub fn ids(&self) -> impl Iterator<Item = &EmployeeId> {
        self.records.iter().map(|employee| &employee.id)
    }

    /// All employee records in roster order
    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.records.iter()
    }

    /// Number of employees in the roster
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Tags indexed by id
#[derive(Debug, Clone)]
pub struct TagDirectory {
    index: HashMap<TagId, Tag>,
}

impl TagDirectory {
    /// Index a fetched tag collection
    pub fn new(records: Vec<Tag>) -> Self {
        let index = records.into_iter().map(|tag| (tag.id.clone(), tag)).collect();
        Self { index }
    }

    /// Look up one tag by id
    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.index.get(id)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Contracts indexed by id, with project lookup across contracts
#[derive(Debug, Clone)]
pub struct ContractDirectory {
    index: HashMap<ContractId, Contract>,
}

impl ContractDirectory {
    /// Index a fetched contract collection
    pub fn new(records: Vec<Contract>) -> Self {
        let index = records
            .into_iter()
            .map(|contract| (contract.id.clone(), contract))
            .collect();
        Self { index }
    }

    /// Look up one contract by id
    pub fn get(&self, id: &str) -> Option<&Contract> {
        self.index.get(id)
    }

    /// Locate a project by id across all contracts
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.index
            .values()
            .flat_map(|contract| contract.projects.iter())
            .find(|project| project.id == id)
    }

    /// Number of contracts
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Statistics about cache performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups served from a filled slot
    pub hits: usize,
    /// Number of lookups that had to fill a slot
    pub misses: usize,
    /// Number of filled collection slots
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Fetch-once memoization over an [`EntityStore`]
///
/// One slot per cached collection; the slot is filled by whichever
/// caller arrives first and every other caller, concurrent or later,
/// shares the stored result. A failed fill stores nothing, so the
/// next caller retries the fetch. `roles()` bypasses the cache
/// entirely.
pub struct EntityCache<S> {
    store: S,
    employees: OnceCell<Arc<EmployeeDirectory>>,
    tags: OnceCell<Arc<TagDirectory>>,
    contracts: OnceCell<Arc<ContractDirectory>>,
    stats: DashMap<String, usize>,
}

impl<S: EntityStore> EntityCache<S> {
    /// Wrap a store in a fetch-once cache
    pub fn new(store: S) -> Self {
        Self {
            store,
            employees: OnceCell::new(),
            tags: OnceCell::new(),
            contracts: OnceCell::new(),
            stats: DashMap::new(),
        }
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The employee roster, fetched and indexed at most once
    pub async fn employees(&self) -> Result<Arc<EmployeeDirectory>> {
        if let Some(directory) = self.employees.get() {
            self.increment_stat("employees_hits");
            return Ok(Arc::clone(directory));
        }
        self.increment_stat("employees_misses");

        let directory = self
            .employees
            .get_or_try_init(|| async {
                debug!(collection = %CollectionKind::Employees, "filling entity cache");
                let records = self.store.fetch_employees().await?;
                Ok::<_, AccessError>(Arc::new(EmployeeDirectory::new(records)))
            })
            .await?;
        Ok(Arc::clone(directory))
    }

    /// The tag directory, fetched and indexed at most once
    pub async fn tags(&self) -> Result<Arc<TagDirectory>> {
        if let Some(directory) = self.tags.get() {
            self.increment_stat("tags_hits");
            return Ok(Arc::clone(directory));
        }
        self.increment_stat("tags_misses");

        let directory = self
            .tags
            .get_or_try_init(|| async {
                debug!(collection = %CollectionKind::Tags, "filling entity cache");
                let records = self.store.fetch_tags().await?;
                Ok::<_, AccessError>(Arc::new(TagDirectory::new(records)))
            })
            .await?;
        Ok(Arc::clone(directory))
    }

    /// The contract directory, fetched and indexed at most once
    pub async fn contracts(&self) -> Result<Arc<ContractDirectory>> {
        if let Some(directory) = self.contracts.get() {
            self.increment_stat("contracts_hits");
            return Ok(Arc::clone(directory));
        }
        self.increment_stat("contracts_misses");

        let directory = self
            .contracts
            .get_or_try_init(|| async {
                debug!(collection = %CollectionKind::Contracts, "filling entity cache");
                let records = self.store.fetch_contracts().await?;
                Ok::<_, AccessError>(Arc::new(ContractDirectory::new(records)))
            })
            .await?;
        Ok(Arc::clone(directory))
    }

    /// The roles collection, fetched fresh on every call
    pub async fn roles(&self) -> Result<Vec<Role>> {
        self.store.fetch_roles().await
    }

    /// Returns cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.get_stat("employees_hits")
            + self.get_stat("tags_hits")
            + self.get_stat("contracts_hits");
        let misses = self.get_stat("employees_misses")
            + self.get_stat("tags_misses")
            + self.get_stat("contracts_misses");
        let entries = [
            self.employees.initialized(),
            self.tags.initialized(),
            self.contracts.initialized(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count();

        CacheStats {
            hits,
            misses,
            entries,
        }
    }

    fn increment_stat(&self, key: &str) {
        self.stats
            .entry(key.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}
