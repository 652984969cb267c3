//! In-memory repository for tests and embedded use.

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    config::RepositoryConfig,
    entity::Entity,
    repository::ports::{
        Criteria, Page, PaginatedRepository, PaginationOptions, Repository, RepositoryError,
        RepositoryResult, SortOrder,
    },
};

/// Thread-safe in-memory repository preserving insertion order.
pub struct InMemoryRepository<T: Entity> {
    state: Arc<RwLock<InMemoryState<T>>>,
    config: RepositoryConfig,
}

struct InMemoryState<T: Entity> {
    records: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Entity> Default for InMemoryState<T> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Entity> InMemoryState<T> {
    fn ordered(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty repository with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RepositoryConfig::default())
    }

    /// Creates an empty repository with custom limits.
    #[must_use]
    pub fn with_config(config: RepositoryConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState::default())),
            config,
        }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, InMemoryState<T>>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, InMemoryState<T>>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn matching(&self, criteria: &Criteria) -> RepositoryResult<Vec<T>> {
        let state = self.read()?;
        if criteria.is_empty() {
            return Ok(state.ordered().cloned().collect());
        }
        let mut matches = Vec::new();
        for record in state.ordered() {
            let json = record.to_json().map_err(RepositoryError::serialization)?;
            if criteria.matches(&json) {
                matches.push(record.clone());
            }
        }
        Ok(matches)
    }

    fn check_pagination(&self, options: &PaginationOptions) -> RepositoryResult<()> {
        if options.page == 0 {
            return Err(RepositoryError::InvalidPagination(
                "page numbers start at 1".to_owned(),
            ));
        }
        if options.limit == 0 || options.limit > self.config.max_page_limit {
            return Err(RepositoryError::InvalidPagination(format!(
                "limit {} outside 1..={}",
                options.limit, self.config.max_page_limit
            )));
        }
        Ok(())
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config.clone(),
        }
    }
}

impl<T: Entity> fmt::Debug for InMemoryRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("kind", &T::KIND)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Sorts records by a serialised field, keeping insertion order for ties.
fn sort_records<T: Entity>(
    records: Vec<T>,
    field: &str,
    order: SortOrder,
) -> RepositoryResult<Vec<T>> {
    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        let key = record
            .to_json()
            .map_err(RepositoryError::serialization)?
            .get(field)
            .cloned()
            .unwrap_or(Value::Null);
        keyed.push((key, record));
    }
    keyed.sort_by(|(left, _), (right, _)| match order {
        SortOrder::Asc => compare_values(left, right),
        SortOrder::Desc => compare_values(right, left),
    });
    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

/// Orders JSON values: null < bool < number < string < array < object.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: &T::Id) -> RepositoryResult<Option<T>> {
        let state = self.read()?;
        Ok(state.records.get(id).cloned())
    }

    async fn find_all(&self, criteria: &Criteria) -> RepositoryResult<Vec<T>> {
        self.matching(criteria)
    }

    async fn find_one(&self, criteria: &Criteria) -> RepositoryResult<Option<T>> {
        Ok(self.matching(criteria)?.into_iter().next())
    }

    async fn create(&self, entity: &T) -> RepositoryResult<T> {
        let mut state = self.write()?;
        let id = entity.header().id();
        if state.records.contains_key(id) {
            return Err(RepositoryError::duplicate::<T>(id));
        }
        state.order.push(id.clone());
        state.records.insert(id.clone(), entity.clone());
        Ok(entity.clone())
    }

    async fn update(&self, id: &T::Id, entity: &T) -> RepositoryResult<T> {
        let actual = entity.header().id();
        if actual != id {
            return Err(RepositoryError::IdMismatch {
                kind: T::KIND,
                expected: id.to_string(),
                actual: actual.to_string(),
            });
        }
        let mut state = self.write()?;
        let slot = state
            .records
            .get_mut(id)
            .ok_or_else(|| RepositoryError::not_found::<T>(id))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: &T::Id) -> RepositoryResult<bool> {
        let mut state = self.write()?;
        if state.records.remove(id).is_none() {
            return Ok(false);
        }
        state.order.retain(|stored| stored != id);
        Ok(true)
    }

    async fn count(&self, criteria: &Criteria) -> RepositoryResult<usize> {
        if criteria.is_empty() {
            return Ok(self.read()?.records.len());
        }
        Ok(self.matching(criteria)?.len())
    }

    async fn exists(&self, id: &T::Id) -> RepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.records.contains_key(id))
    }
}

#[async_trait]
impl<T: Entity> PaginatedRepository<T> for InMemoryRepository<T> {
    async fn find_with_pagination(
        &self,
        criteria: &Criteria,
        options: &PaginationOptions,
    ) -> RepositoryResult<Page<T>> {
        self.check_pagination(options)?;
        let matches = self.matching(criteria)?;
        let sorted = match options.sort_by.as_deref() {
            Some(field) => sort_records(matches, field, options.sort_order)?,
            None => matches,
        };
        let total = sorted.len();
        let data = sorted
            .into_iter()
            .skip(options.offset())
            .take(options.limit)
            .collect();
        Ok(Page::new(data, total, options))
    }
}
