//! In-memory repository implementation for testing and development

use crate::config::StorageConfig;
use crate::core::repository::required_id;
use crate::core::{
    Entity, EntityStream, Page, PageRequest, PaginationMeta, ReactiveCrudRepository,
    ReactiveSortingRepository, RepositoryError, RepositoryResult, Sort, StorageError,
};
use crate::storage::sequence::{IdGenerator, SequenceGenerator};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

type Items<T> = BTreeMap<<T as Entity>::Id, T>;

/// In-memory repository implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same underlying store. `find_all` yields entities in
/// ascending id order.
#[derive(Clone)]
pub struct InMemoryRepository<T: Entity> {
    items: Arc<RwLock<Items<T>>>,
    ids: Arc<dyn IdGenerator<T::Id>>,
    validate_on_save: bool,
}

impl<T: Entity<Id = i64>> InMemoryRepository<T> {
    /// Create an empty repository with ids starting at 1
    pub fn new() -> Self {
        Self::with_generator(Arc::new(SequenceGenerator::default()))
    }

    /// Create an empty repository configured from `config`
    pub fn from_storage_config(config: &StorageConfig) -> Self {
        Self::with_generator(Arc::new(SequenceGenerator::starting_at(
            config.sequence_start,
        )))
        .validate_on_save(config.validate_on_save)
    }
}

impl<T: Entity<Id = i64>> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository drawing ids from `ids`
    pub fn with_generator(ids: Arc<dyn IdGenerator<T::Id>>) -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            ids,
            validate_on_save: true,
        }
    }

    /// Enable or disable entity validation before writes
    pub fn validate_on_save(mut self, enabled: bool) -> Self {
        self.validate_on_save = enabled;
        self
    }

    fn read(&self, operation: &str) -> RepositoryResult<RwLockReadGuard<'_, Items<T>>> {
        self.items.read().map_err(|_| {
            StorageError::LockPoisoned {
                operation: operation.to_string(),
            }
            .into()
        })
    }

    fn write(&self, operation: &str) -> RepositoryResult<RwLockWriteGuard<'_, Items<T>>> {
        self.items.write().map_err(|_| {
            StorageError::LockPoisoned {
                operation: operation.to_string(),
            }
            .into()
        })
    }

    fn snapshot(&self, operation: &str) -> RepositoryResult<Vec<T>> {
        Ok(self.read(operation)?.values().cloned().collect())
    }

    /// Reject the write if another stored entity holds the same value in a
    /// unique field
    fn check_unique(&self, items: &Items<T>, entity: &T, id: &T::Id) -> RepositoryResult<()> {
        for field in T::unique_fields() {
            let Some(value) = entity.field_value(field).filter(|v| !v.is_null()) else {
                continue;
            };

            let clash = items
                .iter()
                .find(|(other_id, other)| *other_id != id && other.field_value(field).as_ref() == Some(&value));

            if let Some((other_id, _)) = clash {
                return Err(StorageError::ConstraintViolation {
                    entity_type: T::entity_type().to_string(),
                    constraint: format!("unique_{}", field),
                    message: format!("{} {:?} is already used by id {}", field, value, other_id),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Stream built from a snapshot taken at first poll
    fn lazy_stream<F>(&self, load: F) -> EntityStream<'static, T>
    where
        F: FnOnce(&Self) -> RepositoryResult<Vec<T>> + Send + 'static,
    {
        let repository = self.clone();
        stream::once(async move { load(&repository) })
            .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, RepositoryError>)))
            .try_flatten()
            .boxed()
    }
}

#[async_trait]
impl<T: Entity> ReactiveCrudRepository<T, T::Id> for InMemoryRepository<T> {
    async fn save(&self, mut entity: T) -> RepositoryResult<T> {
        if self.validate_on_save {
            entity.validate_entity()?;
        }

        let mut items = self.write("save")?;

        let is_new = match entity.id() {
            Some(id) => {
                let exists = items.contains_key(&id);
                if !exists {
                    self.ids.observe(&id);
                }
                !exists
            }
            None => {
                entity.set_id(self.ids.next_id());
                true
            }
        };

        let id = required_id(&entity)?;
        entity.before_save(is_new);
        self.check_unique(&items, &entity, &id)?;

        items.insert(id.clone(), entity.clone());

        debug!(
            entity_type = T::entity_type(),
            id = %id,
            is_new,
            "Saved entity"
        );

        Ok(entity)
    }

    async fn find_by_id(&self, id: &T::Id) -> RepositoryResult<Option<T>> {
        let items = self.read("find_by_id")?;
        let found = items.get(id).cloned();

        trace!(
            entity_type = T::entity_type(),
            id = %id,
            found = found.is_some(),
            "Looked up entity"
        );

        Ok(found)
    }

    async fn exists_by_id(&self, id: &T::Id) -> RepositoryResult<bool> {
        Ok(self.read("exists_by_id")?.contains_key(id))
    }

    fn find_all(&self) -> EntityStream<'_, T> {
        self.lazy_stream(|repository| {
            let items = repository.snapshot("find_all")?;
            trace!(entity_type = T::entity_type(), count = items.len(), "Listing entities");
            Ok(items)
        })
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.read("count")?.len() as u64)
    }

    async fn delete_by_id(&self, id: &T::Id) -> RepositoryResult<()> {
        let mut items = self.write("delete_by_id")?;
        let removed = items.remove(id).is_some();

        debug!(
            entity_type = T::entity_type(),
            id = %id,
            removed,
            "Deleted entity"
        );

        Ok(())
    }

    async fn delete_all(&self) -> RepositoryResult<()> {
        let mut items = self.write("delete_all")?;
        let removed = items.len();
        items.clear();

        debug!(entity_type = T::entity_type(), removed, "Deleted all entities");

        Ok(())
    }
}

#[async_trait]
impl<T: Entity> ReactiveSortingRepository<T, T::Id> for InMemoryRepository<T> {
    fn find_all_sorted(&self, sort: &Sort) -> EntityStream<'_, T> {
        let sort = sort.clone();
        self.lazy_stream(move |repository| {
            let mut items = repository.snapshot("find_all_sorted")?;
            sort.apply(&mut items)?;
            trace!(
                entity_type = T::entity_type(),
                sort = %sort,
                count = items.len(),
                "Listing sorted entities"
            );
            Ok(items)
        })
    }

    async fn find_page(&self, request: &PageRequest) -> RepositoryResult<Page<T>> {
        let mut items = self.snapshot("find_page")?;
        let total = items.len();
        request.sort.apply(&mut items)?;

        let content: Vec<T> = items
            .into_iter()
            .skip(request.offset())
            .take(request.size())
            .collect();

        trace!(
            entity_type = T::entity_type(),
            page = request.page(),
            returned = content.len(),
            total,
            "Listing page"
        );

        Ok(Page {
            content,
            pagination: PaginationMeta::new(request.page(), request.size(), total),
        })
    }
}
