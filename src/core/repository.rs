//! Repository traits for entity persistence
//!
//! [`ReactiveCrudRepository`] is the generic create/read/update/delete
//! contract; [`ReactiveSortingRepository`] adds ordered and paged reads.
//! Both are agnostic to the storage backend.
//!
//! Single results are `async fn`s. Multi-value results are lazy
//! [`EntityStream`]s: no work happens until the stream is polled, and
//! dropping the stream stops the remaining work.

use crate::core::entity::{Entity, Identifier};
use crate::core::error::{RepositoryResult, ValidationError};
use crate::core::page::{Page, PageRequest, PaginationMeta};
use crate::core::sort::Sort;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

/// A lazy, finite stream of entities
pub type EntityStream<'a, T> = BoxStream<'a, RepositoryResult<T>>;

/// Get the identifier of an entity that must already be persisted
pub fn required_id<T: Entity>(entity: &T) -> Result<T::Id, ValidationError> {
    entity.id().ok_or_else(|| ValidationError::MissingIdentifier {
        entity_type: T::entity_type().to_string(),
    })
}

/// Generic CRUD repository contract
///
/// Absence is reported as an empty result, never as an error. Every other
/// failure reaches the caller unchanged; implementations do not retry.
#[async_trait]
pub trait ReactiveCrudRepository<T, ID>: Send + Sync
where
    T: Entity<Id = ID>,
    ID: Identifier,
{
    /// Persist a new or updated entity
    ///
    /// Returns the persisted instance, with its identifier populated when the
    /// store assigned one.
    async fn save(&self, entity: T) -> RepositoryResult<T>;

    /// Persist several entities, yielding them in input order
    fn save_all(&self, entities: Vec<T>) -> EntityStream<'_, T> {
        stream::iter(entities)
            .then(move |entity| self.save(entity))
            .boxed()
    }

    /// Get an entity by ID
    async fn find_by_id(&self, id: &ID) -> RepositoryResult<Option<T>>;

    /// Check whether an entity with this ID is stored
    async fn exists_by_id(&self, id: &ID) -> RepositoryResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Stream all entities in no particular order
    fn find_all(&self) -> EntityStream<'_, T>;

    /// Stream the entities with the given IDs, in the order given
    ///
    /// IDs with no stored entity are skipped.
    fn find_all_by_id(&self, ids: Vec<ID>) -> EntityStream<'_, T> {
        stream::iter(ids)
            .then(move |id| async move { self.find_by_id(&id).await })
            .try_filter_map(|found| futures::future::ready(Ok(found)))
            .boxed()
    }

    /// Count stored entities
    async fn count(&self) -> RepositoryResult<u64>;

    /// Delete an entity by ID; deleting an absent ID succeeds
    async fn delete_by_id(&self, id: &ID) -> RepositoryResult<()>;

    /// Delete a persisted entity
    ///
    /// Fails with [`ValidationError::MissingIdentifier`] if the entity was
    /// never saved.
    async fn delete(&self, entity: &T) -> RepositoryResult<()> {
        let id = required_id(entity)?;
        self.delete_by_id(&id).await
    }

    /// Delete every entity whose ID is listed
    async fn delete_all_by_id(&self, ids: Vec<ID>) -> RepositoryResult<()> {
        for id in &ids {
            self.delete_by_id(id).await?;
        }
        Ok(())
    }

    /// Delete the given entities
    ///
    /// Every entity must carry an identifier; nothing is deleted otherwise.
    async fn delete_all_items(&self, entities: Vec<T>) -> RepositoryResult<()> {
        let ids = entities
            .iter()
            .map(required_id)
            .collect::<Result<Vec<_>, _>>()?;
        self.delete_all_by_id(ids).await
    }

    /// Delete every stored entity
    async fn delete_all(&self) -> RepositoryResult<()>;
}

/// CRUD repository with ordered and paged reads
#[async_trait]
pub trait ReactiveSortingRepository<T, ID>: ReactiveCrudRepository<T, ID>
where
    T: Entity<Id = ID>,
    ID: Identifier,
{
    /// Stream all entities ordered by `sort`
    ///
    /// Fails if the sort names a property `T` cannot be sorted by.
    fn find_all_sorted(&self, sort: &Sort) -> EntityStream<'_, T>;

    /// Get one page of entities ordered by the request's sort
    ///
    /// The default reads `count` and the sorted stream separately, so a
    /// concurrent write can make `total` disagree with `content`. Backends
    /// that can read both from one snapshot should override this.
    async fn find_page(&self, request: &PageRequest) -> RepositoryResult<Page<T>> {
        let total = self.count().await? as usize;
        let content: Vec<T> = self
            .find_all_sorted(&request.sort)
            .skip(request.offset())
            .take(request.size())
            .try_collect()
            .await?;

        Ok(Page {
            content,
            pagination: PaginationMeta::new(request.page(), request.size(), total),
        })
    }
}
