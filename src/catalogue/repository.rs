//! Repository contract for catalogue items

use crate::catalogue::CatalogueItem;
use crate::core::ReactiveSortingRepository;

#[cfg(feature = "in-memory")]
use crate::{
    config::RepositoryConfig,
    core::{ReactiveCrudRepository, RepositoryResult},
    storage::InMemoryRepository,
};

/// Data access for [`CatalogueItem`]s keyed by `i64`
///
/// Declares nothing of its own: every operation comes from
/// [`ReactiveSortingRepository`] and its CRUD supertrait. Any sorting
/// repository over `(CatalogueItem, i64)` is a `CatalogueRepository`.
///
/// ```rust,ignore
/// async fn restock(repository: &dyn CatalogueRepository, id: i64) -> RepositoryResult<()> {
///     if let Some(mut item) = repository.find_by_id(&id).await? {
///         item.inventory += 10;
///         repository.save(item).await?;
///     }
///     Ok(())
/// }
/// ```
pub trait CatalogueRepository: ReactiveSortingRepository<CatalogueItem, i64> {}

impl<R> CatalogueRepository for R where R: ReactiveSortingRepository<CatalogueItem, i64> {}

/// In-memory catalogue repository
#[cfg(feature = "in-memory")]
pub type InMemoryCatalogueRepository = InMemoryRepository<CatalogueItem>;

#[cfg(feature = "in-memory")]
impl InMemoryRepository<CatalogueItem> {
    /// Create a repository from `config` and save its seed items in order
    pub async fn from_config(config: &RepositoryConfig) -> RepositoryResult<Self> {
        let repository = Self::from_storage_config(&config.storage);

        for item in config.seed.iter().cloned() {
            repository.save(item).await?;
        }

        tracing::info!(
            seeded = config.seed.len(),
            sequence_start = config.storage.sequence_start,
            "Catalogue repository ready"
        );

        Ok(repository)
    }
}
