//! # Catalogue Repository
//!
//! A typed, asynchronous data-access layer for catalogue items.
//!
//! ## Features
//!
//! - **Generic Contracts**: `ReactiveCrudRepository<T, ID>` and
//!   `ReactiveSortingRepository<T, ID>` work for any [`core::Entity`]
//! - **Catalogue Specialization**: `CatalogueRepository` is the contract for
//!   `(CatalogueItem, i64)` and declares nothing of its own
//! - **Lazy Streams**: multi-value reads and bulk saves are `futures` streams
//! - **Sorting & Paging**: multi-key sorts with case and null handling,
//!   1-based page requests with pagination metadata
//! - **Typed Errors**: absence is an empty result; failures are matchable
//! - **In-Memory Backend**: shared, thread-safe store with id sequence,
//!   validation and unique constraints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalogue::prelude::*;
//!
//! let repository = InMemoryCatalogueRepository::new();
//!
//! let saved = repository
//!     .save(CatalogueItem::new("W-1", "Widget", 9.5))
//!     .await?;
//! assert_eq!(saved.id, Some(1));
//!
//! let cheapest_first: Vec<CatalogueItem> = repository
//!     .find_all_sorted(&Sort::by(Order::asc("price")))
//!     .try_collect()
//!     .await?;
//!
//! repository.delete_by_id(&1).await?;
//! assert!(!repository.exists_by_id(&1).await?);
//! ```

pub mod catalogue;
pub mod config;
pub mod core;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, Identifier},
        field::FieldValue,
        repository::{EntityStream, ReactiveCrudRepository, ReactiveSortingRepository},
    };

    // === Queries ===
    pub use crate::core::{
        page::{Page, PageRequest, PaginationMeta},
        sort::{Direction, NullHandling, Order, Sort},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, QueryError, RepositoryError, RepositoryResult, StorageError,
        ValidationError,
    };

    // === Catalogue ===
    pub use crate::catalogue::{CatalogueItem, CatalogueRepository};
    #[cfg(feature = "in-memory")]
    pub use crate::catalogue::InMemoryCatalogueRepository;

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRepository;
    pub use crate::storage::{IdGenerator, SequenceGenerator};

    // === Config ===
    pub use crate::config::{RepositoryConfig, StorageConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use futures::{StreamExt, TryStreamExt};
}
