//! Core module containing the entity abstraction and repository contracts

pub mod entity;
pub mod error;
pub mod field;
pub mod page;
pub mod repository;
pub mod sort;

pub use entity::{Entity, Identifier};
pub use error::{
    ConfigError, FieldValidationError, QueryError, RepositoryError, RepositoryResult,
    StorageError, ValidationError,
};
pub use field::FieldValue;
pub use page::{Page, PageRequest, PaginationMeta};
pub use repository::{EntityStream, ReactiveCrudRepository, ReactiveSortingRepository};
pub use sort::{Direction, NullHandling, Order, Sort};
