//! Catalogue items and the repository specialized to them

pub mod item;
pub mod repository;

pub use item::CatalogueItem;
pub use repository::CatalogueRepository;
#[cfg(feature = "in-memory")]
pub use repository::InMemoryCatalogueRepository;
