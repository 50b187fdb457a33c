//! Storage implementations for different backends

#[cfg(feature = "in-memory")]
pub mod in_memory;
pub mod sequence;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryRepository;
pub use sequence::{IdGenerator, SequenceGenerator};
