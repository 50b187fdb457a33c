//! Entity traits defining the abstraction every stored type implements

use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier types usable as repository keys.
///
/// Implemented for any ordered, hashable, printable key that can be shared
/// across tasks.
pub trait Identifier: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> Identifier for T where T: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}

/// Base trait for all entities persisted through a repository.
///
/// An entity carries an optional identifier: `None` until the store assigns
/// one on first save. Once assigned the identifier never changes.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Key type of this entity
    type Id: Identifier;

    /// The entity type name used in errors and logs (e.g., "catalogue_item")
    fn entity_type() -> &'static str;

    // === Identity ===

    /// Get the identifier, if one has been assigned
    fn id(&self) -> Option<Self::Id>;

    /// Assign the identifier
    fn set_id(&mut self, id: Self::Id);

    /// Check whether this entity has never been persisted
    fn is_new(&self) -> bool {
        self.id().is_none()
    }

    // === Dynamic field access ===

    /// Fields that may be used in a sort specification
    fn sortable_fields() -> &'static [&'static str];

    /// Fields whose values must be unique across the store
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    // === Lifecycle hooks ===

    /// Check the entity state before it is written
    fn validate_entity(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Called by the store right before a write, after the id is assigned
    fn before_save(&mut self, _is_new: bool) {}
}
