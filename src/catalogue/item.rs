//! The catalogue item entity

use crate::core::{Entity, FieldValue, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product listed in the catalogue
///
/// `id` is `None` until the item is first saved. `created_on` and
/// `updated_on` are maintained by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogueItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Stock keeping unit, unique across the catalogue
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    pub sku: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1024, message = "must be at most 1024 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub inventory: i32,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl CatalogueItem {
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            name: name.into(),
            description: None,
            category: None,
            price,
            inventory: 0,
            created_on: None,
            updated_on: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_inventory(mut self, inventory: i32) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

impl Entity for CatalogueItem {
    type Id = i64;

    fn entity_type() -> &'static str {
        "catalogue_item"
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn sortable_fields() -> &'static [&'static str] {
        &[
            "id",
            "sku",
            "name",
            "description",
            "category",
            "price",
            "inventory",
            "created_on",
            "updated_on",
        ]
    }

    fn unique_fields() -> &'static [&'static str] {
        &["sku"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "sku" => Some(self.sku.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "description" => Some(self.description.clone().into()),
            "category" => Some(self.category.clone().into()),
            "price" => Some(self.price.into()),
            "inventory" => Some(self.inventory.into()),
            "created_on" => Some(self.created_on.into()),
            "updated_on" => Some(self.updated_on.into()),
            _ => None,
        }
    }

    fn validate_entity(&self) -> Result<(), ValidationError> {
        self.validate().map_err(Into::into)
    }

    fn before_save(&mut self, _is_new: bool) {
        let now = Utc::now();
        if self.created_on.is_none() {
            self.created_on = Some(now);
        }
        self.updated_on = Some(now);
    }
}
