//! Sort specifications for ordered queries
//!
//! A [`Sort`] is an ordered list of [`Order`]s. Earlier orders take
//! precedence; later ones only break ties.
//!
//! # Example
//! ```rust,ignore
//! let sort = Sort::by(Order::desc("price")).and(Order::asc("name").ignore_case());
//! let same = Sort::parse("price:desc,name")?;
//! ```

use crate::core::entity::Entity;
use crate::core::error::{QueryError, RepositoryResult};
use crate::core::field::FieldValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(expression: &str, value: &str) -> Result<Self, QueryError> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(QueryError::InvalidSortExpression {
                expression: expression.to_string(),
                message: format!("unknown direction '{}'", other),
            }),
        }
    }
}

/// Placement of null or missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullHandling {
    /// Nulls compare lowest: first when ascending, last when descending
    #[default]
    Native,
    NullsFirst,
    NullsLast,
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub ignore_case: bool,
    #[serde(default)]
    pub null_handling: NullHandling,
}

impl Order {
    pub fn new(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
            ignore_case: false,
            null_handling: NullHandling::Native,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(Direction::Asc, property)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(Direction::Desc, property)
    }

    /// Compare strings without regard to case
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn with_null_handling(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }

    fn compare(&self, a: &FieldValue, b: &FieldValue) -> Ordering {
        match (a.is_null(), b.is_null(), self.null_handling) {
            (true, true, _) => return Ordering::Equal,
            (true, false, NullHandling::NullsFirst) => return Ordering::Less,
            (false, true, NullHandling::NullsFirst) => return Ordering::Greater,
            (true, false, NullHandling::NullsLast) => return Ordering::Greater,
            (false, true, NullHandling::NullsLast) => return Ordering::Less,
            _ => {}
        }

        let ordering = a.compare(b, self.ignore_case);
        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{}:{}", self.property, direction)
    }
}

/// An ordered list of sort keys
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    pub orders: Vec<Order>,
}

fn property_regex() -> &'static Regex {
    static PROPERTY_REGEX: OnceLock<Regex> = OnceLock::new();
    PROPERTY_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("property pattern is valid")
    })
}

impl Sort {
    /// A sort with no keys; results keep their natural order
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }

    /// Append a tie-breaking key
    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    /// - several keys separated by commas, e.g. `category,price:desc`
    ///
    /// An empty or blank expression yields an unsorted `Sort`.
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        let mut orders = Vec::new();

        for part in expression.split(',').map(str::trim) {
            if part.is_empty() {
                if expression.trim().is_empty() {
                    continue;
                }
                return Err(QueryError::InvalidSortExpression {
                    expression: expression.to_string(),
                    message: "empty sort key".to_string(),
                });
            }

            let (property, direction) = match part.split_once(':') {
                Some((property, direction)) => (
                    property.trim(),
                    Direction::parse(expression, direction.trim())?,
                ),
                None => (part, Direction::Asc),
            };

            if !property_regex().is_match(property) {
                return Err(QueryError::InvalidSortExpression {
                    expression: expression.to_string(),
                    message: format!("invalid property name '{}'", property),
                });
            }

            orders.push(Order::new(direction, property));
        }

        Ok(Self { orders })
    }

    /// Check that every key names a sortable field of `T`
    pub fn validate_for<T: Entity>(&self) -> Result<(), QueryError> {
        for order in &self.orders {
            if !T::sortable_fields().contains(&order.property.as_str()) {
                return Err(QueryError::UnknownProperty {
                    entity_type: T::entity_type().to_string(),
                    property: order.property.clone(),
                });
            }
        }
        Ok(())
    }

    /// Compare two entities key by key
    pub fn compare<T: Entity>(&self, a: &T, b: &T) -> Ordering {
        for order in &self.orders {
            let left = a.field_value(&order.property).unwrap_or(FieldValue::Null);
            let right = b.field_value(&order.property).unwrap_or(FieldValue::Null);
            let ordering = order.compare(&left, &right);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Sort entities in place; equal elements keep their relative order
    pub fn apply<T: Entity>(&self, items: &mut [T]) -> RepositoryResult<()> {
        self.validate_for::<T>()?;
        if !self.is_unsorted() {
            items.sort_by(|a, b| self.compare(a, b));
        }
        Ok(())
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.orders.iter().map(ToString::to_string).collect();
        write!(f, "{}", keys.join(","))
    }
}

impl std::str::FromStr for Sort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sort::parse(s)
    }
}

impl From<Order> for Sort {
    fn from(order: Order) -> Self {
        Sort::by(order)
    }
}
