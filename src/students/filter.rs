//! # Filter Expressions
//!
//! Predicates over dotted field paths. A `FilterSet` renders to a MongoDB
//! query document and can also be evaluated against a document in memory,
//! so both store backends answer the same question.

use std::cmp::Ordering;

use mongodb::bson::{doc, Bson, Document};

use super::document::get_path;
use super::errors::{StudentError, StudentResult};

/// Field holding the student's age
pub const AGE_FIELD: &str = "age";

/// Nested field holding the student's country
pub const COUNTRY_FIELD: &str = "address.country";

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Greater than or equal
    Gte,
}

impl FilterOperator {
    /// Get the MongoDB operator name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "$eq",
            FilterOperator::Gte => "$gte",
        }
    }
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Field path to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: Bson,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Bson>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Create a greater-than-or-equal filter
    pub fn gte(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }

    /// Render as a MongoDB query clause
    pub fn to_document(&self) -> Document {
        match self.operator {
            FilterOperator::Eq => doc! { self.field.as_str(): self.value.clone() },
            FilterOperator::Gte => doc! {
                self.field.as_str(): { self.operator.as_str(): self.value.clone() }
            },
        }
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Document) -> bool {
        let field_value = match get_path(doc, &self.field) {
            Some(v) => v,
            None => return false,
        };

        match self.operator {
            FilterOperator::Eq => compare_bson(field_value, &self.value) == Some(Ordering::Equal),
            FilterOperator::Gte => matches!(
                compare_bson(field_value, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

/// Compare two values of the same type bracket; numbers compare across widths
fn compare_bson(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (as_number(a), as_number(b)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (a, b) {
            (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        },
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Render as a MongoDB query document.
    ///
    /// Empty set matches all, a single clause is rendered bare, several are
    /// wrapped in `$and`.
    pub fn to_document(&self) -> Document {
        match self.filters.as_slice() {
            [] => Document::new(),
            [single] => single.to_document(),
            many => doc! {
                "$and": many.iter().map(FilterExpr::to_document).collect::<Vec<_>>()
            },
        }
    }

    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

/// List-endpoint criteria: minimum age and country
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub min_age: Option<i64>,
    pub country: Option<String>,
}

impl StudentFilter {
    /// Build criteria from raw query values.
    ///
    /// `age` must be positive. An empty country string counts as absent.
    pub fn new(min_age: Option<i64>, country: Option<String>) -> StudentResult<Self> {
        if let Some(age) = min_age {
            if age <= 0 {
                return Err(StudentError::InvalidQueryParam(
                    "age must be greater than 0".to_string(),
                ));
            }
        }

        Ok(Self {
            min_age,
            country: country.filter(|c| !c.is_empty()),
        })
    }

    pub fn to_filter_set(&self) -> FilterSet {
        let mut set = FilterSet::new();
        if let Some(age) = self.min_age {
            set = set.and(FilterExpr::gte(AGE_FIELD, age_bson(age)));
        }
        if let Some(country) = &self.country {
            set = set.and(FilterExpr::eq(COUNTRY_FIELD, country.as_str()));
        }
        set
    }
}

fn age_bson(age: i64) -> Bson {
    i32::try_from(age).map(Bson::Int32).unwrap_or(Bson::Int64(age))
}
