//! # Filter and Ordering Expressions
//!
//! Equality filters and sort clauses understood by every [`TableClient`]
//! implementation. The in-memory client evaluates them directly against JSON
//! rows; the PostgREST client renders them as query-string pairs.
//!
//! [`TableClient`]: super::TableClient

use std::cmp::Ordering;

use serde_json::Value;

/// A `field = value` row filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: String,
    pub value: Value,
}

impl FilterExpr {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Check if a row matches this filter
    pub fn matches(&self, row: &Value) -> bool {
        row.get(&self.field)
            .is_some_and(|field_value| loosely_equal(field_value, &self.value))
    }

    /// Render as a `(column, "eq.value")` query pair
    pub fn to_query_pair(&self) -> (String, String) {
        let value = match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (self.field.clone(), format!("eq.{value}"))
    }
}

/// Equality that treats `5` and `"5"` as the same key, the way a SQL
/// backend coerces a filter literal to the column type.
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            n.to_string() == *s
        }
        _ => a == b,
    }
}

/// Compare two JSON values for ordering
pub(crate) fn compare_json_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Order by clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// `column.direction`, as used in the `order=` query parameter
    pub fn to_query_value(&self) -> String {
        format!("{}.{}", self.field, self.direction.as_str())
    }
}

/// Parameters of a `select` call
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// Columns to return (`["*"]` = all)
    pub columns: Vec<String>,

    /// Filters combined with AND logic
    pub filters: Vec<FilterExpr>,

    /// Order by clauses, applied in sequence
    pub order: Vec<OrderBy>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            columns: vec!["*".to_string()],
            filters: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl SelectQuery {
    /// Select every column
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict the returned columns
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add an equality filter
    pub fn eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.push(FilterExpr::eq(field, value));
        self
    }

    /// Append an order clause
    pub fn order(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order.push(OrderBy::new(field, direction));
        self
    }

    /// Check if a row matches all filters
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Comma-separated column list for the `select=` parameter
    pub fn select_value(&self) -> String {
        self.columns.join(",")
    }

    /// Compare two rows according to the order clauses
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for order in &self.order {
            let cmp = match (a.get(&order.field), b.get(&order.field)) {
                (Some(a), Some(b)) => compare_json_values(a, b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };

            let cmp = match order.direction {
                Direction::Ascending => cmp,
                Direction::Descending => cmp.reverse(),
            };
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }

    /// Project a row onto the selected columns
    pub fn project(&self, row: Value) -> Value {
        if self.columns.iter().any(|c| c == "*") {
            return row;
        }
        match row {
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .filter(|(k, _)| self.columns.contains(k))
                    .collect(),
            ),
            other => other,
        }
    }
}
