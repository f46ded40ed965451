//! Database query model.
//!
//! [`Filter`] and [`Sort`] serialize to the JSON the Notion query endpoint
//! expects, and can also be evaluated against raw page records so that
//! in-memory sources answer queries the same way the API does.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mapper::{property, rich_text_plain};

/// A database query filter.
///
/// ```
/// use notiblog_notion::query::Filter;
///
/// let filter = Filter::and(vec![
///     Filter::select_equals("Status", "Published"),
///     Filter::multi_select_contains("Tags", "rust"),
/// ]);
/// let json = serde_json::to_value(&filter).unwrap();
/// assert_eq!(json["and"][0]["select"]["equals"], "Published");
/// assert_eq!(json["and"][1]["multi_select"]["contains"], "rust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Filter {
    /// Every nested filter must match.
    And {
        /// Nested filters
        and: Vec<Filter>,
    },
    /// A condition on one property.
    Property {
        /// Property name
        property: String,
        /// Condition keyed by property type
        #[serde(flatten)]
        condition: Condition,
    },
}

/// A property condition, keyed by the property's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// `select` property condition
    Select(SelectCondition),
    /// `multi_select` property condition
    MultiSelect(MultiSelectCondition),
    /// `rich_text` property condition
    RichText(TextCondition),
}

/// Conditions on a `select` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectCondition {
    /// Selected option name equals the value
    Equals(String),
}

/// Conditions on a `multi_select` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectCondition {
    /// Some selected option name equals the value
    Contains(String),
}

/// Conditions on a `rich_text` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCondition {
    /// Concatenated plain text equals the value
    Equals(String),
}

impl Filter {
    /// `select` property equals `value`.
    pub fn select_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Property {
            property: property.into(),
            condition: Condition::Select(SelectCondition::Equals(value.into())),
        }
    }

    /// `multi_select` property contains `value`.
    pub fn multi_select_contains(property: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Property {
            property: property.into(),
            condition: Condition::MultiSelect(MultiSelectCondition::Contains(value.into())),
        }
    }

    /// `rich_text` property equals `value`.
    pub fn rich_text_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Property {
            property: property.into(),
            condition: Condition::RichText(TextCondition::Equals(value.into())),
        }
    }

    /// Conjunction of `filters`. A single filter is returned unwrapped.
    pub fn and(mut filters: Vec<Filter>) -> Self {
        if filters.len() == 1
            && let Some(only) = filters.pop()
        {
            return only;
        }
        Filter::And { and: filters }
    }

    /// Evaluates the filter against a raw page record.
    ///
    /// Missing properties never match. Comparisons are exact and
    /// case-sensitive, as on the API.
    pub fn matches(&self, page: &Value) -> bool {
        match self {
            Filter::And { and } => and.iter().all(|f| f.matches(page)),
            Filter::Property {
                property: name,
                condition,
            } => {
                let Some(prop) = property(page, name) else {
                    return false;
                };
                match condition {
                    Condition::Select(SelectCondition::Equals(value)) => prop
                        .pointer("/select/name")
                        .and_then(Value::as_str)
                        .is_some_and(|name| name == value),
                    Condition::MultiSelect(MultiSelectCondition::Contains(value)) => prop
                        .get("multi_select")
                        .and_then(Value::as_array)
                        .is_some_and(|options| {
                            options
                                .iter()
                                .filter_map(|o| o.get("name").and_then(Value::as_str))
                                .any(|name| name == value)
                        }),
                    Condition::RichText(TextCondition::Equals(value)) => {
                        prop.get("rich_text").is_some()
                            && rich_text_plain(prop.get("rich_text")) == *value
                    }
                }
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// A property sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    /// Property name
    pub property: String,
    /// Sort direction
    pub direction: Direction,
}

impl Sort {
    /// Ascending sort on `property`.
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    /// Descending sort on `property`.
    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }

    /// Orders two page records by this sort.
    ///
    /// Records with an empty value for the property go last in either
    /// direction.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let a = sort_key(a, &self.property);
        let b = sort_key(b, &self.property);
        match (a, b) {
            (Some(a), Some(b)) => match self.direction {
                Direction::Ascending => a.cmp(&b),
                Direction::Descending => b.cmp(&a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Comparable text for a property: date start, option name, or plain text.
fn sort_key(page: &Value, name: &str) -> Option<String> {
    let prop = property(page, name)?;
    let key = if let Some(date) = prop.get("date") {
        date.get("start")?.as_str()?.to_string()
    } else if let Some(option) = prop.get("select").or_else(|| prop.get("status")) {
        option.get("name")?.as_str()?.to_string()
    } else if let Some(text) = prop.get("title").or_else(|| prop.get("rich_text")) {
        rich_text_plain(Some(text))
    } else {
        prop.get("created_time")
            .or_else(|| prop.get("last_edited_time"))?
            .as_str()?
            .to_string()
    };
    (!key.is_empty()).then_some(key)
}

/// Body of a database query request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Record filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    /// Sorts, applied in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,

    /// Cursor returned by the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,

    /// Records per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl QueryRequest {
    /// Creates an unfiltered, unsorted request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Appends a sort.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Copy of this request starting at `cursor`.
    pub fn at_cursor(&self, cursor: Option<String>) -> Self {
        Self {
            start_cursor: cursor,
            ..self.clone()
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    /// Raw page records
    #[serde(default)]
    pub results: Vec<Value>,

    /// Cursor for the next page
    #[serde(default)]
    pub next_cursor: Option<String>,

    /// Whether more pages follow
    #[serde(default)]
    pub has_more: bool,
}

impl QueryResponse {
    /// Cursor to continue from, if the source reports more pages.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}
