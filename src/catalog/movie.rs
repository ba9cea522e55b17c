//! The movie record type.
//!
//! A record is an arbitrary JSON object. Only two fields are interpreted:
//! `Movie` (the display name used for detail lookups) and `PROP.CATEGORY`.
//! Everything else is carried through untouched, in its original order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the movie's name.
pub const NAME_FIELD: &str = "Movie";

/// Field holding the nested properties object.
pub const PROPS_FIELD: &str = "PROP";

/// Key of the category inside the properties object.
pub const CATEGORY_FIELD: &str = "CATEGORY";

/// Field holding the poster file name.
pub const POSTER_FIELD: &str = "POSTER";

/// Category reported for records without one.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One entry of the movie collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Movie(Map<String, Value>);

impl Movie {
    /// Create a record with a name and category and no other fields.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        let mut props = Map::new();
        props.insert(CATEGORY_FIELD.to_string(), Value::String(category.into()));

        let mut fields = Map::new();
        fields.insert(NAME_FIELD.to_string(), Value::String(name.into()));
        fields.insert(PROPS_FIELD.to_string(), Value::Object(props));
        Self(fields)
    }

    /// The `Movie` field, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Display title: the name, any other `Movie` value as JSON, or empty.
    pub fn title(&self) -> String {
        match self.0.get(NAME_FIELD) {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// The `POSTER` file name, if present and a string.
    pub fn poster(&self) -> Option<&str> {
        self.0
            .get(POSTER_FIELD)
            .and_then(Value::as_str)
            .filter(|poster| !poster.is_empty())
    }

    /// The `PROP.CATEGORY` field, or `"Unknown"` when absent or not a string.
    pub fn category(&self) -> &str {
        self.0
            .get(PROPS_FIELD)
            .and_then(Value::as_object)
            .and_then(|props| props.get(CATEGORY_FIELD))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Look up an arbitrary pass-through field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a pass-through field, returning the record for chaining.
    pub fn with_field(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    /// Borrow all fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record, returning its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Movie {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Distinct categories across `movies`, sorted ascending.
pub fn categories(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .map(Movie::category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// First record whose name equals `name`, in collection order.
pub fn find_by_name<'a>(movies: &'a [Movie], name: &str) -> Option<&'a Movie> {
    movies.iter().find(|m| m.name() == Some(name))
}
