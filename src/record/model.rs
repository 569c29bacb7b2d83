//! Typed catalog resources.
//!
//! Every field is optional so that partial API payloads still decode.
//! Unknown fields are ignored, and write-only fields such as a user's
//! password are never read back.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

use super::Record;
use crate::catalog::ResourceKind;
use crate::error::AdminError;

/// `{id, name}` reference used for countries and categories inside a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Running time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<NamedRef>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub movie_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<NamedRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A record decoded into its resource-specific shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum Resource {
    Movie(Movie),
    Category(Category),
    Country(Country),
    Type(MovieType),
    User(User),
}

impl Resource {
    /// Decode `record` as the shape `kind` expects.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Decode`] when a present field has the wrong type.
    pub fn from_record(kind: ResourceKind, record: &Record) -> Result<Self, AdminError> {
        let value = record.clone().into_value();
        let decoded = match kind {
            ResourceKind::Movie => serde_json::from_value(value).map(Self::Movie),
            ResourceKind::Category => serde_json::from_value(value).map(Self::Category),
            ResourceKind::Country => serde_json::from_value(value).map(Self::Country),
            ResourceKind::Type => serde_json::from_value(value).map(Self::Type),
            ResourceKind::User => serde_json::from_value(value).map(Self::User),
        };
        decoded.map_err(|e| AdminError::Decode(format!("{}: {e}", kind.singular())))
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Movie(_) => ResourceKind::Movie,
            Self::Category(_) => ResourceKind::Category,
            Self::Country(_) => ResourceKind::Country,
            Self::Type(_) => ResourceKind::Type,
            Self::User(_) => ResourceKind::User,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Movie(m) => m.id,
            Self::Category(c) => c.id,
            Self::Country(c) => c.id,
            Self::Type(t) => t.id,
            Self::User(u) => u.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Movie(m) => m.title.as_deref(),
            Self::Category(c) => c.name.as_deref(),
            Self::Country(c) => c.name.as_deref(),
            Self::Type(t) => t.type_name.as_deref(),
            Self::User(u) => u.username.as_deref(),
        }
    }

    /// Encode back into an untyped record, without the `resource` tag.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Decode`] if serialization fails (non-finite
    /// ratings, for instance).
    pub fn to_record(&self) -> Result<Record, AdminError> {
        let value = match self {
            Self::Movie(m) => serde_json::to_value(m),
            Self::Category(c) => serde_json::to_value(c),
            Self::Country(c) => serde_json::to_value(c),
            Self::Type(t) => serde_json::to_value(t),
            Self::User(u) => serde_json::to_value(u),
        }
        .map_err(|e| AdminError::Decode(e.to_string()))?;
        Record::from_value(value).ok_or_else(|| AdminError::Decode("resource did not encode as an object".into()))
    }
}
