//! Per-resource configuration for the admin views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each admin page is a generic view plus the configuration returned here:
//! which fields are searchable, which columns are shown, and which inputs the
//! add/update forms render. Endpoints are derived from the resource segment.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::AdminError;
use crate::fields::{DisplayField, FieldKind, FormField, SelectOption};
use crate::record::{FieldPath, Record};
use crate::views::add::AddForm;
use crate::views::list::ListView;
use crate::views::update::UpdateForm;

pub const DEFAULT_KEY_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Movie,
    Category,
    Country,
    Type,
    User,
}

impl ResourceKind {
    pub const ALL: [Self; 5] = [Self::Movie, Self::Category, Self::Country, Self::Type, Self::User];

    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Category => "category",
            Self::Country => "country",
            Self::Type => "type",
            Self::User => "user",
        }
    }

    /// API path segment, e.g. `categories` in `/api/categories`.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Category => "categories",
            Self::Country => "countries",
            Self::Type => "types",
            Self::User => "users",
        }
    }

    /// List title; lower-casing it yields [`ResourceKind::segment`].
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Category => "Categories",
            Self::Country => "Countries",
            Self::Type => "Types",
            Self::User => "Users",
        }
    }

    /// Match a free-form title against the known resources, singular or
    /// plural, ignoring case.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        let wanted = title.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.singular() == wanted || kind.segment() == wanted)
    }

    #[must_use]
    pub fn key_field(self) -> &'static str {
        DEFAULT_KEY_FIELD
    }

    /// `/api/{segment}`, also the update endpoint.
    #[must_use]
    pub fn collection_path(self) -> String {
        format!("/api/{}", self.segment())
    }

    #[must_use]
    pub fn search_fields(self) -> Vec<FieldPath> {
        let keys: &[&str] = match self {
            Self::Movie => &["title", "description", "country.name", "type.type_name", "categories"],
            Self::Category | Self::Country => &["name"],
            Self::Type => &["type_name"],
            Self::User => &["username", "email", "role"],
        };
        keys.iter().map(|key| FieldPath::parse(key)).collect()
    }

    #[must_use]
    pub fn display_fields(self) -> Vec<DisplayField> {
        match self {
            Self::Movie => vec![
                DisplayField::new("id", "ID"),
                DisplayField::new("title", "Title"),
                DisplayField::new("release_year", "Year"),
                DisplayField::new("country.name", "Country"),
                DisplayField::new("type.type_name", "Type"),
                DisplayField::new("categories", "Categories"),
                DisplayField::new("rating", "Rating").with_render(render_rating),
            ],
            Self::Category | Self::Country => {
                vec![DisplayField::new("id", "ID"), DisplayField::new("name", "Name")]
            }
            Self::Type => vec![DisplayField::new("id", "ID"), DisplayField::new("type_name", "Type")],
            Self::User => vec![
                DisplayField::new("id", "ID"),
                DisplayField::new("username", "Username"),
                DisplayField::new("email", "Email"),
                DisplayField::new("role", "Role"),
            ],
        }
    }

    /// Inputs for creating a record.
    #[must_use]
    pub fn form_fields(self) -> Vec<FormField> {
        match self {
            Self::Movie => vec![
                FormField::text("title", "Title").with_placeholder("Movie title"),
                FormField::textarea("description", "Description"),
                FormField::number("release_year", "Release year").with_placeholder("2024"),
                FormField::number("duration", "Duration (minutes)"),
                FormField::number("rating", "Rating"),
                FormField::text("poster_url", "Poster URL"),
                FormField::text("trailer_url", "Trailer URL"),
                FormField::select("country_id", "Country", Vec::new()),
                FormField::select("type_id", "Type", Vec::new()),
            ],
            Self::Category => vec![FormField::text("name", "Name").with_placeholder("Category name")],
            Self::Country => vec![FormField::text("name", "Name").with_placeholder("Country name")],
            Self::Type => vec![FormField::text("type_name", "Type name").with_placeholder("Type name")],
            Self::User => vec![
                FormField::text("username", "Username"),
                FormField::text("email", "Email").with_placeholder("user@example.com"),
                FormField::password("password", "Password"),
                FormField::select(
                    "role",
                    "Role",
                    vec![SelectOption::new("user", "User"), SelectOption::new("admin", "Admin")],
                ),
            ],
        }
    }

    /// Inputs for editing a record: the create set without write-only
    /// password inputs.
    #[must_use]
    pub fn edit_fields(self) -> Vec<FormField> {
        self.form_fields()
            .into_iter()
            .filter(|field| field.kind != FieldKind::Password)
            .collect()
    }

    #[must_use]
    pub fn list_view(self, records: Vec<Record>) -> ListView {
        ListView::new(self.title(), records, self.search_fields(), self.display_fields())
            .with_key_field(self.key_field())
    }

    #[must_use]
    pub fn update_form(self, records: Vec<Record>) -> UpdateForm {
        UpdateForm::new(records, self.edit_fields(), self.collection_path()).with_key_field(self.key_field())
    }

    #[must_use]
    pub fn add_form(self) -> AddForm {
        AddForm::new(self.singular())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for ResourceKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_title(s).ok_or_else(|| AdminError::Validation(format!("unknown resource: {s}")))
    }
}

fn render_rating(record: &Record) -> String {
    match record.get("rating").and_then(Value::as_f64) {
        Some(rating) => format!("{rating:.1}/10"),
        None => crate::views::list::MISSING_CELL.to_owned(),
    }
}
