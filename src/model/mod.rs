//! Entity types served by the site and the contract they share.
//!
//! Every collection (projects, publications, news, comments) implements
//! [`Resource`]. The web layer and the list manager are written once against
//! that trait, so adding a collection means adding one model file and one
//! route registration.

pub mod comment;
pub mod news;
pub mod project;
pub mod publication;

pub use comment::{Comment, CommentDraft, CommentStatus};
pub use news::{NewsArticle, NewsDraft};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use publication::{Publication, PublicationDraft};

use crate::core::EntityId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use thiserror::Error;

pub type JsonObject = JsonMap<String, JsonValue>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("{field} must be one of: {allowed}")]
    InvalidStatus { field: &'static str, allowed: String },

    #[error("{0}")]
    Invalid(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Closed set of values accepted for a status-like field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRule {
    pub field: &'static str,
    pub allowed: &'static [&'static str],
    /// Whether a PATCH body must carry this field.
    pub required_on_update: bool,
    /// Whether create bodies are checked. Off when the draft has no such
    /// field and a submitted value is simply dropped.
    pub checked_on_create: bool,
}

impl StatusRule {
    pub fn allows(&self, value: &str) -> bool {
        self.allowed.contains(&value)
    }

    /// Checks the status field of a raw request body.
    ///
    /// Values are matched case-sensitively. A missing field is accepted unless
    /// `updating` is set and the rule requires it on update.
    pub fn check(&self, body: &JsonObject, updating: bool) -> Result<(), ModelError> {
        match body.get(self.field) {
            None if updating && self.required_on_update => Err(self.violation()),
            None => Ok(()),
            Some(JsonValue::String(value)) if self.allows(value) => Ok(()),
            Some(_) => Err(self.violation()),
        }
    }

    fn violation(&self) -> ModelError {
        ModelError::InvalidStatus {
            field: self.field,
            allowed: self.allowed.join(", "),
        }
    }
}

/// One collection of entities exposed over the API.
pub trait Resource:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// `()` for top-level collections, the parent id for nested ones.
    type Scope: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Entity fields minus the identifier. `Default` is the blank add form.
    type Draft: Clone + fmt::Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Path segment and collection name, e.g. `projects`.
    const KIND: &'static str;

    /// Human-readable singular, e.g. `Project`.
    const LABEL: &'static str;

    /// Fields a patch can never overwrite.
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["id"];

    const STATUS: Option<StatusRule> = None;

    fn id(&self) -> EntityId;

    fn scope(&self) -> Self::Scope;

    fn from_draft(id: EntityId, scope: Self::Scope, draft: Self::Draft) -> Self;

    /// Route of the collection holding entities of `scope`, e.g. `/api/projects`.
    fn collection_path(scope: &Self::Scope) -> String;

    /// Text fields matched by the admin search box.
    fn search_fields(&self) -> Vec<&str>;

    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }

    fn validate_draft(_draft: &Self::Draft) -> Result<(), ModelError> {
        Ok(())
    }
}

/// Shallow merge: provided top-level fields overwrite, everything else is kept.
///
/// Immutable fields in the patch are skipped. The merged object must still
/// deserialize into `R`.
pub fn merge_patch<R: Resource>(current: &R, patch: &JsonObject) -> Result<R, ModelError> {
    let mut object = match serde_json::to_value(current) {
        Ok(JsonValue::Object(object)) => object,
        Ok(other) => {
            return Err(ModelError::Serialization(format!(
                "{} serialized to a non-object value: {other}",
                R::LABEL
            )));
        }
        Err(err) => return Err(ModelError::Serialization(err.to_string())),
    };

    for (field, value) in patch {
        if R::IMMUTABLE_FIELDS.contains(&field.as_str()) {
            continue;
        }
        object.insert(field.clone(), value.clone());
    }

    serde_json::from_value(JsonValue::Object(object)).map_err(|err| {
        ModelError::Invalid(format!(
            "invalid {} fields: {err}",
            R::LABEL.to_lowercase()
        ))
    })
}

pub(crate) fn ensure_not_blank(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Invalid(format!("{field} must not be blank")));
    }
    Ok(())
}

pub(crate) fn ensure_max_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Invalid(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_title(title: &str) -> Result<(), ModelError> {
    ensure_not_blank("title", title)?;
    ensure_max_len("title", title, 200)
}
