use super::{ModelError, Resource, ensure_max_len, ensure_title};
use crate::core::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationDraft {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: Option<i32>,
    pub url: Option<String>,
}

fn validate_fields(
    title: &str,
    authors: &str,
    year: Option<i32>,
    url: Option<&str>,
) -> Result<(), ModelError> {
    ensure_title(title)?;
    ensure_max_len("authors", authors, 1000)?;

    if let Some(year) = year {
        if !(1900..=2100).contains(&year) {
            return Err(ModelError::Invalid(
                "year must be between 1900 and 2100".to_string(),
            ));
        }
    }

    if let Some(url) = url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ModelError::Invalid(
                "url must start with http:// or https://".to_string(),
            ));
        }
    }

    Ok(())
}

impl Resource for Publication {
    type Scope = ();
    type Draft = PublicationDraft;

    const KIND: &'static str = "publications";
    const LABEL: &'static str = "Publication";

    fn id(&self) -> EntityId {
        self.id
    }

    fn scope(&self) {}

    fn from_draft(id: EntityId, _scope: (), draft: PublicationDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            authors: draft.authors,
            venue: draft.venue,
            year: draft.year,
            url: draft.url.filter(|url| !url.trim().is_empty()),
        }
    }

    fn collection_path(_scope: &()) -> String {
        format!("/api/{}", Self::KIND)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.authors.as_str(),
            self.venue.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_fields(&self.title, &self.authors, self.year, self.url.as_deref())
    }

    fn validate_draft(draft: &PublicationDraft) -> Result<(), ModelError> {
        validate_fields(&draft.title, &draft.authors, draft.year, draft.url.as_deref())
    }
}
