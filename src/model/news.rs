use super::{ModelError, Resource, ensure_max_len, ensure_title};
use crate::core::EntityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub published_at: Option<NaiveDate>,
}

fn validate_fields(title: &str, summary: &str) -> Result<(), ModelError> {
    ensure_title(title)?;
    ensure_max_len("summary", summary, 500)
}

impl Resource for NewsArticle {
    type Scope = ();
    type Draft = NewsDraft;

    const KIND: &'static str = "news";
    const LABEL: &'static str = "News article";

    fn id(&self) -> EntityId {
        self.id
    }

    fn scope(&self) {}

    fn from_draft(id: EntityId, _scope: (), draft: NewsDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            summary: draft.summary,
            content: draft.content,
            published_at: draft.published_at,
        }
    }

    fn collection_path(_scope: &()) -> String {
        format!("/api/{}", Self::KIND)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.summary.as_str(),
            self.content.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_fields(&self.title, &self.summary)
    }

    fn validate_draft(draft: &NewsDraft) -> Result<(), ModelError> {
        validate_fields(&draft.title, &draft.summary)
    }
}
