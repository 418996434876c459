use super::{ModelError, Resource, StatusRule, ensure_max_len, ensure_title};
use crate::core::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Ongoing,
    Completed,
}

impl ProjectStatus {
    pub const ALL: &'static [&'static str] = &["ongoing", "completed"];
}

/// Research project shown on the projects page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub funding_source: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub researchers: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub period: String,
    pub funding_source: Option<String>,
    pub status: ProjectStatus,
    pub researchers: String,
}

impl ProjectDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

fn validate_fields(title: &str, description: &str) -> Result<(), ModelError> {
    ensure_title(title)?;
    ensure_max_len("description", description, 5000)
}

impl Resource for Project {
    type Scope = ();
    type Draft = ProjectDraft;

    const KIND: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const STATUS: Option<StatusRule> = Some(StatusRule {
        field: "status",
        allowed: ProjectStatus::ALL,
        required_on_update: false,
        checked_on_create: true,
    });

    fn id(&self) -> EntityId {
        self.id
    }

    fn scope(&self) {}

    fn from_draft(id: EntityId, _scope: (), draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            period: draft.period,
            funding_source: draft.funding_source.filter(|source| !source.trim().is_empty()),
            status: draft.status,
            researchers: draft.researchers,
        }
    }

    fn collection_path(_scope: &()) -> String {
        format!("/api/{}", Self::KIND)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.period.as_str(),
        ];
        if let Some(source) = self.funding_source.as_deref() {
            fields.push(source);
        }
        fields.push(self.researchers.as_str());
        fields
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_fields(&self.title, &self.description)
    }

    fn validate_draft(draft: &ProjectDraft) -> Result<(), ModelError> {
        validate_fields(&draft.title, &draft.description)
    }
}
