use super::{ModelError, Resource, StatusRule, ensure_max_len, ensure_not_blank};
use crate::core::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation state of a reader comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub const ALL: &'static [&'static str] = &["pending", "approved", "rejected"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Reader comment attached to a news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub news_id: EntityId,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub status: CommentStatus,
}

/// What a reader submits. Status is not part of it: new comments always
/// start out pending.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommentDraft {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

fn validate_fields(author_name: &str, author_email: &str, content: &str) -> Result<(), ModelError> {
    ensure_not_blank("authorName", author_name)?;
    ensure_max_len("authorName", author_name, 100)?;

    match author_email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => {
            return Err(ModelError::Invalid(
                "authorEmail must be a valid email address".to_string(),
            ));
        }
    }

    ensure_not_blank("content", content)?;
    ensure_max_len("content", content, 2000)
}

impl Resource for Comment {
    type Scope = EntityId;
    type Draft = CommentDraft;

    const KIND: &'static str = "comments";
    const LABEL: &'static str = "Comment";
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["id", "newsId", "createdAt", "authorEmail"];
    const STATUS: Option<StatusRule> = Some(StatusRule {
        field: "status",
        allowed: CommentStatus::ALL,
        required_on_update: true,
        checked_on_create: false,
    });

    fn id(&self) -> EntityId {
        self.id
    }

    fn scope(&self) -> EntityId {
        self.news_id
    }

    fn from_draft(id: EntityId, news_id: EntityId, draft: CommentDraft) -> Self {
        Self {
            id,
            news_id,
            author_name: draft.author_name.trim().to_string(),
            author_email: draft.author_email.trim().to_string(),
            content: draft.content,
            created_at: Utc::now(),
            status: CommentStatus::Pending,
        }
    }

    fn collection_path(news_id: &EntityId) -> String {
        format!("/api/news/{news_id}/{}", Self::KIND)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.author_name.as_str(),
            self.author_email.as_str(),
            self.content.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), ModelError> {
        validate_fields(&self.author_name, &self.author_email, &self.content)
    }

    fn validate_draft(draft: &CommentDraft) -> Result<(), ModelError> {
        validate_fields(&draft.author_name, &draft.author_email, &draft.content)
    }
}
