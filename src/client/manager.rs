//! Admin list state kept in sync with a [`ResourceApi`].
//!
//! The cache has no authority of its own: it only changes after the API has
//! confirmed a mutation, and a failed call leaves it exactly as it was.
//!
//! Every async operation takes `&mut self`, so one manager can never have two
//! operations in flight (the "submit button is disabled" rule is enforced by
//! the borrow checker). Dropping an operation's future abandons it; a
//! response that arrives later has nowhere to land and is discarded.

use super::api::ResourceApi;
use super::error::{ClientError, Result};
use super::notice::Notice;
use super::search;
use crate::core::EntityId;
use crate::model::{Comment, CommentStatus, Resource};
use tracing::{error, info, warn};

/// What to do with the cache after a confirmed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcilePolicy {
    /// Apply the entity returned by the API verbatim.
    #[default]
    TrustResponse,
    /// Reload the whole collection. Falls back to the returned entity if the
    /// reload fails.
    Refetch,
}

/// Open add or edit workflow.
#[derive(Debug, Clone)]
pub enum Session<R: Resource> {
    Adding(R::Draft),
    Editing(R),
}

pub struct ListManager<R: Resource, A: ResourceApi<R>> {
    api: A,
    items: Vec<R>,
    query: String,
    session: Option<Session<R>>,
    notices: Vec<Notice>,
    policy: ReconcilePolicy,
}

impl<R: Resource, A: ResourceApi<R>> ListManager<R, A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            items: Vec::new(),
            query: String::new(),
            session: None,
            notices: Vec::new(),
            policy: ReconcilePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The cache filtered by the current query, recomputed on every call.
    pub fn visible(&self) -> Vec<&R> {
        search::filter(&self.items, &self.query)
    }

    pub fn session(&self) -> Option<&Session<R>> {
        self.session.as_ref()
    }

    /// Drains notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetches the full collection. No retry on failure; the cache keeps
    /// whatever it held before (empty on first load).
    pub async fn load(&mut self) -> Result<()> {
        match self.api.list().await {
            Ok(items) => {
                info!(kind = R::KIND, count = items.len(), "list loaded");
                self.items = items;
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Failed to load {}", R::KIND), &err);
                Err(err)
            }
        }
    }

    /// Opens the add workflow. A draft kept from a failed attempt is reused.
    pub fn begin_add(&mut self) {
        if !matches!(self.session, Some(Session::Adding(_))) {
            self.session = Some(Session::Adding(R::Draft::default()));
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match self.session.as_mut() {
            Some(Session::Adding(draft)) => Some(draft),
            _ => None,
        }
    }

    /// Opens the edit workflow on a copy of the cached entity.
    pub fn begin_edit(&mut self, id: EntityId) -> Result<()> {
        let entity = self
            .items
            .iter()
            .find(|entity| entity.id() == id)
            .cloned()
            .ok_or(ClientError::NotLoaded { kind: R::KIND, id })?;

        self.session = Some(Session::Editing(entity));
        Ok(())
    }

    pub fn editing_mut(&mut self) -> Option<&mut R> {
        match self.session.as_mut() {
            Some(Session::Editing(entity)) => Some(entity),
            _ => None,
        }
    }

    /// Discards the open session and its draft.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub async fn confirm_add(&mut self) -> Result<R> {
        let draft = match &self.session {
            Some(Session::Adding(draft)) => draft.clone(),
            _ => return Err(ClientError::NoSession("add")),
        };

        match self.api.create(&draft).await {
            Ok(created) => {
                self.session = None;
                let entity = created.clone();
                self.reconcile(move |items| items.insert(0, entity)).await;
                self.succeed(format!("{} added successfully", R::LABEL));
                Ok(created)
            }
            Err(err) => {
                self.fail(format!("Failed to add {}", R::LABEL.to_lowercase()), &err);
                Err(err)
            }
        }
    }

    pub async fn confirm_edit(&mut self) -> Result<R> {
        let entity = match &self.session {
            Some(Session::Editing(entity)) => entity.clone(),
            _ => return Err(ClientError::NoSession("edit")),
        };

        match self.api.update(&entity).await {
            Ok(updated) => {
                self.session = None;
                let replacement = updated.clone();
                self.reconcile(move |items| {
                    for item in items.iter_mut().filter(|item| item.id() == replacement.id()) {
                        *item = replacement.clone();
                    }
                })
                .await;
                self.succeed(format!("{} updated successfully", R::LABEL));
                Ok(updated)
            }
            Err(err) => {
                self.fail(format!("Failed to update {}", R::LABEL.to_lowercase()), &err);
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: EntityId) -> Result<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                if matches!(&self.session, Some(Session::Editing(entity)) if entity.id() == id) {
                    self.session = None;
                }
                self.reconcile(move |items| items.retain(|item| item.id() != id))
                    .await;
                self.succeed(format!("{} deleted successfully", R::LABEL));
                Ok(())
            }
            Err(err) => {
                self.fail(format!("Failed to delete {}", R::LABEL.to_lowercase()), &err);
                Err(err)
            }
        }
    }

    async fn reconcile<F>(&mut self, apply: F)
    where
        F: FnOnce(&mut Vec<R>),
    {
        if self.policy == ReconcilePolicy::Refetch {
            match self.api.list().await {
                Ok(items) => {
                    self.items = items;
                    return;
                }
                Err(err) => {
                    warn!(kind = R::KIND, error = %err, "refetch after mutation failed, using response");
                }
            }
        }
        apply(&mut self.items);
    }

    fn succeed(&mut self, message: String) {
        info!(kind = R::KIND, "{message}");
        self.notices.push(Notice::success(message));
    }

    fn fail(&mut self, message: String, err: &ClientError) {
        error!(kind = R::KIND, error = %err, "{message}");
        self.notices.push(Notice::error(message));
    }
}

impl<A: ResourceApi<Comment>> ListManager<Comment, A> {
    /// Moderation shortcut: edit one comment's status and confirm.
    ///
    /// Replaces any session that was open.
    pub async fn set_status(&mut self, id: EntityId, status: CommentStatus) -> Result<Comment> {
        if let Err(err) = self.begin_edit(id) {
            self.fail(format!("Failed to update {}", Comment::LABEL.to_lowercase()), &err);
            return Err(err);
        }
        if let Some(comment) = self.editing_mut() {
            comment.status = status;
        }
        info!(%id, status = status.as_str(), "moderating comment");
        self.confirm_edit().await
    }
}
