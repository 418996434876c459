// ============================================================================
// profweb: portfolio site resource API and admin list manager
// ============================================================================

pub mod client;
pub mod config;
pub mod core;
pub mod model;
pub mod store;
pub mod web;

pub use config::AppConfig;
pub use crate::core::{EntityId, StoreError, Versioned};
pub use model::{
    Comment, CommentDraft, CommentStatus, NewsArticle, NewsDraft, Project, ProjectDraft,
    ProjectStatus, Publication, PublicationDraft, Resource,
};
pub use store::{DataStore, InMemoryStore, Stores};
pub use web::{ApiError, AppState, build_router};

pub use client::{
    ClientError, Endpoints, HttpApi, ListManager, Notice, NoticeLevel, ReconcilePolicy,
    ResourceApi, RouterApi,
};
