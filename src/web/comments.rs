//! Comments nested under a news article: `/api/news/:id/comments[/:comment_id]`.
//!
//! Both path segments are validated before anything touches the store, and
//! lookups match on the (article, comment) pair.

use super::handlers::{
    DeleteResponse, JsonBody, create_entity, parse_id, read_object, update_entity,
};
use super::headers::{etag, parse_if_match, revalidate};
use super::{AppState, Result};
use crate::core::EntityId;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

fn parse_pair(raw_news_id: &str, raw_comment_id: &str) -> Result<(EntityId, EntityId)> {
    Ok((parse_id(raw_news_id)?, parse_id(raw_comment_id)?))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(raw_news_id): Path<String>,
) -> Result<impl IntoResponse> {
    let news_id = parse_id(&raw_news_id)?;
    let comments = state.stores.comments.list(&news_id).await?;
    Ok((revalidate(state.revalidate), Json(comments)))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(raw_news_id): Path<String>,
    body: JsonBody,
) -> Result<impl IntoResponse> {
    let news_id = parse_id(&raw_news_id)?;
    let body = read_object(body)?;

    // Comments only attach to articles that exist.
    state.stores.news.get(&(), news_id).await?;

    let created = create_entity(state.stores.comments.as_ref(), news_id, body).await?;
    Ok((
        StatusCode::CREATED,
        etag(created.version),
        Json(created.entity),
    ))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path((raw_news_id, raw_comment_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<impl IntoResponse> {
    let (news_id, comment_id) = parse_pair(&raw_news_id, &raw_comment_id)?;
    let expected_version = parse_if_match(&headers)?;
    let patch = read_object(body)?;

    let updated = update_entity(
        state.stores.comments.as_ref(),
        &news_id,
        comment_id,
        patch,
        expected_version,
    )
    .await?;
    Ok((etag(updated.version), Json(updated.entity)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path((raw_news_id, raw_comment_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>> {
    let (news_id, comment_id) = parse_pair(&raw_news_id, &raw_comment_id)?;
    let expected_version = parse_if_match(&headers)?;

    state
        .stores
        .comments
        .delete(&news_id, comment_id, expected_version)
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}
