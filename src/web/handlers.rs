use super::headers::{etag, parse_if_match, revalidate};
use super::{ApiError, AppState, Result};
use crate::core::{EntityId, StoreError, Versioned};
use crate::model::{JsonObject, Resource, merge_patch};
use crate::store::{DataStore, StoreFor, Stores};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

pub type JsonBody = std::result::Result<Json<JsonValue>, JsonRejection>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub(crate) fn store_of<R: Resource>(stores: &Stores) -> &dyn DataStore<R>
where
    Stores: StoreFor<R>,
{
    StoreFor::<R>::store(stores).as_ref()
}

pub(crate) fn parse_id(raw: &str) -> Result<EntityId> {
    Ok(raw.parse::<EntityId>()?)
}

pub(crate) fn read_object(body: JsonBody) -> Result<JsonObject> {
    match body {
        Ok(Json(JsonValue::Object(object))) => Ok(object),
        Ok(Json(_)) => Err(ApiError::InvalidBody(
            "request body must be a JSON object".to_string(),
        )),
        Err(rejection) => Err(ApiError::InvalidBody(rejection.body_text())),
    }
}

pub(crate) async fn create_entity<R: Resource>(
    store: &dyn DataStore<R>,
    scope: R::Scope,
    body: JsonObject,
) -> Result<Versioned<R>> {
    if let Some(rule) = R::STATUS.filter(|rule| rule.checked_on_create) {
        rule.check(&body, false)?;
    }

    let draft: R::Draft = serde_json::from_value(JsonValue::Object(body)).map_err(|err| {
        ApiError::InvalidBody(format!("invalid {} fields: {err}", R::LABEL.to_lowercase()))
    })?;
    R::validate_draft(&draft)?;

    Ok(store.create(scope, draft).await?)
}

/// Tries an unguarded patch gets before the conflict is reported.
const MERGE_ATTEMPTS: usize = 8;

/// Status rule, then lookup, then shallow merge, then replace.
///
/// With `expected_version` a mismatch is the caller's conflict. Without it
/// the patch is merged again onto whatever version is current, so a
/// concurrent patch to other fields is never overwritten.
pub(crate) async fn update_entity<R: Resource>(
    store: &dyn DataStore<R>,
    scope: &R::Scope,
    id: EntityId,
    patch: JsonObject,
    expected_version: Option<u64>,
) -> Result<Versioned<R>> {
    if let Some(rule) = R::STATUS {
        rule.check(&patch, true)?;
    }

    let mut attempt = 1;
    loop {
        let current = store.get(scope, id).await?;
        let merged = merge_patch(&current.entity, &patch)?;
        merged.validate()?;

        let guard = expected_version.unwrap_or(current.version);
        match store.replace(scope, id, merged, Some(guard)).await {
            Err(StoreError::VersionConflict { .. })
                if expected_version.is_none() && attempt < MERGE_ATTEMPTS =>
            {
                debug!(
                    kind = R::KIND,
                    %id,
                    attempt,
                    "entity changed during patch, merging again"
                );
                attempt += 1;
            }
            result => return Ok(result?),
        }
    }
}

pub async fn list_resources<R>(State(state): State<AppState>) -> Result<impl IntoResponse>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let items = store_of::<R>(&state.stores).list(&()).await?;
    Ok((revalidate(state.revalidate), Json(items)))
}

pub async fn get_resource<R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let id = parse_id(&raw_id)?;
    let found = store_of::<R>(&state.stores).get(&(), id).await?;
    Ok((etag(found.version), Json(found.entity)))
}

pub async fn create_resource<R>(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<impl IntoResponse>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let body = read_object(body)?;
    let created = create_entity(store_of::<R>(&state.stores), (), body).await?;
    Ok((
        StatusCode::CREATED,
        etag(created.version),
        Json(created.entity),
    ))
}

pub async fn update_resource<R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    body: JsonBody,
) -> Result<impl IntoResponse>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let id = parse_id(&raw_id)?;
    let expected_version = parse_if_match(&headers)?;
    let patch = read_object(body)?;

    let updated =
        update_entity(store_of::<R>(&state.stores), &(), id, patch, expected_version).await?;
    Ok((etag(updated.version), Json(updated.entity)))
}

pub async fn delete_resource<R>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let id = parse_id(&raw_id)?;
    let expected_version = parse_if_match(&headers)?;

    store_of::<R>(&state.stores)
        .delete(&(), id, expected_version)
        .await?;
    Ok(Json(DeleteResponse { success: true }))
}
