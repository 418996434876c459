use super::comments::{create_comment, delete_comment, list_comments, update_comment};
use super::handlers::{
    create_resource, delete_resource, get_resource, healthcheck, list_resources, update_resource,
};
use super::{ApiError, AppState};
use crate::model::{NewsArticle, Project, Publication, Resource};
use crate::store::{StoreFor, Stores};
use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new().route("/health", get(healthcheck));

    let router = resource_routes::<Project>(router);
    let router = resource_routes::<Publication>(router);
    let router = resource_routes::<NewsArticle>(router);

    router
        .route(
            "/api/news/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/api/news/:id/comments/:comment_id",
            axum::routing::patch(update_comment).delete(delete_comment),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET|POST /api/{kind}` and `GET|PATCH|DELETE /api/{kind}/:id`.
fn resource_routes<R>(router: Router<AppState>) -> Router<AppState>
where
    R: Resource<Scope = ()>,
    Stores: StoreFor<R>,
{
    let collection = R::collection_path(&());
    let item = format!("{collection}/:id");

    router
        .route(
            &collection,
            get(list_resources::<R>).post(create_resource::<R>),
        )
        .route(
            &item,
            get(get_resource::<R>)
                .patch(update_resource::<R>)
                .delete(delete_resource::<R>),
        )
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(format!("panic: {detail}")).into_response()
}
