use super::api::{DeleteAck, Endpoints, ResourceApi, check_delete_ack, decode_response};
use super::error::{ClientError, Result};
use crate::core::EntityId;
use crate::model::Resource;
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// In-process transport: requests go straight into an axum [`Router`]
/// with relative targets, no socket involved.
pub struct RouterApi<R: Resource> {
    router: Router,
    endpoints: Endpoints,
    scope: R::Scope,
}

impl<R: Resource> RouterApi<R> {
    pub fn new(router: Router, scope: R::Scope) -> Self {
        Self {
            router,
            endpoints: Endpoints::relative(),
            scope,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: String,
        body: Body,
        json: bool,
    ) -> Result<T> {
        let mut request = Request::builder().method(method).uri(uri);
        if json {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body)
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        decode_response(status, &bytes)
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        uri: String,
        payload: &B,
    ) -> Result<T> {
        let body =
            serde_json::to_vec(payload).map_err(|err| ClientError::Transport(err.to_string()))?;
        self.send(method, uri, Body::from(body), true).await
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for RouterApi<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let uri = self.endpoints.collection::<R>(&self.scope);
        self.send(Method::GET, uri, Body::empty(), false).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R> {
        let uri = self.endpoints.collection::<R>(&self.scope);
        self.send_json(Method::POST, uri, draft).await
    }

    async fn update(&self, entity: &R) -> Result<R> {
        let uri = self.endpoints.item::<R>(&self.scope, entity.id());
        self.send_json(Method::PATCH, uri, entity).await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let uri = self.endpoints.item::<R>(&self.scope, id);
        let ack: DeleteAck = self.send(Method::DELETE, uri, Body::empty(), false).await?;
        check_delete_ack(ack)
    }
}
