use super::api::{DeleteAck, Endpoints, ResourceApi, check_delete_ack, decode_response};
use super::error::Result;
use crate::core::EntityId;
use crate::model::Resource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// `reqwest` transport against a running server.
///
/// Needs absolute endpoints; relative targets fail as transport errors.
pub struct HttpApi<R: Resource> {
    client: reqwest::Client,
    endpoints: Endpoints,
    scope: R::Scope,
}

impl<R: Resource> HttpApi<R> {
    pub fn new(client: reqwest::Client, endpoints: Endpoints, scope: R::Scope) -> Self {
        Self {
            client,
            endpoints,
            scope,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for HttpApi<R> {
    async fn list(&self) -> Result<Vec<R>> {
        let url = self.endpoints.collection::<R>(&self.scope);
        self.send(self.client.get(url)).await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R> {
        let url = self.endpoints.collection::<R>(&self.scope);
        self.send(self.client.post(url).json(draft)).await
    }

    async fn update(&self, entity: &R) -> Result<R> {
        let url = self.endpoints.item::<R>(&self.scope, entity.id());
        self.send(self.client.patch(url).json(entity)).await
    }

    async fn delete(&self, id: EntityId) -> Result<()> {
        let url = self.endpoints.item::<R>(&self.scope, id);
        let ack: DeleteAck = self.send(self.client.delete(url)).await?;
        check_delete_ack(ack)
    }
}
