use super::error::{ClientError, Result};
use crate::config::AppConfig;
use crate::core::EntityId;
use crate::model::Resource;
use crate::web::ErrorResponse;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The four calls the list manager needs, scoped to one collection.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>>;

    async fn create(&self, draft: &R::Draft) -> Result<R>;

    /// Sends the whole entity as the patch body.
    async fn update(&self, entity: &R) -> Result<R>;

    async fn delete(&self, id: EntityId) -> Result<()>;
}

/// Builds request targets. Without a base URL, targets stay relative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: Option<String>,
}

impl Endpoints {
    pub fn relative() -> Self {
        Self { base: None }
    }

    pub fn absolute(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: Some(base.trim_end_matches('/').to_string()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        match config.public_base_url.as_deref() {
            Some(base) => Self::absolute(base),
            None => Self::relative(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        match &self.base {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }

    pub fn collection<R: Resource>(&self, scope: &R::Scope) -> String {
        self.url(&R::collection_path(scope))
    }

    pub fn item<R: Resource>(&self, scope: &R::Scope, id: EntityId) -> String {
        format!("{}/{id}", self.collection::<R>(scope))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteAck {
    pub success: bool,
}

/// Turns a status code and raw body into either `T` or an API error.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if (200..300).contains(&status) {
        return serde_json::from_slice(body).map_err(|err| ClientError::Decode(err.to_string()));
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error) => Err(ClientError::Api {
            status,
            code: error.code,
            message: error.error,
        }),
        Err(_) => Err(ClientError::Api {
            status,
            code: "unknown".to_string(),
            message: String::from_utf8_lossy(body).into_owned(),
        }),
    }
}

pub(crate) fn check_delete_ack(ack: DeleteAck) -> Result<()> {
    if ack.success {
        Ok(())
    } else {
        Err(ClientError::Decode(
            "delete was not acknowledged".to_string(),
        ))
    }
}
