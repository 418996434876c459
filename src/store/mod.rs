pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;

use crate::core::{EntityId, Result, Versioned};
use crate::model::{Comment, NewsArticle, Project, Publication, Resource};
use async_trait::async_trait;
use std::sync::Arc;

/// CRUD contract for one collection.
///
/// `scope` narrows every call to one parent (`()` for top-level
/// collections). Lookups match on both scope and id.
///
/// `expected_version` is an optional optimistic-concurrency token. `None`
/// means last write wins.
#[async_trait]
pub trait DataStore<R: Resource>: Send + Sync {
    async fn list(&self, scope: &R::Scope) -> Result<Vec<R>>;

    async fn get(&self, scope: &R::Scope, id: EntityId) -> Result<Versioned<R>>;

    async fn create(&self, scope: R::Scope, draft: R::Draft) -> Result<Versioned<R>>;

    async fn replace(
        &self,
        scope: &R::Scope,
        id: EntityId,
        entity: R,
        expected_version: Option<u64>,
    ) -> Result<Versioned<R>>;

    async fn delete(
        &self,
        scope: &R::Scope,
        id: EntityId,
        expected_version: Option<u64>,
    ) -> Result<()>;
}

/// Every collection the site serves, behind the [`DataStore`] contract.
///
/// Built once per process (or once per test) and shared through the web
/// state.
#[derive(Clone)]
pub struct Stores {
    pub projects: Arc<dyn DataStore<Project>>,
    pub publications: Arc<dyn DataStore<Publication>>,
    pub news: Arc<dyn DataStore<NewsArticle>>,
    pub comments: Arc<dyn DataStore<Comment>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(InMemoryStore::new()),
            publications: Arc::new(InMemoryStore::new()),
            news: Arc::new(InMemoryStore::new()),
            comments: Arc::new(InMemoryStore::new()),
        }
    }
}

/// Selects the store for one resource type.
pub trait StoreFor<R: Resource> {
    fn store(&self) -> &Arc<dyn DataStore<R>>;
}

macro_rules! store_for {
    ($resource:ty, $field:ident) => {
        impl StoreFor<$resource> for Stores {
            fn store(&self) -> &Arc<dyn DataStore<$resource>> {
                &self.$field
            }
        }
    };
}

store_for!(Project, projects);
store_for!(Publication, publications);
store_for!(NewsArticle, news);
store_for!(Comment, comments);
