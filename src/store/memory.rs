use super::DataStore;
use crate::core::{EntityId, Result, StoreError, Versioned};
use crate::model::Resource;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

struct StoreState<R> {
    items: Vec<Versioned<R>>,
    next_id: u64,
}

/// Process-local store holding one ordered collection.
///
/// Newest entities come first. Ids come from a counter and are never reused,
/// even after deletes.
pub struct InMemoryStore<R: Resource> {
    state: RwLock<StoreState<R>>,
}

impl<R: Resource> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R: Resource> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn position<R: Resource>(items: &[Versioned<R>], scope: &R::Scope, id: EntityId) -> Result<usize> {
    items
        .iter()
        .position(|item| item.entity.id() == id && item.entity.scope() == *scope)
        .ok_or(StoreError::NotFound { kind: R::KIND, id })
}

fn check_version<R: Resource>(
    current: &Versioned<R>,
    id: EntityId,
    expected_version: Option<u64>,
) -> Result<()> {
    match expected_version {
        Some(expected) if expected != current.version => Err(StoreError::VersionConflict {
            kind: R::KIND,
            id,
            expected,
            actual: current.version,
        }),
        _ => Ok(()),
    }
}

#[async_trait]
impl<R: Resource> DataStore<R> for InMemoryStore<R> {
    async fn list(&self, scope: &R::Scope) -> Result<Vec<R>> {
        let state = self.state.read().await;
        Ok(state
            .items
            .iter()
            .filter(|item| item.entity.scope() == *scope)
            .map(|item| item.entity.clone())
            .collect())
    }

    async fn get(&self, scope: &R::Scope, id: EntityId) -> Result<Versioned<R>> {
        let state = self.state.read().await;
        let index = position(&state.items, scope, id)?;
        Ok(state.items[index].clone())
    }

    async fn create(&self, scope: R::Scope, draft: R::Draft) -> Result<Versioned<R>> {
        let mut state = self.state.write().await;

        let id = EntityId::new(state.next_id)
            .ok_or_else(|| StoreError::Unavailable(format!("{} id counter exhausted", R::KIND)))?;
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable(format!("{} id counter exhausted", R::KIND)))?;

        let stored = Versioned::new(R::from_draft(id, scope, draft));
        state.items.insert(0, stored.clone());

        debug!(kind = R::KIND, %id, "entity created");
        Ok(stored)
    }

    async fn replace(
        &self,
        scope: &R::Scope,
        id: EntityId,
        entity: R,
        expected_version: Option<u64>,
    ) -> Result<Versioned<R>> {
        let mut state = self.state.write().await;
        let index = position(&state.items, scope, id)?;
        let current = &mut state.items[index];
        check_version(current, id, expected_version)?;

        current.entity = entity;
        current.version += 1;

        debug!(kind = R::KIND, %id, version = current.version, "entity replaced");
        Ok(current.clone())
    }

    async fn delete(
        &self,
        scope: &R::Scope,
        id: EntityId,
        expected_version: Option<u64>,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let index = position(&state.items, scope, id)?;
        check_version(&state.items[index], id, expected_version)?;

        state.items.remove(index);

        debug!(kind = R::KIND, %id, "entity deleted");
        Ok(())
    }
}
