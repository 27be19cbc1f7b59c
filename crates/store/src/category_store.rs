use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stockroom_catalog::Category;
use stockroom_core::{CategoryId, DomainError, DomainResult};

const NOT_FOUND: &str = "Categoría no encontrada.";

/// Category persistence contract.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Category>>;

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;

    /// Persist a new category, assigning the next sequential identifier.
    async fn insert(&self, name: String) -> DomainResult<Category>;

    async fn rename(&self, id: CategoryId, name: String) -> DomainResult<Category>;

    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
}

/// In-memory store, mirror of [`crate::MemoryProductStore`].
pub struct MemoryCategoryStore {
    inner: RwLock<State>,
}

struct State {
    rows: BTreeMap<u32, Category>,
    next_id: u32,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let state = self.inner.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let state = self.inner.read().await;
        Ok(state.rows.get(&id.value()).cloned())
    }

    async fn insert(&self, name: String) -> DomainResult<Category> {
        let mut state = self.inner.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let category = Category {
            id: CategoryId::new(id),
            name,
        };
        state.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn rename(&self, id: CategoryId, name: String) -> DomainResult<Category> {
        let mut state = self.inner.write().await;
        let row = state
            .rows
            .get_mut(&id.value())
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        row.name = name;
        Ok(row.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut state = self.inner.write().await;
        if state.rows.remove(&id.value()).is_none() {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(())
    }
}
