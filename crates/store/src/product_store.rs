use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stockroom_catalog::{NewProduct, Product, stock};
use stockroom_core::{DomainError, DomainResult, ProductId};

const NOT_FOUND: &str = "Producto no encontrado.";

/// Product persistence contract.
///
/// Reads return point-in-time snapshots/copies. All methods are fallible so
/// a storage-backed implementation can surface `DomainError::Internal`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Full snapshot, ordered by identifier.
    async fn find_all(&self) -> DomainResult<Vec<Product>>;

    /// Snapshot scoped by activity flag.
    async fn find_active(&self, active: bool) -> DomainResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;

    /// Persist a new product, assigning the next sequential identifier.
    async fn insert(&self, draft: NewProduct) -> DomainResult<Product>;

    /// Replace an existing record wholesale. `NotFound` when absent.
    async fn replace(&self, product: Product) -> DomainResult<Product>;

    async fn delete(&self, id: ProductId) -> DomainResult<()>;

    /// Apply a stock delta as one atomic read-modify-write.
    ///
    /// Implementations must not let a concurrent adjustment to the same
    /// product lose an update or drive stock negative.
    async fn adjust_stock(&self, id: ProductId, delta: i64) -> DomainResult<Product>;
}

/// In-memory store: a `BTreeMap` keyed by id (snapshots come out id-ordered)
/// behind one async `RwLock`.
pub struct MemoryProductStore {
    inner: RwLock<State>,
}

struct State {
    rows: BTreeMap<u32, Product>,
    next_id: u32,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let state = self.inner.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find_active(&self, active: bool) -> DomainResult<Vec<Product>> {
        let state = self.inner.read().await;
        Ok(state
            .rows
            .values()
            .filter(|p| p.active == active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let state = self.inner.read().await;
        Ok(state.rows.get(&id.value()).cloned())
    }

    async fn insert(&self, draft: NewProduct) -> DomainResult<Product> {
        let mut state = self.inner.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let product = draft.into_product(ProductId::new(id));
        state.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn replace(&self, product: Product) -> DomainResult<Product> {
        let mut state = self.inner.write().await;
        let key = product.id.value();
        if !state.rows.contains_key(&key) {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        state.rows.insert(key, product.clone());
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut state = self.inner.write().await;
        if state.rows.remove(&id.value()).is_none() {
            return Err(DomainError::not_found(NOT_FOUND));
        }
        Ok(())
    }

    async fn adjust_stock(&self, id: ProductId, delta: i64) -> DomainResult<Product> {
        // Write lock held across read-modify-write: concurrent deltas to the
        // same product serialize instead of losing updates.
        let mut state = self.inner.write().await;
        let row = state
            .rows
            .get_mut(&id.value())
            .ok_or_else(|| DomainError::not_found(NOT_FOUND))?;
        row.current_stock = stock::apply_delta(row.current_stock, delta)?;
        Ok(row.clone())
    }
}
