//! `stockroom-store` — persistence seam for products and categories.
//!
//! Handlers depend on the [`ProductStore`]/[`CategoryStore`] traits; the
//! in-memory implementations back the process today and keep the door open
//! for a SQL-backed implementation without touching the API layer. Mutations
//! run under one write lock, so stock adjustment is an atomic
//! read-modify-write rather than the racy read-then-write of the original
//! service.

pub mod category_store;
pub mod product_store;

pub use category_store::{CategoryStore, MemoryCategoryStore};
pub use product_store::{MemoryProductStore, ProductStore};
