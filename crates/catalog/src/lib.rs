//! `stockroom-catalog` — pure catalog domain.
//!
//! Products, categories, field validation, the catalog query engine
//! (filter/sort/paginate over an immutable snapshot), and stock-delta
//! arithmetic. No IO, no shared state; everything here is safe to call
//! concurrently across independent requests.

pub mod category;
pub mod product;
pub mod query;
pub mod stock;

pub use category::Category;
pub use product::{NewProduct, Product};
pub use query::{
    CatalogFilter, CatalogPage, CatalogView, PageRequest, SortDirection, SortKey, SortSpec, query,
};
pub use stock::apply_delta;
