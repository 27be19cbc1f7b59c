//! Explicit dependency wiring plus the product orchestration that spans
//! stores and image storage. Handlers stay thin; everything multi-step
//! lives here.

use std::path::PathBuf;
use std::sync::Arc;

use stockroom_catalog::{NewProduct, Product};
use stockroom_core::{DomainError, DomainResult, ProductId};
use stockroom_media::{ImageStore, MediaError};
use stockroom_store::{CategoryStore, MemoryCategoryStore, MemoryProductStore, ProductStore};

pub struct AppServices {
    pub products: Arc<dyn ProductStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub images: ImageStore,
}

impl AppServices {
    pub fn in_memory(images_dir: PathBuf) -> Self {
        Self {
            products: Arc::new(MemoryProductStore::new()),
            categories: Arc::new(MemoryCategoryStore::new()),
            images: ImageStore::new(images_dir),
        }
    }

    pub async fn create_product(&self, draft: NewProduct) -> DomainResult<Product> {
        self.require_stored_image(&draft.image_url).await?;
        self.products.insert(draft).await
    }

    /// Merge an update over the stored record, validate, and persist. If the
    /// image reference changed, the previous stored file is deleted after the
    /// row is written.
    pub async fn update_product(&self, updated: Product) -> DomainResult<Product> {
        let existing = self
            .products
            .find_by_id(updated.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Producto no encontrado."))?;

        updated.validate()?;
        self.require_stored_image(&updated.image_url).await?;

        let previous_url = existing.image_url;
        let saved = self.products.replace(updated).await?;
        if saved.image_url != previous_url {
            self.images.delete_if_not_default(&previous_url).await;
        }
        Ok(saved)
    }

    pub async fn delete_product(&self, id: ProductId) -> DomainResult<()> {
        let existing = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Producto no encontrado."))?;
        self.products.delete(id).await?;
        self.images.delete_if_not_default(&existing.image_url).await;
        Ok(())
    }

    /// Store uploaded image bytes, point the product at them, and drop the
    /// previous stored file.
    pub async fn attach_image(
        &self,
        id: ProductId,
        mime: &str,
        bytes: &[u8],
    ) -> DomainResult<Product> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Producto no encontrado."))?;

        let url = self
            .images
            .save(id.value(), mime, bytes)
            .await
            .map_err(media_error)?;

        let previous_url = std::mem::replace(&mut product.image_url, url);
        let saved = match self.products.replace(product).await {
            Ok(saved) => saved,
            Err(e) => {
                // The row write failed; the fresh file is orphaned.
                tracing::warn!(product_id = id.value(), "discarding orphaned upload");
                return Err(e);
            }
        };
        self.images.delete_if_not_default(&previous_url).await;
        Ok(saved)
    }

    /// A stored-image URL must point at an existing file. External URLs and
    /// the default image always pass.
    async fn require_stored_image(&self, url: &str) -> DomainResult<()> {
        if self.images.exists_by_url(url).await {
            Ok(())
        } else {
            Err(DomainError::validation("La imagen indicada no existe."))
        }
    }
}

fn media_error(e: MediaError) -> DomainError {
    match e {
        MediaError::UnsupportedType | MediaError::TooLarge => {
            DomainError::validation(e.to_string())
        }
        MediaError::Io(detail) => DomainError::internal(detail.to_string()),
    }
}
