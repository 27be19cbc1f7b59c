//! `stockroom-media` — product image lifecycle bookkeeping.
//!
//! Invariants upheld here:
//! - every product has a non-empty image reference; the default image stands
//!   in when the caller supplies none;
//! - replacing or deleting a product removes the previous stored file unless
//!   it is the default;
//! - URLs outside the public base (`/images`) are external references and are
//!   never touched on disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Public URL prefix under which stored images are addressed.
pub const IMAGE_PUBLIC_BASE: &str = "/images";

/// Filename of the default product image. Never deleted.
pub const DEFAULT_IMAGE_FILENAME: &str = "default-product.svg";

/// Public URL of the default product image.
pub const DEFAULT_IMAGE_URL: &str = "/images/default-product.svg";

/// Upload size cap, matching the original middleware (5 MiB).
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Tipo de archivo no permitido. Solo imágenes JPEG, PNG, WEBP o SVG.")]
    UnsupportedType,

    #[error("La imagen excede el tamaño máximo de 5MB.")]
    TooLarge,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Map an accepted mime type to its stored extension.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

pub fn build_image_url(filename: &str) -> String {
    format!("{IMAGE_PUBLIC_BASE}/{filename}")
}

pub fn is_default_url(url: &str) -> bool {
    url == DEFAULT_IMAGE_URL || url.ends_with(&format!("/{DEFAULT_IMAGE_FILENAME}"))
}

/// Filesystem-backed image store rooted at one directory.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let filename = url.strip_prefix(IMAGE_PUBLIC_BASE)?.strip_prefix('/')?;
        // Reject anything that could escape the images directory.
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return None;
        }
        Some(self.dir.join(filename))
    }

    /// Store image bytes for a product and return the new public URL.
    ///
    /// Filenames are `producto-{id}-{uuid}.{ext}` so replacements never
    /// collide with the file they replace.
    pub async fn save(
        &self,
        product_id: u32,
        mime: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        let ext = extension_for_mime(mime).ok_or(MediaError::UnsupportedType)?;
        if bytes.len() > MAX_IMAGE_SIZE_BYTES {
            return Err(MediaError::TooLarge);
        }

        self.ensure_dir().await?;
        let filename = format!("producto-{product_id}-{}.{ext}", Uuid::now_v7());
        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        Ok(build_image_url(&filename))
    }

    /// Whether the file a URL points at exists. External URLs (outside the
    /// public base) are assumed to exist, and the default image is always
    /// considered present; we only bookkeep our own files.
    pub async fn exists_by_url(&self, url: &str) -> bool {
        if is_default_url(url) || !url.starts_with(IMAGE_PUBLIC_BASE) {
            return true;
        }
        match self.path_for_url(url) {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        }
    }

    /// Delete the stored file behind a URL, unless it is the default image or
    /// an external reference. Missing files are not an error.
    pub async fn delete_if_not_default(&self, url: &str) {
        if is_default_url(url) || !url.starts_with(IMAGE_PUBLIC_BASE) {
            return;
        }
        let Some(path) = self.path_for_url(url) else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(url, error = %e, "failed to delete stored image");
        }
    }
}
