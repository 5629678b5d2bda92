//! Media feature slice: validates, stores and screens uploaded images and videos.

mod error;
#[cfg(feature = "server")]
mod handlers;
mod inspector;
mod screening;

pub use crate::error::{MediaError, MediaErrorExt};
#[cfg(feature = "server")]
pub use crate::handlers::router;
pub use crate::inspector::{MediaInspector, SignatureInspector};
pub use crate::screening::{AcceptedUpload, MediaScreener, MediaVerdict};

use std::sync::Arc;
use tscope_domain::config::MediaConfig;
use tscope_kernel::domain::registry::InitializedSlice;

/// Media feature state
#[tscope_derive::feature_slice]
pub struct Media {
    pub screener: MediaScreener,
}

impl Media {
    #[must_use]
    pub fn with_inspector(cfg: &MediaConfig, inspector: Arc<dyn MediaInspector>) -> Self {
        Self::new(MediaInner { screener: MediaScreener::new(cfg, inspector) })
    }
}

/// Builds the media slice with the signature inspector and creates the upload directory.
///
/// # Errors
/// [`MediaError::Io`] when the upload directory cannot be created.
pub fn build(cfg: &MediaConfig) -> Result<Media, MediaError> {
    std::fs::create_dir_all(&cfg.upload_dir).context(format!("Creating {}", cfg.upload_dir.display()))?;
    tracing::info!(
        upload_dir = %cfg.upload_dir.display(),
        delay_ms = cfg.processing_delay_ms,
        "Media slice initialized"
    );
    Ok(Media::with_inspector(cfg, Arc::new(SignatureInspector)))
}

/// Initializes the media feature.
///
/// # Errors
/// See [`build`].
pub fn init(cfg: &MediaConfig) -> Result<InitializedSlice, MediaError> {
    build(cfg).map(InitializedSlice::new)
}
