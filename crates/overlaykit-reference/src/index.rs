//! Builds stable references from live images.

use std::sync::Arc;

use overlaykit_core::{TagKey, TagStore, TagValue, UidGenerator, UuidGenerator};

use crate::model::{ImageReference, SeriesReference};
use crate::source::ImageSource;

/// Produces [`SeriesReference`]s for images, generating missing identifiers.
///
/// Generated identifiers are written back into the image's metadata store,
/// so building a reference twice for the same image yields the same
/// identifiers. See [`overlaykit_core::tags`] for the behavior when two
/// threads build the first reference of an image at the same time.
#[derive(Clone)]
pub struct ImageReferenceIndex {
    generator: Arc<dyn UidGenerator>,
}

impl std::fmt::Debug for ImageReferenceIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageReferenceIndex").finish_non_exhaustive()
    }
}

impl Default for ImageReferenceIndex {
    fn default() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}

impl ImageReferenceIndex {
    pub fn new(generator: Arc<dyn UidGenerator>) -> Self {
        Self { generator }
    }

    /// One-series, one-image reference for `image`
    pub fn build_reference<I>(&self, image: &I) -> SeriesReference
    where
        I: ImageSource + ?Sized,
    {
        let tags = image.tag_store();
        let series_id = self.resolve_uid(tags, &TagKey::SERIES_INSTANCE_UID);
        let instance_id = self.resolve_uid(tags, &TagKey::SOP_INSTANCE_UID);

        let frames = match image.media_key().frame_index() {
            Some(index) if image.frame_count() > 1 => vec![index],
            _ => Vec::new(),
        };

        SeriesReference::new(series_id)
            .with_image(ImageReference::with_frames(instance_id, frames))
    }

    /// Identifier stored under `key`, generated and persisted when missing or blank
    fn resolve_uid(&self, tags: &dyn TagStore, key: &TagKey) -> String {
        let mut generated = false;
        let value = tags.upsert_with(key, &mut || {
            generated = true;
            TagValue::Text(self.generator.generate())
        });

        let uid = match value {
            TagValue::Text(text) if text.trim().is_empty() => {
                let fresh = self.generator.generate();
                tracing::warn!(tag = %key, "replacing blank identifier");
                tags.set(key.clone(), TagValue::Text(fresh.clone()));
                fresh
            }
            TagValue::Text(text) => text,
            other => other.to_string(),
        };

        if generated {
            tracing::debug!(tag = %key, uid = %uid, "generated missing identifier");
        }
        uid
    }
}
