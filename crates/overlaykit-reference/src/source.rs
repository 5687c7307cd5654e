//! What the reference index needs from a live image.

use overlaykit_core::{MemoryTagStore, TagKey, TagStore, TagValue};
use serde::{Deserialize, Serialize};

/// Positional key of an image inside its series
///
/// Frames of a multi-frame instance are keyed by their frame index; other
/// images may be keyed by anything else the loader chose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKey {
    Frame(u32),
    Label(String),
    None,
}

impl MediaKey {
    pub fn frame_index(&self) -> Option<u32> {
        match self {
            Self::Frame(index) => Some(*index),
            _ => None,
        }
    }
}

impl Default for MediaKey {
    fn default() -> Self {
        Self::None
    }
}

/// Live image as seen by [`ImageReferenceIndex`](crate::ImageReferenceIndex)
pub trait ImageSource {
    /// Metadata store of the image; identifiers are read from and written to it
    fn tag_store(&self) -> &dyn TagStore;

    /// Number of frames in the underlying multi-frame source (1 for single-frame)
    fn frame_count(&self) -> u32;

    /// Positional key of this image within its series
    fn media_key(&self) -> MediaKey;
}

/// Plain in-memory image description
#[derive(Debug)]
pub struct ImageElement {
    tags: MemoryTagStore,
    frame_count: u32,
    key: MediaKey,
}

impl ImageElement {
    /// Single-frame image with empty metadata
    pub fn new() -> Self {
        Self {
            tags: MemoryTagStore::new(),
            frame_count: 1,
            key: MediaKey::None,
        }
    }

    /// Frame `index` of a source holding `frame_count` frames
    pub fn frame(frame_count: u32, index: u32) -> Self {
        Self {
            tags: MemoryTagStore::new(),
            frame_count,
            key: MediaKey::Frame(index),
        }
    }

    pub fn with_key(mut self, key: MediaKey) -> Self {
        self.key = key;
        self
    }

    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_tag(self, key: TagKey, value: impl Into<TagValue>) -> Self {
        self.tags.set(key, value.into());
        self
    }

    pub fn tags(&self) -> &MemoryTagStore {
        &self.tags
    }
}

impl Default for ImageElement {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for ImageElement {
    fn tag_store(&self) -> &dyn TagStore {
        &self.tags
    }

    fn frame_count(&self) -> u32 {
        self.frame_count
    }

    fn media_key(&self) -> MediaKey {
        self.key.clone()
    }
}
