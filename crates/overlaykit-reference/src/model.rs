//! Reference records
//!
//! Plain data handed to the serialization layer. Identifiers are encoded as
//! `uuid` attributes and the frame list as a space-separated attribute
//! string, so a single-frame reference reads `{"frames": "", "uuid": ...}`.

use serde::{Deserialize, Serialize};

use crate::encoding::frames_attr;

/// Reference to one instance, optionally narrowed to some of its frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Instance identifier
    #[serde(rename = "uuid")]
    pub instance_id: String,
    /// Frame indices in declaration order; empty means the whole instance
    #[serde(with = "frames_attr", default)]
    pub frames: Vec<u32>,
}

impl ImageReference {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            frames: Vec::new(),
        }
    }

    pub fn with_frames(instance_id: impl Into<String>, frames: Vec<u32>) -> Self {
        Self {
            instance_id: instance_id.into(),
            frames,
        }
    }

    /// True when the reference covers every frame of the instance
    pub fn is_whole_instance(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether frame `index` is covered by this reference
    pub fn covers_frame(&self, index: u32) -> bool {
        self.frames.is_empty() || self.frames.contains(&index)
    }

    /// Append frames not already listed, keeping existing order.
    ///
    /// A whole-instance reference already covers every frame and stays
    /// whole. Merging a whole-instance reference widens this one to whole.
    pub fn merge_frames(&mut self, frames: &[u32]) {
        if self.frames.is_empty() {
            return;
        }
        if frames.is_empty() {
            self.frames.clear();
            return;
        }
        for &frame in frames {
            if !self.frames.contains(&frame) {
                self.frames.push(frame);
            }
        }
    }
}

/// A series and the ordered image references within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesReference {
    /// Series identifier
    #[serde(rename = "uuid")]
    pub series_id: String,
    #[serde(default)]
    pub images: Vec<ImageReference>,
}

impl SeriesReference {
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: ImageReference) -> Self {
        self.images.push(image);
        self
    }

    pub fn find_image(&self, instance_id: &str) -> Option<&ImageReference> {
        self.images.iter().find(|i| i.instance_id == instance_id)
    }

    /// Add `image`, merging frames into an existing entry for the same instance.
    ///
    /// Repeated frames are dropped, keeping the first occurrence.
    pub fn add_image(&mut self, image: ImageReference) {
        match self
            .images
            .iter_mut()
            .find(|i| i.instance_id == image.instance_id)
        {
            Some(existing) => existing.merge_frames(&image.frames),
            None => {
                let ImageReference {
                    instance_id,
                    frames,
                } = image;
                let mut unique = Vec::with_capacity(frames.len());
                for frame in frames {
                    if !unique.contains(&frame) {
                        unique.push(frame);
                    }
                }
                self.images
                    .push(ImageReference::with_frames(instance_id, unique));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_frame() {
        let whole = ImageReference::new("a");
        assert!(whole.is_whole_instance());
        assert!(whole.covers_frame(7));

        let narrowed = ImageReference::with_frames("a", vec![2, 5]);
        assert!(narrowed.covers_frame(5));
        assert!(!narrowed.covers_frame(3));
    }

    #[test]
    fn test_merge_frames_keeps_order_and_dedups() {
        let mut reference = ImageReference::with_frames("a", vec![4, 1]);
        reference.merge_frames(&[1, 9, 4, 2]);
        assert_eq!(reference.frames, vec![4, 1, 9, 2]);
    }

    #[test]
    fn test_merge_frames_whole_instance_wins() {
        let mut whole = ImageReference::new("a");
        whole.merge_frames(&[3]);
        assert!(whole.is_whole_instance());

        let mut narrowed = ImageReference::with_frames("a", vec![3]);
        narrowed.merge_frames(&[]);
        assert!(narrowed.is_whole_instance());
    }

    #[test]
    fn test_add_image_merges_same_instance() {
        let mut series = SeriesReference::new("s")
            .with_image(ImageReference::with_frames("a", vec![0]));
        series.add_image(ImageReference::with_frames("a", vec![2]));
        series.add_image(ImageReference::new("b"));

        assert_eq!(series.images.len(), 2);
        assert_eq!(series.find_image("a").unwrap().frames, vec![0, 2]);
        assert!(series.find_image("b").unwrap().is_whole_instance());
        assert!(series.find_image("c").is_none());
    }
}
