//! Reference list of a whole overlay model
//!
//! An overlay (a "presentation") can annotate several images across several
//! series. References built per image are folded into one entry per series,
//! keeping first-seen order for both series and images.

use overlaykit_core::{ReferenceError, Result, UidGenerator};
use serde::{Deserialize, Serialize};

use crate::model::{ImageReference, SeriesReference};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationReferences {
    /// Identifier of the overlay model itself
    pub uuid: String,
    #[serde(rename = "references", default)]
    series: Vec<SeriesReference>,
}

impl PresentationReferences {
    /// Empty reference list with a freshly generated presentation identifier
    pub fn new(generator: &dyn UidGenerator) -> Self {
        Self::with_uuid(generator.generate())
    }

    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            series: Vec::new(),
        }
    }

    /// Fold `reference` into the list.
    ///
    /// Images are appended unless the instance is already referenced in the
    /// series, in which case the frame lists are merged. This also applies
    /// to repeated instances inside `reference` itself.
    pub fn add(&mut self, reference: SeriesReference) {
        let SeriesReference { series_id, images } = reference;
        let position = match self.series.iter().position(|s| s.series_id == series_id) {
            Some(position) => position,
            None => {
                self.series.push(SeriesReference::new(series_id));
                self.series.len() - 1
            }
        };
        let target = &mut self.series[position];
        for image in images {
            target.add_image(image);
        }
    }

    pub fn find_series(&self, series_id: &str) -> Option<&SeriesReference> {
        self.series.iter().find(|s| s.series_id == series_id)
    }

    pub fn find_image(&self, instance_id: &str) -> Option<&ImageReference> {
        self.series
            .iter()
            .find_map(|s| s.find_image(instance_id))
    }

    pub fn contains_instance(&self, instance_id: &str) -> bool {
        self.find_image(instance_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesReference> {
        self.series.iter()
    }

    pub fn series(&self) -> &[SeriesReference] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Check that no identifier is blank
    pub fn validate(&self) -> Result<()> {
        check_identifier("presentation", &self.uuid)?;
        for series in &self.series {
            check_identifier("series", &series.series_id)?;
            for image in &series.images {
                check_identifier("instance", &image.instance_id)?;
            }
        }
        Ok(())
    }
}

fn check_identifier(field: &str, value: &str) -> std::result::Result<(), ReferenceError> {
    if value.trim().is_empty() {
        return Err(ReferenceError::MalformedIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

impl<'a> IntoIterator for &'a PresentationReferences {
    type Item = &'a SeriesReference;
    type IntoIter = std::slice::Iter<'a, SeriesReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlaykit_core::SequenceUidGenerator;

    fn series(id: &str, images: &[(&str, Vec<u32>)]) -> SeriesReference {
        images.iter().fold(SeriesReference::new(id), |s, (uid, frames)| {
            s.with_image(ImageReference::with_frames(*uid, frames.clone()))
        })
    }

    #[test]
    fn test_new_generates_uuid() {
        let generator = SequenceUidGenerator::starting_at(9);
        let refs = PresentationReferences::new(&generator);
        assert_eq!(refs.uuid, "00000000-0000-0000-0000-000000000009");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_add_groups_by_series() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s1", &[("a", vec![])]));
        refs.add(series("s2", &[("c", vec![1])]));
        refs.add(series("s1", &[("b", vec![])]));

        assert_eq!(refs.len(), 2);
        let s1 = refs.find_series("s1").unwrap();
        let ids: Vec<_> = s1.images.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(refs.contains_instance("c"));
        assert!(!refs.contains_instance("d"));
    }

    #[test]
    fn test_add_merges_frames_of_same_instance() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s1", &[("a", vec![0])]));
        refs.add(series("s1", &[("a", vec![2])]));
        refs.add(series("s1", &[("a", vec![0])]));

        assert_eq!(refs.find_image("a").unwrap().frames, vec![0, 2]);
        assert_eq!(refs.find_series("s1").unwrap().images.len(), 1);
    }

    #[test]
    fn test_add_merges_duplicates_within_new_series() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s1", &[("a", vec![1]), ("a", vec![3, 1]), ("b", vec![])]));

        let s1 = refs.find_series("s1").unwrap();
        assert_eq!(s1.images.len(), 2);
        assert_eq!(refs.find_image("a").unwrap().frames, vec![1, 3]);
    }

    #[test]
    fn test_add_dedups_frames_within_new_image() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s1", &[("a", vec![2, 2, 5])]));
        assert_eq!(refs.find_image("a").unwrap().frames, vec![2, 5]);
    }

    #[test]
    fn test_validate_rejects_blank_identifiers() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s1", &[(" ", vec![])]));
        assert!(refs.validate().unwrap_err().is_reference_error());

        let blank = PresentationReferences::with_uuid("");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_iteration_order() {
        let mut refs = PresentationReferences::with_uuid("p");
        refs.add(series("s2", &[]));
        refs.add(series("s1", &[]));
        let ids: Vec<_> = (&refs).into_iter().map(|s| s.series_id.clone()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
        assert_eq!(refs.iter().count(), 2);
        assert_eq!(refs.series().len(), 2);
    }
}
