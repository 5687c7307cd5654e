//! JSON encoding of reference records
//!
//! The frame list travels as a single attribute holding space-separated
//! integers ("" for a whole-instance reference, "0 3" for two frames).

use overlaykit_core::{Error, ReferenceError, Result};

use crate::presentation::PresentationReferences;

/// Render frame indices as an attribute string
pub fn format_frames(frames: &[u32]) -> String {
    frames
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a space-separated frame attribute
pub fn parse_frames(value: &str) -> std::result::Result<Vec<u32>, ReferenceError> {
    value
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| ReferenceError::InvalidFrameIndex {
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Serde adapter for `Vec<u32>` frame lists
pub(crate) mod frames_attr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(frames: &[u32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_frames(frames))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_frames(&raw).map_err(serde::de::Error::custom)
    }
}

/// Encode a presentation's references as pretty JSON
pub fn to_json(references: &PresentationReferences) -> Result<String> {
    references.validate()?;
    Ok(serde_json::to_string_pretty(references)?)
}

/// Decode and validate a presentation's references
pub fn from_json(json: &str) -> Result<PresentationReferences> {
    let references: PresentationReferences = serde_json::from_str(json).map_err(|e| {
        tracing::warn!(error = %e, "rejected reference document");
        Error::from(e)
    })?;
    references.validate()?;
    Ok(references)
}
