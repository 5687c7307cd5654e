//! Identifier generation
//!
//! Identifiers are 128-bit UUIDs in their hyphenated text form. Generation
//! goes through [`UidGenerator`] so callers can inject a deterministic source
//! in tests instead of relying on a process-wide generator.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of new textual identifiers
pub trait UidGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random (v4) UUID generator
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl UidGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator producing UUID-formatted counters
#[derive(Debug, Default)]
pub struct SequenceUidGenerator {
    next: AtomicU64,
}

impl SequenceUidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl UidGenerator for SequenceUidGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u128(n as u128).to_string()
    }
}

/// Check that `value` is a hyphenated UUID
pub fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_uuids_are_unique() {
        let generator = UuidGenerator;
        let a = generator.generate();
        let b = generator.generate();
        assert_ne!(a, b);
        assert!(is_uuid(&a));
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_sequence_generator() {
        let generator = SequenceUidGenerator::starting_at(1);
        assert_eq!(generator.generate(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(generator.generate(), "00000000-0000-0000-0000-000000000002");
        assert_eq!(generator.issued(), 3);
    }
}
