//! # Identifier Sources
//!
//! Every new selector (and every bootstrap element) gets its id from an
//! [`IdSource`]. Ids are opaque to the rest of the editor; the only promise is
//! uniqueness for the lifetime of the session.

use crc32fast::Hasher;
use uuid::Uuid;

/// Produces unique string ids
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUID ids, prefixed so they also read as valid class tokens
#[derive(Debug, Clone)]
pub struct UuidIds {
    prefix: String,
}

impl UuidIds {
    pub fn new() -> Self {
        Self::with_prefix("css_")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4().simple())
    }
}

/// Derive a stable seed from a session key using CRC32
pub fn session_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("s{:x}", hasher.finalize())
}

/// Deterministic `<seed>-<n>` ids, for replayable scripts and tests
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(key: &str) -> Self {
        Self::from_seed(session_seed(key))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Continue numbering after any `<seed>-<n>` already in `taken`
    pub fn resume<'a, I>(mut self, taken: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let prefix = format!("{}-", self.seed);
        let highest = taken
            .into_iter()
            .filter_map(|id| id.strip_prefix(prefix.as_str()))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        self.count = self.count.max(highest);
        self
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_name::is_valid_class_name;
    use std::collections::HashSet;

    #[test]
    fn test_session_seed_is_stable() {
        assert_eq!(session_seed("project-a"), session_seed("project-a"));
        assert_ne!(session_seed("project-a"), session_seed("project-b"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("demo");

        let id1 = ids.next_id();
        let id2 = ids.next_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(ids.seed()));
        assert!(is_valid_class_name(&id1));
    }

    #[test]
    fn test_resume_skips_taken_ids() {
        let seed = session_seed("demo");
        let taken = [format!("{}-3", seed), format!("{}-7", seed), "other-99".to_string()];

        let mut ids = SequentialIds::new("demo").resume(taken.iter().map(String::as_str));
        assert_eq!(ids.next_id(), format!("{}-8", seed));
    }

    #[test]
    fn test_uuid_ids_are_unique_class_tokens() {
        let mut ids = UuidIds::new();
        let generated: HashSet<String> = (0..64).map(|_| ids.next_id()).collect();

        assert_eq!(generated.len(), 64);
        assert!(generated.iter().all(|id| is_valid_class_name(id)));
    }
}
