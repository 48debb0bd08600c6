//! Content hashing
//!
//! Deterministic SHA-1 digests over arbitrary inputs. Parts are separated by a NUL
//! byte so that `("ab", "c")` and `("a", "bc")` never produce the same digest.

use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, SecondsFormat, Utc};
use sha1::{Digest, Sha1};

#[derive(Clone, Default)]
pub struct ContentHasher {
    hasher: Sha1,
    parts: usize,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(mut self, part: impl AsRef<[u8]>) -> Self {
        if self.parts > 0 {
            self.hasher.update([0u8]);
        }
        self.hasher.update(part.as_ref());
        self.parts += 1;
        self
    }

    pub fn finish(self) -> ObjectId {
        ObjectId::from_digest(&self.hasher.finalize())
    }
}

/// Canonical high-resolution rendering of a timestamp used as hash input
pub fn timestamp_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Commit identity: message plus timestamp, nothing else
pub fn commit_hash(message: &str, timestamp: &DateTime<Utc>) -> ObjectId {
    ContentHasher::new()
        .update(message)
        .update(timestamp_key(timestamp))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn digest_is_deterministic() {
        let a = ContentHasher::new().update("en").update("hello").finish();
        let b = ContentHasher::new().update("en").update("hello").finish();
        assert_eq!(a, b);
    }

    #[test]
    fn part_boundaries_matter() {
        let a = ContentHasher::new().update("ab").update("c").finish();
        let b = ContentHasher::new().update("a").update("bc").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn commit_hash_ignores_everything_but_message_and_time() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let later = ts + chrono::Duration::nanoseconds(1);

        assert_eq!(commit_hash("msg", &ts), commit_hash("msg", &ts));
        assert_ne!(commit_hash("msg", &ts), commit_hash("msg", &later));
        assert_ne!(commit_hash("msg", &ts), commit_hash("other", &ts));
    }
}
