//! Round-robin pools for API credentials and model identifiers.
//!
//! A pool is frozen at construction: entries are trimmed, de-duplicated
//! preserving first-seen order, and never mutated afterwards. The only
//! shared mutable state is the rotation cursor, an atomic counter, so
//! `next()` is safe under any number of concurrent callers.

use crate::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered, immutable set of entries with a shared rotation cursor.
pub struct Pool {
    entries: Vec<String>,
    cursor: AtomicUsize,
    label: &'static str,
}

/// Pool of opaque API secrets. `Debug` renders the size, never the keys.
pub type CredentialPool = Pool;

/// Pool of provider-side model identifiers.
pub type ModelPool = Pool;

impl Pool {
    /// Build a pool from raw entries: whitespace is trimmed, empties are
    /// dropped, duplicates removed keeping the first occurrence. An empty
    /// result is a configuration error, not a runtime one.
    pub fn new<I, S>(label: &'static str, raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<String> = Vec::new();
        for item in raw {
            let trimmed = item.as_ref().trim();
            if trimmed.is_empty() || entries.iter().any(|e| e == trimmed) {
                continue;
            }
            entries.push(trimmed.to_string());
        }

        if entries.is_empty() {
            return Err(Error::configuration(format!(
                "{} pool is empty after trimming and de-duplication",
                label
            )));
        }

        Ok(Self {
            entries,
            cursor: AtomicUsize::new(0),
            label,
        })
    }

    /// Return the entry at the cursor, then advance modulo pool size.
    /// Fetch-and-increment is atomic, so concurrent callers each observe
    /// a distinct position and round-robin fairness holds.
    pub fn next(&self) -> &str {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.entries.len();
        &self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Entries may be secrets; expose only the shape.
        f.debug_struct("Pool")
            .field("label", &self.label)
            .field("len", &self.entries.len())
            .finish()
    }
}
