//! Declaration identifiers for catalog pages
//!
//! Identifiers are the keys persisted in history, so they must be unique for
//! the lifetime of the process. They are issued by an [`IdAllocator`] that is
//! created once by the host and handed to everything that constructs pages.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a catalog page.
///
/// Equality and ordering follow the underlying integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationIdentifier(u64);

impl DeclarationIdentifier {
    /// Rebuild an identifier from its persisted integer form.
    pub fn from_raw(index: u64) -> Self {
        Self(index)
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeclarationIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Issues strictly increasing identifiers, starting at 1.
///
/// Safe to share between threads; every call to [`IdAllocator::next`] returns
/// a value no other call has returned.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counter: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> DeclarationIdentifier {
        // fetch_add returns the previous value, so the first id handed out is 1
        DeclarationIdentifier(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
