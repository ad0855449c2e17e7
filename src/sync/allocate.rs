//! Id allocation for CSV imports.
//!
//! Each allocator is the accumulator threaded through one import batch.
//! They do no I/O, so the collision rules can be tested in isolation.

use std::collections::HashSet;

use crate::store::Store;
use crate::sync::types::Coerced;

/// Allocator for merge imports.
///
/// Seeded with the ids already in the roster. A row keeps its id if it is
/// present and unused; otherwise it gets `max + 1`, where `max` is the
/// running maximum over the roster and every id handed out so far. Once
/// that maximum is `u64::MAX`, the lowest unused id is taken instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeAllocator {
    existing: HashSet<u64>,
    max_id: u64,
}

impl MergeAllocator {
    /// Start from the ids in `store`.
    #[must_use]
    pub fn for_store(store: &Store) -> Self {
        Self::with_ids(store.ids())
    }

    /// Start from an explicit id set.
    #[must_use]
    pub fn with_ids(existing: HashSet<u64>) -> Self {
        let max_id = existing.iter().copied().max().unwrap_or(0);
        Self { existing, max_id }
    }

    /// Resolve the id for one row and mark it as used.
    pub fn resolve(&mut self, parsed: Option<u64>) -> Coerced<u64> {
        let resolved = match parsed {
            Some(id) if !self.existing.contains(&id) => Coerced::Parsed(id),
            _ => match self.max_id.checked_add(1) {
                Some(next) => {
                    self.max_id = next;
                    Coerced::Defaulted(next)
                }
                None => Coerced::Defaulted(lowest_unused(&self.existing)),
            },
        };

        let id = *resolved.value();
        self.existing.insert(id);
        self.max_id = self.max_id.max(id);
        resolved
    }
}

/// Allocator for replace imports.
///
/// Starts empty with a candidate counter at 1. A row keeps its id unless it
/// is missing or already used in this batch, in which case it takes the
/// current candidate, or the lowest unused id if the candidate is taken.
/// After every row the candidate moves past the id used, unless that id is
/// `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAllocator {
    seen: HashSet<u64>,
    next_id: u64,
}

impl Default for ReplaceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplaceAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            next_id: 1,
        }
    }

    /// The current candidate id.
    ///
    /// Placeholder names in replace mode are built from this value, read
    /// before the row's id is resolved.
    #[must_use]
    pub const fn placeholder_id(&self) -> u64 {
        self.next_id
    }

    /// Resolve the id for one row and mark it as used.
    pub fn resolve(&mut self, parsed: Option<u64>) -> Coerced<u64> {
        let resolved = match parsed {
            Some(id) if !self.seen.contains(&id) => Coerced::Parsed(id),
            _ if self.seen.contains(&self.next_id) => {
                Coerced::Defaulted(lowest_unused(&self.seen))
            }
            _ => Coerced::Defaulted(self.next_id),
        };

        let id = *resolved.value();
        self.seen.insert(id);
        if let Some(after) = id.checked_add(1) {
            self.next_id = self.next_id.max(after);
        }
        resolved
    }
}

fn lowest_unused(used: &HashSet<u64>) -> u64 {
    (1..=u64::MAX).find(|id| !used.contains(id)).unwrap_or(0)
}
