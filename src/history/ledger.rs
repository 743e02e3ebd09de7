//! Append-only, in-memory history of calculation results.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::models::{CalculationResult, HistoryEntry};

use super::{Clock, SystemClock};

/// Session-scoped log of calculation results.
///
/// Entries are stored in insertion order and never mutated or removed.
/// [`list`] presents them most recent first. Timestamps never decrease with
/// append order: if the clock steps backwards, the new entry reuses the
/// previous entry's timestamp.
///
/// The ledger is `Send + Sync`; appends are serialised by an internal lock, so
/// one instance can be shared through an `Arc`.
///
/// [`list`]: HistoryLedger::list
///
/// # Example
///
/// ```
/// use paye_engine::calculation::compute;
/// use paye_engine::history::HistoryLedger;
/// use paye_engine::models::CalculationInput;
/// use rust_decimal::Decimal;
///
/// let ledger = HistoryLedger::new();
/// let first = ledger.append(compute(&CalculationInput::new(Decimal::new(30000, 0))));
/// let second = ledger.append(compute(&CalculationInput::new(Decimal::new(60000, 0))));
///
/// let entries = ledger.list();
/// assert_eq!(entries, vec![second, first]);
/// ```
pub struct HistoryLedger {
    entries: RwLock<Vec<HistoryEntry>>,
    clock: Arc<dyn Clock>,
}

impl HistoryLedger {
    /// Creates an empty ledger stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty ledger stamped by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Records a result, returning the stamped entry.
    ///
    /// Always succeeds. A poisoned lock is recovered, since entries are only
    /// ever pushed whole.
    pub fn append(&self, result: CalculationResult) -> HistoryEntry {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let now = self.clock.now();
        let created_at = match entries.last() {
            Some(previous) if previous.created_at > now => previous.created_at,
            _ => now,
        };

        let entry = HistoryEntry {
            entry_id: Uuid::new_v4(),
            created_at,
            result,
        };
        entries.push(entry.clone());

        debug!(
            entry_id = %entry.entry_id,
            created_at = %entry.created_at,
            position = entries.len(),
            net_pay = %entry.result.net_pay,
            "History entry appended"
        );

        entry
    }

    /// Returns a snapshot of all entries, most recent first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.read().iter().rev().cloned().collect()
    }

    /// Returns a snapshot of all entries in the order they were appended.
    pub fn chronological(&self) -> Vec<HistoryEntry> {
        self.read().clone()
    }

    /// Looks up an entry by id.
    pub fn get(&self, entry_id: Uuid) -> Option<HistoryEntry> {
        self.read()
            .iter()
            .find(|entry| entry.entry_id == entry_id)
            .cloned()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<HistoryEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HistoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLedger")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}
