//! History entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CalculationResult;

/// A calculation result recorded in the history ledger.
///
/// `entry_id` and `created_at` are assigned by the ledger at append time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub entry_id: Uuid,
    /// When the entry was appended.
    pub created_at: DateTime<Utc>,
    /// The recorded result.
    pub result: CalculationResult,
}
