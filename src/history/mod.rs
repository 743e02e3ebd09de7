//! Session history of calculation results.
//!
//! The ledger is a plain owned value: create one per session and pass it (or
//! an `Arc` of it) to whatever needs to append or read.

mod clock;
mod ledger;

pub use clock::{Clock, SystemClock};
pub use ledger::HistoryLedger;
