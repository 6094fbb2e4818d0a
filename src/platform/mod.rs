//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`Date.now()` on web, `SystemTime` natively)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod clock;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{KeyValueStore, LocalStorage, MemoryStorage};
