//! Tenzies - roll ten dice until they all match
//!
//! Core modules:
//! - `game`: Dice, win detection, round tracking and the game state machine
//! - `best_time`: Persisted best finishing time
//! - `platform`: Browser/native abstraction (clock, key-value storage)
//! - `error`: Storage error types

pub mod best_time;
pub mod error;
pub mod game;
pub mod platform;

pub use best_time::BestTimeStore;
pub use error::StorageError;
pub use game::{Die, DieId, GamePhase, GameState, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Number of dice on the board
    pub const DICE_COUNT: usize = 10;
    /// Faces per die (values run 1..=FACE_COUNT)
    pub const FACE_COUNT: u8 = 6;
    /// Storage key holding the best time as a JSON integer (ms)
    pub const BEST_TIME_KEY: &str = "bestTime";
}

/// Format a duration in milliseconds as "M minute(s) and S second(s)"
pub fn format_duration(millis: u64) -> String {
    let seconds = millis / 1000;
    let minutes = seconds / 60;
    let remaining_seconds = seconds % 60;
    format!("{} minute(s) and {} second(s)", minutes, remaining_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 minute(s) and 0 second(s)");
        assert_eq!(format_duration(999), "0 minute(s) and 0 second(s)");
        assert_eq!(format_duration(61_500), "1 minute(s) and 1 second(s)");
        assert_eq!(format_duration(3_600_000), "60 minute(s) and 0 second(s)");
    }
}
