//! Best (fastest) finishing time
//!
//! Persisted as a JSON integer of milliseconds under `consts::BEST_TIME_KEY`.
//! Storage trouble never reaches the game: failed reads mean "no record",
//! failed writes keep the record for this session only.

use crate::consts::BEST_TIME_KEY;
use crate::platform::KeyValueStore;

/// The fastest win so far, backed by a key-value store
pub struct BestTimeStore {
    store: Box<dyn KeyValueStore>,
    best_millis: Option<u64>,
}

impl std::fmt::Debug for BestTimeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestTimeStore")
            .field("best_millis", &self.best_millis)
            .finish_non_exhaustive()
    }
}

impl BestTimeStore {
    /// Read the persisted record from `store`
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best_millis = match store.get(BEST_TIME_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Option<u64>>(&json) {
                Ok(best) => best,
                Err(e) => {
                    log::warn!("Ignoring malformed best time {:?}: {}", json, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read best time: {}", e);
                None
            }
        };

        match best_millis {
            Some(ms) => log::info!("Loaded best time: {} ms", ms),
            None => log::info!("No best time found, starting fresh"),
        }

        Self { store, best_millis }
    }

    pub fn best_millis(&self) -> Option<u64> {
        self.best_millis
    }

    /// Check if a finishing time would set a new record (ties don't)
    pub fn qualifies(&self, candidate_millis: u64) -> bool {
        self.best_millis.is_none_or(|best| candidate_millis < best)
    }

    /// Record `candidate_millis` if it beats the current best.
    /// Returns true if the record changed.
    pub fn maybe_update(&mut self, candidate_millis: u64) -> bool {
        if !self.qualifies(candidate_millis) {
            return false;
        }

        self.best_millis = Some(candidate_millis);
        self.save(candidate_millis);
        log::info!("New best time: {} ms", candidate_millis);
        true
    }

    fn save(&self, millis: u64) {
        let json = match serde_json::to_string(&millis) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode best time: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(BEST_TIME_KEY, &json) {
            log::warn!("Best time not saved: {}", e);
        }
    }
}
