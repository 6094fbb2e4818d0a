//! Game logic
//!
//! Everything the host UI observes comes out of here as a `Snapshot`:
//! - No DOM or storage access (injected through traits)
//! - Randomness only through a `FaceSource`
//! - Time only through a `Clock`

pub mod dice;
pub mod faces;
pub mod round;
pub mod state;
pub mod win;

pub use dice::{DiceSet, Die, DieId, IdAllocator};
pub use faces::{FaceSource, RandomFaces, ScriptedFaces};
pub use round::RoundTracker;
pub use state::{GamePhase, GameState, Snapshot};
pub use win::is_win;
