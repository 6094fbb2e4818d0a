//! Win condition

use std::collections::BTreeSet;

use super::dice::DiceSet;

/// Tenzies: every die held and exactly one distinct face showing
pub fn is_win(dice: &DiceSet) -> bool {
    let all_held = dice.iter().all(|d| d.held);
    let faces: BTreeSet<u8> = dice.iter().map(|d| d.value).collect();
    all_held && faces.len() == 1
}
