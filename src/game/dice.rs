//! Dice and the fixed ten-die set

use serde::{Deserialize, Serialize};

use super::faces::FaceSource;
use crate::consts::{DICE_COUNT, FACE_COUNT};

/// Stable die identifier; a rerolled die gets a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieId(pub u32);

/// Hands out die IDs, never repeating within one allocator
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_id: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new die ID. Panics once the ID space is exhausted.
    pub fn allocate(&mut self) -> DieId {
        let id = DieId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .unwrap_or_else(|| panic!("die ID space exhausted"));
        id
    }

    #[cfg(test)]
    fn starting_at(next_id: u32) -> Self {
        Self { next_id }
    }
}

/// A single die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub id: DieId,
    /// Face value (1..=6)
    pub value: u8,
    /// Frozen between rolls
    pub held: bool,
}

impl Die {
    /// Create an unheld die. Panics if `value` is not a valid face.
    pub fn new(id: DieId, value: u8) -> Self {
        assert!(
            (1..=FACE_COUNT).contains(&value),
            "die value {} outside 1..={}",
            value,
            FACE_COUNT
        );
        Self {
            id,
            value,
            held: false,
        }
    }

    fn roll(faces: &mut dyn FaceSource, ids: &mut IdAllocator) -> Self {
        Self::new(ids.allocate(), faces.next_face())
    }
}

/// The ten dice on the board, in slot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl DiceSet {
    /// Roll a fresh set: every die new and unheld
    pub fn create_initial(faces: &mut dyn FaceSource, ids: &mut IdAllocator) -> Self {
        Self {
            dice: std::array::from_fn(|_| Die::roll(faces, ids)),
        }
    }

    /// Build a set from explicit dice.
    /// Panics on a face outside 1..=6 or a repeated die ID.
    pub(crate) fn from_dice(dice: [Die; DICE_COUNT]) -> Self {
        for (i, die) in dice.iter().enumerate() {
            assert!(
                (1..=FACE_COUNT).contains(&die.value),
                "die value {} outside 1..={}",
                die.value,
                FACE_COUNT
            );
            assert!(
                dice[..i].iter().all(|d| d.id != die.id),
                "duplicate die id {:?}",
                die.id
            );
        }
        Self { dice }
    }

    /// Replace every unheld die with a newly rolled one; held dice stay put
    pub fn roll_unheld(&mut self, faces: &mut dyn FaceSource, ids: &mut IdAllocator) {
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            *die = Die::roll(faces, ids);
        }
    }

    /// Flip the held flag of the die with `id`.
    /// Returns false (and changes nothing) if no die has that ID.
    pub fn toggle_held(&mut self, id: DieId) -> bool {
        match self.dice.iter_mut().find(|d| d.id == id) {
            Some(die) => {
                die.held = !die.held;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: DieId) -> Option<&Die> {
        self.dice.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    pub fn as_slice(&self) -> &[Die] {
        &self.dice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::faces::{RandomFaces, ScriptedFaces};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn assert_fresh(set: &DiceSet) {
        assert_eq!(set.as_slice().len(), DICE_COUNT);
        assert!(set.iter().all(|d| (1..=FACE_COUNT).contains(&d.value)));
        assert!(set.iter().all(|d| !d.held));
        let ids: HashSet<DieId> = set.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), DICE_COUNT);
    }

    #[test]
    fn test_create_initial() {
        let mut faces = RandomFaces::new(12345);
        let mut ids = IdAllocator::new();
        let set = DiceSet::create_initial(&mut faces, &mut ids);
        assert_fresh(&set);
    }

    #[test]
    fn test_create_initial_ids_never_collide() {
        let mut faces = RandomFaces::new(7);
        let mut ids = IdAllocator::new();
        let a = DiceSet::create_initial(&mut faces, &mut ids);
        let b = DiceSet::create_initial(&mut faces, &mut ids);
        let all: HashSet<DieId> = a.iter().chain(b.iter()).map(|d| d.id).collect();
        assert_eq!(all.len(), 2 * DICE_COUNT);
    }

    #[test]
    fn test_roll_unheld_keeps_held_dice() {
        let mut faces = ScriptedFaces::new(vec![1, 2, 3, 4, 5, 6, 1, 2, 3, 4]);
        let mut ids = IdAllocator::new();
        let mut set = DiceSet::create_initial(&mut faces, &mut ids);
        let before = set.clone();
        let held_ids = [before.as_slice()[0].id, before.as_slice()[4].id];
        for id in held_ids {
            assert!(set.toggle_held(id));
        }

        let mut sixes = ScriptedFaces::constant(6);
        set.roll_unheld(&mut sixes, &mut ids);

        for (slot, (old, new)) in before.iter().zip(set.iter()).enumerate() {
            if slot == 0 || slot == 4 {
                assert_eq!(new.id, old.id);
                assert_eq!(new.value, old.value);
                assert!(new.held);
            } else {
                assert_ne!(new.id, old.id);
                assert_eq!(new.value, 6);
                assert!(!new.held);
            }
        }
    }

    #[test]
    fn test_toggle_held_unknown_id_is_noop() {
        let mut faces = RandomFaces::new(1);
        let mut ids = IdAllocator::new();
        let mut set = DiceSet::create_initial(&mut faces, &mut ids);
        let before = set.clone();
        assert!(!set.toggle_held(DieId(9999)));
        assert_eq!(set, before);
    }

    #[test]
    fn test_get_sees_toggled_die() {
        let mut faces = RandomFaces::new(3);
        let mut ids = IdAllocator::new();
        let mut set = DiceSet::create_initial(&mut faces, &mut ids);
        let id = set.as_slice()[2].id;
        assert!(set.get(id).is_some_and(|d| !d.held));
        set.toggle_held(id);
        assert!(set.get(id).is_some_and(|d| d.held));
        assert!(set.get(DieId(9999)).is_none());
    }

    fn numbered(value: u8) -> [Die; DICE_COUNT] {
        std::array::from_fn(|i| Die {
            id: DieId(i as u32 + 1),
            value,
            held: false,
        })
    }

    #[test]
    fn test_from_dice_accepts_valid_set() {
        let set = DiceSet::from_dice(numbered(6));
        assert!(set.iter().all(|d| d.value == 6));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_from_dice_rejects_invalid_face() {
        DiceSet::from_dice(numbered(9));
    }

    #[test]
    #[should_panic(expected = "duplicate die id")]
    fn test_from_dice_rejects_shared_id() {
        DiceSet::from_dice(
            [Die {
                id: DieId(11),
                value: 3,
                held: false,
            }; DICE_COUNT],
        );
    }

    #[test]
    fn test_allocator_reaches_last_id() {
        let mut ids = IdAllocator::starting_at(u32::MAX - 1);
        assert_eq!(ids.allocate(), DieId(u32::MAX - 1));
    }

    #[test]
    #[should_panic(expected = "die ID space exhausted")]
    fn test_allocator_exhaustion_panics() {
        let mut ids = IdAllocator::starting_at(u32::MAX);
        ids.allocate();
    }

    #[test]
    #[should_panic]
    fn test_invalid_face_panics() {
        let mut faces = ScriptedFaces::constant(7);
        let mut ids = IdAllocator::new();
        DiceSet::create_initial(&mut faces, &mut ids);
    }

    proptest! {
        #[test]
        fn prop_initial_set_is_fresh(seed in any::<u64>()) {
            let mut faces = RandomFaces::new(seed);
            let mut ids = IdAllocator::new();
            assert_fresh(&DiceSet::create_initial(&mut faces, &mut ids));
        }

        #[test]
        fn prop_roll_preserves_held(seed in any::<u64>(), mask in prop::array::uniform10(any::<bool>())) {
            let mut faces = RandomFaces::new(seed);
            let mut ids = IdAllocator::new();
            let mut set = DiceSet::create_initial(&mut faces, &mut ids);
            for (slot, hold) in mask.iter().enumerate() {
                if *hold {
                    let id = set.as_slice()[slot].id;
                    set.toggle_held(id);
                }
            }
            let before = set.clone();
            set.roll_unheld(&mut faces, &mut ids);

            for (old, new) in before.iter().zip(set.iter()) {
                prop_assert!((1..=FACE_COUNT).contains(&new.value));
                if old.held {
                    prop_assert_eq!(old, new);
                } else {
                    prop_assert_ne!(old.id, new.id);
                    prop_assert!(!new.held);
                }
            }
        }

        #[test]
        fn prop_toggle_twice_is_identity(seed in any::<u64>(), slot in 0..DICE_COUNT) {
            let mut faces = RandomFaces::new(seed);
            let mut ids = IdAllocator::new();
            let mut set = DiceSet::create_initial(&mut faces, &mut ids);
            let original = set.clone();
            let id = set.as_slice()[slot].id;

            set.toggle_held(id);
            for (i, (old, new)) in original.iter().zip(set.iter()).enumerate() {
                prop_assert_eq!(old.id, new.id);
                prop_assert_eq!(old.value, new.value);
                prop_assert_eq!(old.held != new.held, i == slot);
            }

            set.toggle_held(id);
            prop_assert_eq!(set, original);
        }
    }
}
