//! Die face generation
//!
//! Dice never touch a global RNG; they pull values from a `FaceSource` so
//! tests can force exact faces.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::FACE_COUNT;

/// Produces face values in `1..=FACE_COUNT`
pub trait FaceSource {
    fn next_face(&mut self) -> u8;
}

/// Uniform random faces from a seeded PCG32
#[derive(Debug, Clone)]
pub struct RandomFaces {
    rng: Pcg32,
}

impl RandomFaces {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl FaceSource for RandomFaces {
    fn next_face(&mut self) -> u8 {
        self.rng.random_range(1..=FACE_COUNT)
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedFaces {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedFaces {
    pub fn new(faces: Vec<u8>) -> Self {
        assert!(!faces.is_empty(), "scripted face sequence must not be empty");
        Self { faces, cursor: 0 }
    }

    /// Every die shows `face`
    pub fn constant(face: u8) -> Self {
        Self::new(vec![face])
    }
}

impl FaceSource for ScriptedFaces {
    fn next_face(&mut self) -> u8 {
        let face = self.faces[self.cursor];
        self.cursor = (self.cursor + 1) % self.faces.len();
        face
    }
}
