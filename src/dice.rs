use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of every random choice the game makes: next sentence, initial
/// block family and backdrop.
pub trait Dice {
    /// Uniform pick in `0..sides`. `sides` is never zero.
    fn roll(&mut self, sides: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self, sides: usize) -> usize {
        (**self).roll(sides)
    }
}

/// Production dice backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SeededDice {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, sides: usize) -> usize {
        self.rng.gen_range(0..sides.max(1))
    }
}

/// Dice that replay a fixed script, for tests.
/// Each value is reduced modulo `sides`; an exhausted script yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new<I: IntoIterator<Item = usize>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: usize) -> usize {
        self.script.pop_front().unwrap_or(0) % sides.max(1)
    }
}
