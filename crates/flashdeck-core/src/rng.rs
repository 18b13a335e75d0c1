// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A source of random numbers for queue ordering.
///
/// The scheduling core never seeds itself: hosts pass a [`TinyRng`] seeded
/// from the clock, and tests pass a [`SequenceRng`] so that orderings are
/// reproducible.
pub trait RandomSource {
    /// Generate a random number in the range [0, max). `max` must be non-zero.
    fn generate(&mut self, max: u32) -> u32;
}

/// A minimal, zero-dependency, completely insecure PRNG to shuffle the cards.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }
}

impl RandomSource for TinyRng {
    fn generate(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next_u32() % max
    }
}

/// Replays a fixed list of values, cycling when it runs out.
pub struct SequenceRng {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRng {
    fn generate(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % max
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: Vec<T>, rng: &mut impl RandomSource) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    for i in (1..len).rev() {
        let j = rng.generate((i + 1) as u32) as usize;
        v.swap(i, j);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TinyRng::from_seed(42);
        let mut b = TinyRng::from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_generate_in_range() {
        let mut rng = TinyRng::from_seed(7);
        for max in 1..50 {
            assert!(rng.generate(max) < max);
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = TinyRng::from_seed(1234);
        let mut shuffled = shuffle((0..20).collect::<Vec<u32>>(), &mut rng);
        shuffled.sort();
        assert_eq!(shuffled, (0..20).collect::<Vec<u32>>());
    }

    /// With a zero sequence every element is swapped with the head, which
    /// rotates the vector by one.
    #[test]
    fn test_shuffle_with_zero_sequence() {
        let mut rng = SequenceRng::new(vec![0]);
        let shuffled = shuffle(vec![1, 2, 3, 4], &mut rng);
        assert_eq!(shuffled, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_shuffle_empty_and_singleton() {
        let mut rng = SequenceRng::new(vec![]);
        assert_eq!(shuffle(Vec::<u8>::new(), &mut rng), Vec::<u8>::new());
        assert_eq!(shuffle(vec![9], &mut rng), vec![9]);
    }

    #[test]
    fn test_sequence_rng_cycles() {
        let mut rng = SequenceRng::new(vec![1, 5]);
        assert_eq!(rng.generate(10), 1);
        assert_eq!(rng.generate(10), 5);
        assert_eq!(rng.generate(10), 1);
        assert_eq!(rng.generate(3), 2);
    }
}
