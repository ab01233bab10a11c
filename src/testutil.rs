use bitvec::{order::Lsb0, vec::BitVec};
use proptest::{collection::vec, prelude::*};
use rand::{SeedableRng, seq::index};

use crate::{
    BitVector,
    word::{Word, word_key, word_mask, words_for_bits},
};

/// Create a bit vector of `len` bits with the given positions set. The rank
/// directory is built once at the end.
#[track_caller]
pub fn mkbitvec(len: usize, ones: impl IntoIterator<Item = usize>) -> BitVector {
    let mut words = vec![0; words_for_bits(len)];
    for pos in ones {
        assert!(pos < len, "position {pos} out of range for length {len}");
        words[word_key(pos)] |= word_mask(pos);
    }
    BitVector::from_raw(words, len)
}

/// Create a bit vector from a string of `0` and `1` characters, first
/// character at index zero. Any other character is ignored so patterns can be
/// grouped, as in `"1010_0110"`.
pub fn from_pattern(pattern: &str) -> BitVector {
    pattern
        .chars()
        .filter_map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

/// Copy a bit vector into a `bitvec` vector for comparison against an
/// independent implementation.
pub fn oracle(bv: &BitVector) -> BitVec<Word, Lsb0> {
    bv.as_bitslice().to_bitvec()
}

/// Strategy producing bit vectors of up to `max_len` bits.
pub fn arb_bitvector(max_len: usize) -> impl Strategy<Value = BitVector> {
    vec(any::<bool>(), 0..=max_len).prop_map(|bits| bits.into_iter().collect())
}

pub struct BitGen {
    rng: rand::rngs::StdRng,
}

impl BitGen {
    pub fn new(seed: u64) -> Self {
        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self { rng }
    }

    /// A vector of `len` bits with exactly `ones` of them set at random
    /// positions.
    #[track_caller]
    pub fn random(&mut self, len: usize, ones: usize) -> BitVector {
        mkbitvec(len, index::sample(&mut self.rng, len, ones))
    }

    /// A vector of `len` bits where roughly `percent` of the bits are set.
    #[track_caller]
    pub fn density(&mut self, len: usize, percent: usize) -> BitVector {
        assert!(percent <= 100, "density must be a percentage");
        self.random(len, len * percent / 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pattern() {
        let bv = from_pattern("1010_0110");
        assert_eq!(bv.len(), 8);
        assert!(bv.iter_ones().eq([0, 2, 5, 6]));
        assert_eq!(from_pattern("").len(), 0);
    }

    #[test]
    fn test_bitgen_is_seeded() {
        let a = BitGen::new(7).random(1000, 100);
        let b = BitGen::new(7).random(1000, 100);
        assert_eq!(a, b);
        assert_eq!(a.count_ones(), 100);
        assert_eq!(BitGen::new(1).density(2000, 25).count_ones(), 500);
    }

    #[test]
    fn test_oracle() {
        let bv = mkbitvec(100, [1, 99]);
        let bits = oracle(&bv);
        assert_eq!(bits.len(), 100);
        assert!(bits.iter_ones().eq([1, 99]));
    }
}
