use std::hash::{Hash, Hasher};

use bitvec::{order::BitOrder, slice::BitSlice, store::BitStore};

use crate::{
    BitVector,
    word::{WORD_BITS, Word, tail_mask, word_at},
};

impl PartialEq for BitVector {
    /// Two vectors are equal when they have the same length and the same bits.
    /// Padding is always zero, so whole words can be compared.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.words() == other.words()
    }
}

impl Eq for BitVector {}

impl<T, O> PartialEq<BitSlice<T, O>> for BitVector
where
    T: BitStore,
    O: BitOrder,
{
    fn eq(&self, other: &BitSlice<T, O>) -> bool {
        self.as_bitslice() == other
    }
}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.words().hash(state);
    }
}

impl BitVector {
    /// Returns the first position at which `needle` occurs as a contiguous run
    /// of bits. An empty needle matches at position zero.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let hay: BitVector = [false, false, true, false, true, true].into_iter().collect();
    /// let needle: BitVector = [true, true].into_iter().collect();
    /// assert_eq!(hay.find_subvector(&needle), Some(4));
    /// assert!(!needle.contains_subvector(&hay));
    /// ```
    pub fn find_subvector(&self, needle: &BitVector) -> Option<usize> {
        let m = needle.len();
        if m > self.len() {
            return None;
        }
        let last = needle.words().len().saturating_sub(1);
        let mask = |i: usize| if i == last { tail_mask(m) } else { Word::MAX };

        (0..=self.len() - m).find(|&start| {
            needle
                .words()
                .iter()
                .enumerate()
                .all(|(i, &w)| word_at(self.words(), start + i * WORD_BITS) & mask(i) == w)
        })
    }

    /// Returns `true` if `needle` occurs as a contiguous run of bits.
    #[inline]
    pub fn contains_subvector(&self, needle: &BitVector) -> bool {
        self.find_subvector(needle).is_some()
    }
}
