use std::iter::FusedIterator;

use crate::{
    BitVector,
    word::{WORD_BITS, Word},
};

/// Iterator over every bit of a [`BitVector`], in index order.
#[derive(Clone)]
pub struct Iter<'a> {
    words: &'a [Word],
    pos: usize,
    len: usize,
    current: Word,
}

impl<'a> Iter<'a> {
    fn new(bv: &'a BitVector) -> Self {
        Self {
            words: bv.words(),
            pos: 0,
            len: bv.len(),
            current: 0,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.pos == self.len {
            return None;
        }
        if self.pos % WORD_BITS == 0 {
            self.current = self.words[self.pos / WORD_BITS];
        }
        let bit = self.current & 1 != 0;
        self.current >>= 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Iterator over the positions of the set bits of a [`BitVector`], in
/// ascending order.
#[derive(Clone)]
pub struct IterOnes<'a> {
    words: &'a [Word],
    cursor: usize,
    current: Word,
    remaining: usize,
}

impl<'a> IterOnes<'a> {
    fn new(bv: &'a BitVector) -> Self {
        let words = bv.words();
        Self {
            words,
            cursor: 0,
            current: words.first().copied().unwrap_or(0),
            remaining: bv.count_ones(),
        }
    }
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        while self.current == 0 {
            self.cursor += 1;
            self.current = self.words[self.cursor];
        }
        let pos = self.cursor * WORD_BITS + self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        self.remaining -= 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IterOnes<'_> {}
impl FusedIterator for IterOnes<'_> {}

impl BitVector {
    /// Returns an iterator over every bit.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let bits = [true, false, true];
    /// let bv: BitVector = bits.into_iter().collect();
    /// assert!(bv.iter().eq(bits));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Returns an iterator over the positions of the set bits.
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes::new(self)
    }
}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
