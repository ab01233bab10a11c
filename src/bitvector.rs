use std::fmt::{self, Debug, Display};
use std::ops::RangeBounds;

use bitvec::{order::Lsb0, slice::BitSlice, view::BitView};
use itertools::Itertools;

use crate::{
    BitVecError,
    rank::RankIndex,
    util::{resolve_index, resolve_range},
    word::{
        WORD_BITS, Word, apply_tail_mask, span_mask, word_bit, word_key, word_mask,
        words_for_bits,
    },
};

/// A fixed-length sequence of bits packed into 64-bit words, with an O(1)
/// rank directory.
///
/// The rank directory is owned by the vector and updated by every mutating
/// method before it returns, so [`BitVector::rank`] and the select family
/// always reflect the current bits.
///
/// Indices are `isize` and follow sequence conventions: `-1` addresses the
/// last bit, `-len` the first.
///
/// # Examples
///
/// ```
/// use bitrank::BitVector;
///
/// let mut bv = BitVector::new(100);
/// for i in [0, 10, 20] {
///     bv.set(i)?;
/// }
///
/// assert_eq!(bv.rank(0)?, 1);
/// assert_eq!(bv.rank(9)?, 1);
/// assert_eq!(bv.rank(10)?, 2);
/// assert_eq!(bv.rank(99)?, 3);
/// assert!(bv.rank(100).is_err());
/// # Ok::<(), bitrank::BitVecError>(())
/// ```
#[derive(Clone, Default)]
pub struct BitVector {
    words: Vec<Word>,
    len: usize,
    rank: RankIndex,
}

static_assertions::const_assert_eq!(std::mem::size_of::<BitVector>(), 88);

impl BitVector {
    /// Creates a zeroed bit vector holding `len` bits.
    pub fn new(len: usize) -> Self {
        Self::from_raw(vec![0; words_for_bits(len)], len)
    }

    /// Creates a zeroed bit vector from a signed length, failing with
    /// [`BitVecError::InvalidArgument`] when `len` is negative.
    ///
    /// ```
    /// use bitrank::{BitVector, BitVecError};
    ///
    /// assert_eq!(BitVector::try_new(8)?.len(), 8);
    /// assert!(matches!(
    ///     BitVector::try_new(-1),
    ///     Err(BitVecError::InvalidArgument(_))
    /// ));
    /// # Ok::<(), BitVecError>(())
    /// ```
    pub fn try_new(len: isize) -> Result<Self, BitVecError> {
        let len = usize::try_from(len).map_err(|_| {
            BitVecError::InvalidArgument(format!("negative bit vector length {len}"))
        })?;
        Ok(Self::new(len))
    }

    /// Creates a bit vector over `words` holding `len` bits. Bits past `len`
    /// in the final word are discarded.
    ///
    /// Fails with [`BitVecError::InvalidArgument`] unless `words` holds
    /// exactly `ceil(len / 64)` words.
    ///
    /// ```
    /// use bitrank::{BitVector, Word};
    ///
    /// let words: Vec<Word> = vec![Word::MAX, 0b1011];
    /// let bv = BitVector::from_words(words, 66)?;
    /// assert_eq!(bv.count_ones(), 66);
    /// assert_eq!(bv.words(), &[Word::MAX, 0b11]);
    /// assert!(BitVector::from_words(vec![0; 3], 66).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    pub fn from_words(words: Vec<Word>, len: usize) -> Result<Self, BitVecError> {
        let expected = words_for_bits(len);
        if words.len() != expected {
            return Err(BitVecError::InvalidArgument(format!(
                "{len} bits require {expected} words, got {}",
                words.len()
            )));
        }
        Ok(Self::from_raw(words, len))
    }

    /// Wraps freshly computed words, restoring the padding invariant and
    /// building the rank directory.
    #[inline]
    pub(crate) fn from_raw(mut words: Vec<Word>, len: usize) -> Self {
        debug_assert_eq!(words.len(), words_for_bits(len));
        apply_tail_mask(&mut words, len);
        let rank = RankIndex::build(&words);
        Self { words, len, rank }
    }

    /// Number of bits in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bit is set. A zero-length vector is empty.
    ///
    /// Note that this is about the bit content, not the length: a vector of
    /// one hundred clear bits is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rank.ones() == 0
    }

    /// Returns `true` if at least one bit is set.
    #[inline]
    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    /// Truth value of the vector: `true` iff any bit is set.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        self.any()
    }

    /// Number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.rank.ones()
    }

    /// Number of clear bits.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.rank.ones()
    }

    /// The backing words. Padding bits in the final word are always zero.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Views the logical bits as a [`BitSlice`].
    #[inline]
    pub fn as_bitslice(&self) -> &BitSlice<Word, Lsb0> {
        &self.words.view_bits::<Lsb0>()[..self.len]
    }

    /// Returns the bit at `index`.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let mut bv = BitVector::new(4);
    /// bv.set(0)?;
    /// assert!(bv.get(0)?);
    /// assert!(bv.get(-4)?);
    /// assert!(!bv.get(-1)?);
    /// assert!(bv.get(4).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    #[inline]
    pub fn get(&self, index: isize) -> Result<bool, BitVecError> {
        let pos = resolve_index(index, self.len)?;
        Ok(self.bit(pos))
    }

    /// Sets the bit at `index`.
    #[inline]
    pub fn set(&mut self, index: isize) -> Result<(), BitVecError> {
        self.assign(index, true)
    }

    /// Clears the bit at `index`.
    #[inline]
    pub fn clear(&mut self, index: isize) -> Result<(), BitVecError> {
        self.assign(index, false)
    }

    /// Toggles the bit at `index`.
    #[inline]
    pub fn flip(&mut self, index: isize) -> Result<(), BitVecError> {
        let pos = resolve_index(index, self.len)?;
        self.write_bit(pos, !self.bit(pos));
        Ok(())
    }

    /// Writes `value` into the bit at `index`; the subscript-assignment form
    /// of [`BitVector::set`] and [`BitVector::clear`].
    #[inline]
    pub fn assign(&mut self, index: isize, value: bool) -> Result<(), BitVecError> {
        let pos = resolve_index(index, self.len)?;
        self.write_bit(pos, value);
        Ok(())
    }

    #[inline]
    pub(crate) fn bit(&self, pos: usize) -> bool {
        self.words[word_key(pos)] & word_mask(pos) != 0
    }

    /// Every single-bit mutation lands here so the rank directory is updated
    /// together with the word.
    #[inline]
    pub(crate) fn write_bit(&mut self, pos: usize, value: bool) {
        debug_assert!(pos < self.len);
        let key = word_key(pos);
        let mask = word_mask(pos);
        let word = &mut self.words[key];
        if (*word & mask != 0) != value {
            *word ^= mask;
            self.rank.adjust(key, if value { 1 } else { -1 });
        }
    }

    /// Sets every bit in `range`.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let mut bv = BitVector::new(130);
    /// bv.set_range(10..75)?;
    /// assert_eq!(bv.count_ones(), 65);
    /// assert!(!bv.get(9)? && bv.get(10)? && bv.get(74)? && !bv.get(75)?);
    ///
    /// assert!(bv.set_range(100..131).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    pub fn set_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), BitVecError> {
        self.update_range(range, |word, mask| *word |= mask)
    }

    /// Clears every bit in `range`.
    pub fn clear_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), BitVecError> {
        self.update_range(range, |word, mask| *word &= !mask)
    }

    /// Toggles every bit in `range`.
    pub fn flip_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), BitVecError> {
        self.update_range(range, |word, mask| *word ^= mask)
    }

    fn update_range<R, F>(&mut self, range: R, op: F) -> Result<(), BitVecError>
    where
        R: RangeBounds<usize>,
        F: Fn(&mut Word, Word),
    {
        let range = resolve_range(range, self.len)?;
        if range.is_empty() {
            return Ok(());
        }

        let first = word_key(range.start);
        let last = word_key(range.end - 1);
        let lo = word_bit(range.start);
        let hi = word_bit(range.end - 1) + 1;

        if first == last {
            op(&mut self.words[first], span_mask(lo, hi));
        } else {
            op(&mut self.words[first], span_mask(lo, WORD_BITS as u32));
            for word in &mut self.words[first + 1..last] {
                op(word, Word::MAX);
            }
            op(&mut self.words[last], span_mask(0, hi));
        }

        self.resync_from(first);
        Ok(())
    }

    /// Restores the padding invariant and rebuilds the rank directory from
    /// the superblock containing `word` onward. Bulk writers call this after
    /// touching the words directly.
    #[inline]
    pub(crate) fn resync_from(&mut self, word: usize) {
        apply_tail_mask(&mut self.words, self.len);
        self.rank.rebuild_from(&self.words, word);
    }

    #[inline]
    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Number of set bits in `[0, index]`, inclusive of `index`.
    ///
    /// Answers with one superblock lookup, one word lookup and one popcount.
    /// `rank(len)` is out of range; use [`BitVector::count_ones`] for the
    /// total.
    #[inline]
    pub fn rank(&self, index: isize) -> Result<usize, BitVecError> {
        let pos = resolve_index(index, self.len)?;
        Ok(self.rank.rank(&self.words, pos))
    }

    /// Number of clear bits in `[0, index]`.
    #[inline]
    pub fn rank0(&self, index: isize) -> Result<usize, BitVecError> {
        let pos = resolve_index(index, self.len)?;
        Ok(pos + 1 - self.rank.rank(&self.words, pos))
    }

    /// Position of the k-th (0-based) set bit, or `None` if fewer than
    /// `k + 1` bits are set.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let bv: BitVector = [false, true, false, true].into_iter().collect();
    /// assert_eq!(bv.select(0), Some(1));
    /// assert_eq!(bv.select(1), Some(3));
    /// assert_eq!(bv.select(2), None);
    /// ```
    #[inline]
    pub fn select(&self, k: usize) -> Option<usize> {
        self.select1(k)
    }

    /// Alias of [`BitVector::select`].
    #[inline]
    pub fn select1(&self, k: usize) -> Option<usize> {
        self.rank.select1(&self.words, k)
    }

    /// Position of the k-th (0-based) clear bit, or `None` if fewer than
    /// `k + 1` bits are clear.
    #[inline]
    pub fn select0(&self, k: usize) -> Option<usize> {
        self.rank.select0(&self.words, self.len, k)
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in iter {
            if len % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                words[word_key(len)] |= word_mask(len);
            }
            len += 1;
        }
        Self::from_raw(words, len)
    }
}

impl From<&BitSlice<Word, Lsb0>> for BitVector {
    fn from(bits: &BitSlice<Word, Lsb0>) -> Self {
        let mut words = vec![0; words_for_bits(bits.len())];
        for pos in bits.iter_ones() {
            words[word_key(pos)] |= word_mask(pos);
        }
        Self::from_raw(words, bits.len())
    }
}

impl Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.iter_ones().take(10).collect_vec();
        f.debug_struct("BitVector")
            .field("len", &self.len)
            .field("ones", &self.count_ones())
            .field("prefix", &prefix)
            .finish()
    }
}

impl Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector with {} bits", self.len)
    }
}
