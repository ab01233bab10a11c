use std::ops::{Add, Mul, Range, RangeBounds};

use log::trace;

use crate::{
    BitVecError, BitVector, SequenceAlgebra,
    util::resolve_range,
    word::{WORD_BITS, Word, word_at, word_bit, word_key, word_mask, words_for_bits},
};

/// ORs the bits of `src` into `dst` starting at bit `offset`. The target
/// region must be zero and large enough to hold every set bit of `src`.
fn splice_bits(dst: &mut [Word], offset: usize, src: &[Word]) {
    let bit = word_bit(offset);
    let base = word_key(offset);
    for (i, &w) in src.iter().enumerate() {
        if w == 0 {
            continue;
        }
        let key = base + i;
        dst[key] |= w << bit;
        if bit != 0 && key + 1 < dst.len() {
            dst[key + 1] |= w >> (WORD_BITS as u32 - bit);
        }
    }
}

impl BitVector {
    /// Repeats `self` `count` times, or `None` if the result length
    /// overflows.
    fn repeated(&self, count: usize) -> Option<BitVector> {
        let len = self.len().checked_mul(count)?;
        trace!("repeating {} bits {count} times", self.len());

        let mut words = vec![0; words_for_bits(len)];
        if self.len() % WORD_BITS == 0 {
            for chunk in words.chunks_exact_mut(self.words().len().max(1)) {
                chunk.copy_from_slice(self.words());
            }
        } else if self.any() {
            for i in 0..count {
                splice_bits(&mut words, i * self.len(), self.words());
            }
        }
        Some(BitVector::from_raw(words, len))
    }

    /// Returns a copy of the bits in `range`.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let bv: BitVector = [true, false, true, true, false].into_iter().collect();
    /// let tail = bv.slice(2..)?;
    /// assert_eq!(tail.len(), 3);
    /// assert_eq!(tail.count_ones(), 2);
    /// assert!(bv.slice(3..6).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Result<BitVector, BitVecError> {
        let range = resolve_range(range, self.len())?;
        let len = range.len();
        let words = (0..words_for_bits(len))
            .map(|i| word_at(self.words(), range.start + i * WORD_BITS))
            .collect();
        Ok(BitVector::from_raw(words, len))
    }

    /// Returns every `step`-th bit of `range`. A negative step walks the range
    /// backwards starting from its last bit.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let bv: BitVector = [true, false, false, true, true, false].into_iter().collect();
    /// let evens = bv.slice_step(.., 2)?;
    /// assert_eq!(evens, [true, false, true].into_iter().collect::<BitVector>());
    ///
    /// let reversed = bv.slice_step(.., -1)?;
    /// assert_eq!(reversed.select(0), Some(1));
    /// assert!(bv.slice_step(.., 0).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    pub fn slice_step<R: RangeBounds<usize>>(
        &self,
        range: R,
        step: isize,
    ) -> Result<BitVector, BitVecError> {
        if step == 1 {
            return self.slice(range);
        }
        let positions = StepPositions::new(resolve_range(range, self.len())?, step)?;
        Ok(positions.map(|pos| self.bit(pos)).collect())
    }

    /// Overwrites every `step`-th bit of `range` with `values`, walking the
    /// positions in the same order as [`BitVector::slice_step`].
    ///
    /// Fails with [`BitVecError::InvalidArgument`] when `step` is zero or when
    /// `values` does not yield exactly one bit per selected position. Nothing
    /// is written on failure.
    ///
    /// ```
    /// use bitrank::BitVector;
    ///
    /// let mut bv = BitVector::new(6);
    /// bv.assign_slice(1.., 2, [true, true, false])?;
    /// assert!(bv.iter_ones().eq([1, 3]));
    /// assert!(bv.assign_slice(.., 1, [true]).is_err());
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    pub fn assign_slice<R, I>(&mut self, range: R, step: isize, values: I) -> Result<(), BitVecError>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = bool>,
        I::IntoIter: ExactSizeIterator,
    {
        let positions = StepPositions::new(resolve_range(range, self.len())?, step)?;
        let values = values.into_iter();
        if positions.len() != values.len() {
            return Err(BitVecError::InvalidArgument(format!(
                "cannot assign {} bits to a slice of {} bits",
                values.len(),
                positions.len()
            )));
        }
        let Some(first) = positions.lowest() else {
            return Ok(());
        };

        let words = self.words_mut();
        for (pos, bit) in positions.zip(values) {
            if bit {
                words[word_key(pos)] |= word_mask(pos);
            } else {
                words[word_key(pos)] &= !word_mask(pos);
            }
        }
        self.resync_from(word_key(first));
        Ok(())
    }
}

/// Positions visited by a stepped walk over a resolved range.
struct StepPositions {
    start: usize,
    end: usize,
    step: isize,
    taken: usize,
    count: usize,
}

impl StepPositions {
    fn new(range: Range<usize>, step: isize) -> Result<Self, BitVecError> {
        if step == 0 {
            return Err(BitVecError::InvalidArgument("slice step cannot be zero".into()));
        }
        let stride = step.unsigned_abs();
        let count = match range.len() {
            0 => 0,
            n => (n - 1) / stride + 1,
        };
        Ok(Self {
            start: range.start,
            end: range.end,
            step,
            taken: 0,
            count,
        })
    }

    fn nth_position(&self, i: usize) -> usize {
        let offset = i * self.step.unsigned_abs();
        if self.step > 0 {
            self.start + offset
        } else {
            self.end - 1 - offset
        }
    }

    fn lowest(&self) -> Option<usize> {
        match self.count {
            0 => None,
            _ if self.step > 0 => Some(self.start),
            n => Some(self.nth_position(n - 1)),
        }
    }
}

impl Iterator for StepPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.taken == self.count {
            return None;
        }
        let pos = self.nth_position(self.taken);
        self.taken += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.taken;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StepPositions {}

impl SequenceAlgebra for BitVector {
    /// ```
    /// use bitrank::{BitVector, SequenceAlgebra};
    ///
    /// let a: BitVector = [true, false, true, false, true].into_iter().collect();
    /// let b: BitVector = [false, true, false].into_iter().collect();
    /// let c = a.concat(&b);
    /// assert_eq!(c.len(), 8);
    /// assert_eq!(c.count_ones(), 4);
    /// assert!(c.get(6)?);
    /// # Ok::<(), bitrank::BitVecError>(())
    /// ```
    fn concat(&self, rhs: &Self) -> Self {
        let len = self.len() + rhs.len();
        trace!("concatenating {} + {} bits", self.len(), rhs.len());

        let mut words = vec![0; words_for_bits(len)];
        words[..self.words().len()].copy_from_slice(self.words());
        splice_bits(&mut words, self.len(), rhs.words());
        BitVector::from_raw(words, len)
    }

    /// # Panics
    ///
    /// Panics if `self.len() * count` overflows `usize`. Use
    /// [`SequenceAlgebra::try_repeat`] to handle that case.
    fn repeat(&self, count: usize) -> Self {
        self.repeated(count).expect("bit vector length overflow")
    }

    fn try_repeat(&self, count: isize) -> Result<Self, BitVecError> {
        let count = usize::try_from(count).map_err(|_| {
            BitVecError::InvalidArgument(format!("negative repeat count {count}"))
        })?;
        self.repeated(count).ok_or_else(|| {
            BitVecError::InvalidArgument(format!(
                "repeating {} bits {count} times overflows",
                self.len()
            ))
        })
    }
}

impl Add<&BitVector> for &BitVector {
    type Output = BitVector;
    fn add(self, rhs: &BitVector) -> BitVector {
        self.concat(rhs)
    }
}

impl Add<BitVector> for &BitVector {
    type Output = BitVector;
    fn add(self, rhs: BitVector) -> BitVector {
        self.concat(&rhs)
    }
}

impl Add<&BitVector> for BitVector {
    type Output = BitVector;
    fn add(self, rhs: &BitVector) -> BitVector {
        self.concat(rhs)
    }
}

impl Add<BitVector> for BitVector {
    type Output = BitVector;
    fn add(self, rhs: BitVector) -> BitVector {
        self.concat(&rhs)
    }
}

macro_rules! repeat_op {
    ($($lhs:ty),*) => {
        $(
            impl Mul<usize> for $lhs {
                type Output = BitVector;
                fn mul(self, count: usize) -> BitVector {
                    self.repeat(count)
                }
            }
            impl Mul<$lhs> for usize {
                type Output = BitVector;
                fn mul(self, bits: $lhs) -> BitVector {
                    bits.repeat(self)
                }
            }
        )*
    };
}

repeat_op!(&BitVector, BitVector);

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::{collection::vec, prelude::*, proptest};

    use crate::{
        BitVecError, BitVector, SequenceAlgebra,
        testutil::{from_pattern, mkbitvec},
    };

    #[test]
    fn test_concat_literal() {
        let a = from_pattern("10101");
        let b = from_pattern("010");
        let c = &a + &b;
        assert_eq!(c, from_pattern("10101010"));
        assert_eq!(c.len(), 8);
        assert_eq!(c.rank(-1), Ok(4));

        // operands are untouched
        assert_eq!(a, from_pattern("10101"));
        assert_eq!(b, from_pattern("010"));
    }

    #[test]
    fn test_concat_unaligned() {
        let a = mkbitvec(70, [0, 69]);
        let b = mkbitvec(70, [0, 63, 64, 69]);
        let c = a.concat(&b);
        assert_eq!(c.len(), 140);
        assert_eq!(c, mkbitvec(140, [0, 69, 70, 133, 134, 139]));
        assert_eq!(c.select(5), Some(139));
        assert_eq!(c.words()[2] >> 12, 0);
    }

    #[test]
    fn test_concat_unaligned_literal() {
        let a = mkbitvec(70, [0, 69]);
        let b = mkbitvec(70, [1, 68]);
        let c = &a + &b;
        assert_eq!(c.len(), 140);
        assert_eq!(c.get(70 + 1), Ok(true));
        assert_eq!(c.get(70 + 68), Ok(true));
        assert_eq!(c.get(70), Ok(false));
        assert!(c.iter_ones().eq([0, 69, 71, 138]));
    }

    #[test]
    fn test_concat_empty() {
        let a = mkbitvec(10, [3]);
        let empty = BitVector::new(0);
        assert_eq!(&a + &empty, a);
        assert_eq!(&empty + &a, a);
        assert_eq!((&empty + &empty).len(), 0);
    }

    #[test]
    fn test_repeat_literal() {
        let a = from_pattern("1001");
        let r = &a * 3;
        assert_eq!(r, from_pattern("100110011001"));
        assert_eq!(r.len(), 12);
        assert_eq!(r.count_ones(), 6);
        assert_eq!(3usize * &a, r);
        assert_eq!(a.clone() * 3, r);

        let zero = &a * 0;
        assert_eq!(zero.len(), 0);
        assert!(zero.is_empty());

        assert_matches!(a.try_repeat(-1), Err(BitVecError::InvalidArgument(_)));
        assert_matches!(a.try_repeat(isize::MAX), Err(BitVecError::InvalidArgument(_)));
        assert_eq!(a.try_repeat(3), Ok(r));
    }

    #[test]
    fn test_repeat_aligned_and_empty() {
        let a = mkbitvec(128, [0, 127]);
        let r = a.repeat(3);
        assert_eq!(r, mkbitvec(384, [0, 127, 128, 255, 256, 383]));

        let empty = BitVector::new(0);
        assert_eq!(empty.repeat(10).len(), 0);
        assert_eq!(BitVector::new(5).repeat(4), BitVector::new(20));
    }

    #[test]
    fn test_slice() {
        let bv = mkbitvec(200, [0, 63, 64, 65, 130, 199]);
        assert_eq!(bv.slice(..).unwrap(), bv);
        assert_eq!(bv.slice(63..66).unwrap(), from_pattern("111"));
        assert_eq!(bv.slice(60..140).unwrap(), mkbitvec(80, [3, 4, 5, 70]));
        assert_eq!(bv.slice(199..).unwrap(), from_pattern("1"));
        assert_eq!(bv.slice(10..10).unwrap().len(), 0);
        assert_matches!(bv.slice(150..201), Err(BitVecError::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_slice_step() {
        let bv = from_pattern("1101001");
        assert_eq!(bv.slice_step(.., 2).unwrap(), from_pattern("1001"));
        assert_eq!(bv.slice_step(1.., 3).unwrap(), from_pattern("10"));
        assert_eq!(bv.slice_step(.., -1).unwrap(), from_pattern("1001011"));
        assert_eq!(bv.slice_step(..4, -2).unwrap(), from_pattern("11"));
        assert_eq!(bv.slice_step(3..3, -2).unwrap().len(), 0);
        assert_matches!(bv.slice_step(.., 0), Err(BitVecError::InvalidArgument(_)));
    }

    #[test]
    fn test_assign_slice() {
        let mut bv = BitVector::new(10);
        bv.assign_slice(.., 3, &from_pattern("1111")).unwrap();
        assert_eq!(bv, mkbitvec(10, [0, 3, 6, 9]));
        assert_eq!(bv.rank(-1), Ok(4));

        bv.assign_slice(5.., -1, &from_pattern("01111")).unwrap();
        assert_eq!(bv, mkbitvec(10, [0, 3, 5, 6, 7, 8]));

        let before = bv.clone();
        assert_matches!(
            bv.assign_slice(.., 2, &from_pattern("11")),
            Err(BitVecError::InvalidArgument(_))
        );
        assert_matches!(
            bv.assign_slice(.., 0, &BitVector::new(0)),
            Err(BitVecError::InvalidArgument(_))
        );
        assert_matches!(
            bv.assign_slice(..11, 1, &BitVector::new(11)),
            Err(BitVecError::IndexOutOfRange { .. })
        );
        assert_eq!(bv, before);
    }

    proptest! {
        #[test]
        fn test_concat_repeat_match_bools_proptest(
            a in vec(any::<bool>(), 0..200),
            b in vec(any::<bool>(), 0..200),
            count in 0..5usize,
        ) {
            let x: BitVector = a.iter().copied().collect();
            let y: BitVector = b.iter().copied().collect();

            let concat: BitVector = a.iter().chain(&b).copied().collect();
            prop_assert_eq!(x.concat(&y), concat);

            let repeated: BitVector = a.iter().copied().cycle().take(a.len() * count).collect();
            prop_assert_eq!(x.repeat(count), repeated);
        }

        #[test]
        fn test_slice_step_matches_bools_proptest(
            bits in vec(any::<bool>(), 0..300),
            bounds in (0..300usize, 0..300usize),
            step in prop_oneof![-7..0isize, 1..8isize],
        ) {
            let bv: BitVector = bits.iter().copied().collect();
            let lo = bounds.0.min(bounds.1).min(bits.len());
            let hi = bounds.0.max(bounds.1).min(bits.len());

            let window = &bits[lo..hi];
            let expected: BitVector = if step > 0 {
                window.iter().copied().step_by(step as usize).collect()
            } else {
                window.iter().rev().copied().step_by(step.unsigned_abs()).collect()
            };
            prop_assert_eq!(bv.slice_step(lo..hi, step).unwrap(), expected);
        }
    }
}
