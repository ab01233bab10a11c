use std::ops::{Bound, Range, RangeBounds};

use num::{
    PrimInt,
    traits::{ConstOne, ConstZero},
};

use crate::BitVecError;

/// Resolve a sequence-style index against `len`: negative indices count from
/// the end. Fails unless the resolved index lies in `[0, len)`.
#[inline]
pub fn resolve_index(index: isize, len: usize) -> Result<usize, BitVecError> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize)
    };
    match resolved {
        Some(pos) if pos < len => Ok(pos),
        _ => Err(BitVecError::IndexOutOfRange { index, len }),
    }
}

/// Clamp an unsigned position into the signed index space used by errors.
#[inline]
pub fn as_index(pos: usize) -> isize {
    isize::try_from(pos).unwrap_or(isize::MAX)
}

pub trait RangeExt<T> {
    fn try_into_half_open(self) -> Option<Range<T>>;
}

impl<R: RangeBounds<T>, T: PrimInt + ConstOne + ConstZero> RangeExt<T> for R {
    /// Converts self into a half-open range. Unbounded ends saturate at the
    /// numeric limits of `T`; returns `None` if an inclusive end cannot be
    /// represented.
    fn try_into_half_open(self) -> Option<Range<T>> {
        let start = match self.start_bound() {
            Bound::Included(v) => *v,
            Bound::Excluded(v) => v.checked_add(&T::ONE)?,
            Bound::Unbounded => T::ZERO,
        };
        let end = match self.end_bound() {
            Bound::Included(v) => v.checked_add(&T::ONE)?,
            Bound::Excluded(v) => *v,
            Bound::Unbounded => T::max_value(),
        };
        Some(start..end)
    }
}

/// Resolve `range` against a sequence of length `len`. Unbounded ends map to
/// `0` and `len`. Fails if the range reaches past `len` or runs backwards.
pub fn resolve_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<Range<usize>, BitVecError> {
    let unbounded_end = matches!(range.end_bound(), Bound::Unbounded);
    let out_of_range = |index| BitVecError::IndexOutOfRange { index, len };

    let Some(Range { start, end }) = range.try_into_half_open() else {
        return Err(out_of_range(isize::MAX));
    };
    let end = if unbounded_end { len } else { end };

    if end > len {
        return Err(out_of_range(as_index(end)));
    }
    if start > end {
        return Err(out_of_range(as_index(start)));
    }
    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(0, 10), Ok(0));
        assert_eq!(resolve_index(9, 10), Ok(9));
        assert_eq!(resolve_index(-1, 10), Ok(9));
        assert_eq!(resolve_index(-10, 10), Ok(0));

        assert_matches!(
            resolve_index(10, 10),
            Err(BitVecError::IndexOutOfRange { index: 10, len: 10 })
        );
        assert_matches!(
            resolve_index(-11, 10),
            Err(BitVecError::IndexOutOfRange { index: -11, len: 10 })
        );
        assert_matches!(resolve_index(0, 0), Err(_));
        assert_matches!(resolve_index(-1, 0), Err(_));
        assert_matches!(resolve_index(isize::MIN, 10), Err(_));
    }

    #[test]
    fn test_try_into_half_open() {
        assert_eq!((3usize..7).try_into_half_open(), Some(3..7));
        assert_eq!((3usize..=7).try_into_half_open(), Some(3..8));
        assert_eq!((..=0u8).try_into_half_open(), Some(0..1));
        assert_eq!((..).try_into_half_open(), Some(0..u16::MAX));
        assert_eq!((..=u32::MAX).try_into_half_open(), None);
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range(.., 10), Ok(0..10));
        assert_eq!(resolve_range(2.., 10), Ok(2..10));
        assert_eq!(resolve_range(..=4, 10), Ok(0..5));
        assert_eq!(resolve_range(3..7, 10), Ok(3..7));
        assert_eq!(resolve_range(10..10, 10), Ok(10..10));
        assert_eq!(resolve_range(.., 0), Ok(0..0));

        assert_matches!(
            resolve_range(5..11, 10),
            Err(BitVecError::IndexOutOfRange { index: 11, len: 10 })
        );
        assert_matches!(resolve_range(..=10, 10), Err(_));
        assert_matches!(resolve_range(11.., 10), Err(_));
        assert_matches!(resolve_range(..=usize::MAX, 10), Err(_));
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = 7..3;
        assert_matches!(resolve_range(backwards, 10), Err(_));
    }
}
