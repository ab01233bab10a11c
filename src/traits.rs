use crate::BitVecError;

/// Bitwise algebra over equal-length bit vectors.
///
/// Binary operations require both operands to have the same length and fail
/// with [`BitVecError::InvalidArgument`] otherwise. The in-place forms leave
/// `self` untouched on failure.
pub trait BitAlgebra<Rhs: ?Sized = Self>: Sized {
    /// returns a new vector holding `self & rhs`
    fn and(&self, rhs: &Rhs) -> Result<Self, BitVecError>;

    /// returns a new vector holding `self | rhs`
    fn or(&self, rhs: &Rhs) -> Result<Self, BitVecError>;

    /// returns a new vector holding `self ^ rhs`
    fn xor(&self, rhs: &Rhs) -> Result<Self, BitVecError>;

    /// returns a new vector with every bit inverted
    fn not(&self) -> Self;

    /// replaces `self` with `self & rhs` and returns it for chaining
    fn and_assign(&mut self, rhs: &Rhs) -> Result<&mut Self, BitVecError>;

    /// replaces `self` with `self | rhs` and returns it for chaining
    fn or_assign(&mut self, rhs: &Rhs) -> Result<&mut Self, BitVecError>;

    /// replaces `self` with `self ^ rhs` and returns it for chaining
    fn xor_assign(&mut self, rhs: &Rhs) -> Result<&mut Self, BitVecError>;
}

/// Sequence algebra: concatenation and repetition.
pub trait SequenceAlgebra: Sized {
    /// returns `self` followed by `rhs`
    fn concat(&self, rhs: &Self) -> Self;

    /// returns `self` repeated `count` times; `count == 0` yields an empty
    /// vector
    fn repeat(&self, count: usize) -> Self;

    /// Like [`SequenceAlgebra::repeat`] but accepts a signed count, failing
    /// with [`BitVecError::InvalidArgument`] when it is negative or when the
    /// resulting length would overflow.
    fn try_repeat(&self, count: isize) -> Result<Self, BitVecError>;
}
