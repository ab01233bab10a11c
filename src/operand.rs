//! Dynamically typed operands.
//!
//! Callers that receive loosely typed values, such as an interpreter binding,
//! wrap them in [`Operand`] and dispatch through [`BitVector::apply`]. The
//! typed methods and operators remain the primary API.

use crate::{BitAlgebra, BitVecError, BitVector, SequenceAlgebra};

/// A right-hand (or, for reflected repetition, left-hand) operand of unknown
/// type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Bits(&'a BitVector),
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    None,
}

impl Operand<'_> {
    /// Name of the operand's type as reported in
    /// [`BitVecError::InvalidOperandType`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bits(_) => "BitVector",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::None => "none",
        }
    }

    /// Interprets the operand as a repetition count. Bools count as 0 or 1.
    fn as_count(&self) -> Option<i64> {
        match *self {
            Self::Int(k) => Some(k),
            Self::Bool(b) => Some(b as i64),
            _ => None,
        }
    }
}

impl<'a> From<&'a BitVector> for Operand<'a> {
    fn from(bv: &'a BitVector) -> Self {
        Self::Bits(bv)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Operand<'_> {
    fn from(k: i64) -> Self {
        Self::Int(k)
    }
}

impl From<f64> for Operand<'_> {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Operand<'_> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Concat,
    Repeat,
}

impl BinaryOp {
    /// The operator's symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Concat => "+",
            Self::Repeat => "*",
        }
    }

    fn rejects(self, operand: Operand<'_>) -> BitVecError {
        BitVecError::InvalidOperandType {
            op: self.symbol(),
            operand: operand.type_name(),
        }
    }
}

fn repeat_count(count: i64) -> Result<isize, BitVecError> {
    isize::try_from(count)
        .map_err(|_| BitVecError::InvalidArgument(format!("repeat count {count} out of range")))
}

impl BitVector {
    /// Evaluates `self <op> rhs`, leaving `self` untouched.
    ///
    /// ```
    /// use bitrank::{BinaryOp, BitVecError, BitVector, Operand};
    ///
    /// let v = BitVector::new(8);
    /// assert_eq!(v.apply(BinaryOp::Repeat, Operand::Int(2))?.len(), 16);
    /// assert!(matches!(
    ///     v.apply(BinaryOp::Concat, Operand::Int(123)),
    ///     Err(BitVecError::InvalidOperandType { op: "+", operand: "int" })
    /// ));
    /// # Ok::<(), BitVecError>(())
    /// ```
    pub fn apply(&self, op: BinaryOp, rhs: Operand<'_>) -> Result<BitVector, BitVecError> {
        match (op, rhs) {
            (BinaryOp::And, Operand::Bits(b)) => self.and(b),
            (BinaryOp::Or, Operand::Bits(b)) => self.or(b),
            (BinaryOp::Xor, Operand::Bits(b)) => self.xor(b),
            (BinaryOp::Concat, Operand::Bits(b)) => Ok(self.concat(b)),
            (BinaryOp::Repeat, rhs) => match rhs.as_count() {
                Some(count) => self.try_repeat(repeat_count(count)?),
                None => Err(op.rejects(rhs)),
            },
            (op, rhs) => Err(op.rejects(rhs)),
        }
    }

    /// Evaluates `self <op>= rhs` and returns `self` for chaining. On failure
    /// `self` is left untouched.
    pub fn apply_assign(
        &mut self,
        op: BinaryOp,
        rhs: Operand<'_>,
    ) -> Result<&mut Self, BitVecError> {
        match (op, rhs) {
            (BinaryOp::And, Operand::Bits(b)) => self.and_assign(b),
            (BinaryOp::Or, Operand::Bits(b)) => self.or_assign(b),
            (BinaryOp::Xor, Operand::Bits(b)) => self.xor_assign(b),
            (BinaryOp::Concat | BinaryOp::Repeat, rhs) => {
                *self = self.apply(op, rhs)?;
                Ok(self)
            }
            (op, rhs) => Err(op.rejects(rhs)),
        }
    }

    /// Evaluates `lhs <op> self` for a non-vector `lhs`. Only repetition is
    /// commutative, so every other operator rejects `lhs`.
    pub fn apply_reflected(
        &self,
        op: BinaryOp,
        lhs: Operand<'_>,
    ) -> Result<BitVector, BitVecError> {
        match op {
            BinaryOp::Repeat => self.apply(op, lhs),
            op => Err(op.rejects(lhs)),
        }
    }

    /// Equality against a dynamically typed value. Anything other than a bit
    /// vector compares unequal.
    pub fn eq_operand(&self, other: Operand<'_>) -> bool {
        matches!(other, Operand::Bits(b) if b == self)
    }
}
