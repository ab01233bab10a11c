use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::{BitAlgebra, BitVecError, BitVector, word::Word};

fn check_len(op: &str, lhs: &BitVector, rhs: &BitVector) -> Result<(), BitVecError> {
    if lhs.len() != rhs.len() {
        return Err(BitVecError::InvalidArgument(format!(
            "length mismatch for {op}: {} != {}",
            lhs.len(),
            rhs.len()
        )));
    }
    Ok(())
}

impl BitVector {
    fn combine(
        &self,
        rhs: &BitVector,
        op: &str,
        f: impl Fn(Word, Word) -> Word,
    ) -> Result<BitVector, BitVecError> {
        check_len(op, self, rhs)?;
        let words = self
            .words()
            .iter()
            .zip(rhs.words())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(BitVector::from_raw(words, self.len()))
    }

    fn combine_assign(
        &mut self,
        rhs: &BitVector,
        op: &str,
        f: impl Fn(Word, Word) -> Word,
    ) -> Result<&mut Self, BitVecError> {
        check_len(op, self, rhs)?;
        for (a, &b) in self.words_mut().iter_mut().zip(rhs.words()) {
            *a = f(*a, b);
        }
        self.resync_from(0);
        Ok(self)
    }
}

impl BitAlgebra for BitVector {
    fn and(&self, rhs: &Self) -> Result<Self, BitVecError> {
        self.combine(rhs, "&", |a, b| a & b)
    }

    fn or(&self, rhs: &Self) -> Result<Self, BitVecError> {
        self.combine(rhs, "|", |a, b| a | b)
    }

    fn xor(&self, rhs: &Self) -> Result<Self, BitVecError> {
        self.combine(rhs, "^", |a, b| a ^ b)
    }

    fn not(&self) -> Self {
        // from_raw clears the padding bits the inversion sets
        BitVector::from_raw(self.words().iter().map(|w| !w).collect(), self.len())
    }

    fn and_assign(&mut self, rhs: &Self) -> Result<&mut Self, BitVecError> {
        self.combine_assign(rhs, "&=", |a, b| a & b)
    }

    fn or_assign(&mut self, rhs: &Self) -> Result<&mut Self, BitVecError> {
        self.combine_assign(rhs, "|=", |a, b| a | b)
    }

    fn xor_assign(&mut self, rhs: &Self) -> Result<&mut Self, BitVecError> {
        self.combine_assign(rhs, "^=", |a, b| a ^ b)
    }
}

/// Operator forms of [`BitAlgebra`]. A length mismatch can't be expressed
/// through the operator's return type otherwise, so every binary operator
/// yields `Result<BitVector, BitVecError>`. An owned left operand is reused
/// as the output buffer.
macro_rules! binary_bitop {
    ($BitOp:tt, $bitop:ident, $algebra:ident, $assign:ident) => {
        impl $BitOp<&BitVector> for &BitVector {
            type Output = Result<BitVector, BitVecError>;
            fn $bitop(self, rhs: &BitVector) -> Self::Output {
                BitAlgebra::$algebra(self, rhs)
            }
        }
        impl $BitOp<BitVector> for &BitVector {
            type Output = Result<BitVector, BitVecError>;
            fn $bitop(self, rhs: BitVector) -> Self::Output {
                BitAlgebra::$algebra(self, &rhs)
            }
        }
        impl $BitOp<&BitVector> for BitVector {
            type Output = Result<BitVector, BitVecError>;
            fn $bitop(mut self, rhs: &BitVector) -> Self::Output {
                BitAlgebra::$assign(&mut self, rhs)?;
                Ok(self)
            }
        }
        impl $BitOp<BitVector> for BitVector {
            type Output = Result<BitVector, BitVecError>;
            fn $bitop(self, rhs: BitVector) -> Self::Output {
                $BitOp::$bitop(self, &rhs)
            }
        }
    };
}

binary_bitop!(BitAnd, bitand, and, and_assign);
binary_bitop!(BitOr, bitor, or, or_assign);
binary_bitop!(BitXor, bitxor, xor, xor_assign);

impl Not for &BitVector {
    type Output = BitVector;
    fn not(self) -> Self::Output {
        BitAlgebra::not(self)
    }
}

impl Not for BitVector {
    type Output = BitVector;
    fn not(mut self) -> Self::Output {
        for w in self.words_mut() {
            *w = !*w;
        }
        self.resync_from(0);
        self
    }
}
