//! bitrank is a fixed-length, word-packed bit vector with constant-time rank
//! queries, modeled after the rank directories used by succinct data structures.
//!
//! ## Key Features:
//!
//! - **Packed storage**: bits live in 64-bit words, bit `i` in word `i / 64`.
//!   Padding bits past the logical length are always zero.
//!
//! - **O(1) rank**: a two-level directory of cumulative popcounts (512-bit
//!   superblocks, 64-bit words) answers `rank(i)` with two lookups and one
//!   popcount. The directory is kept in sync on every mutation, so a query
//!   never observes stale counts.
//!
//! - **Word-wise algebra**: AND/OR/XOR/NOT, concatenation, repetition and
//!   slicing work a word at a time, shifting and merging across word
//!   boundaries when offsets are unaligned.
//!
//! ```
//! use bitrank::{BitVector, SequenceAlgebra};
//!
//! let mut bv = BitVector::new(100);
//! bv.set(0)?;
//! bv.set(10)?;
//! bv.set(-80)?; // position 20
//!
//! assert_eq!(bv.rank(9)?, 1);
//! assert_eq!(bv.rank(20)?, 3);
//! assert_eq!(bv.select(2), Some(20));
//!
//! let doubled = bv.repeat(2);
//! assert_eq!(doubled.len(), 200);
//! assert_eq!(doubled.count_ones(), 6);
//! # Ok::<(), bitrank::BitVecError>(())
//! ```

use thiserror::Error;

mod bitvector;
mod cmp;
mod iter;
mod operand;
mod ops;
mod rank;
mod sequence;
mod traits;
mod util;
mod word;

#[cfg(feature = "testutil")]
pub mod testutil;

pub use bitvector::BitVector;
pub use iter::{Iter, IterOnes};
pub use operand::{BinaryOp, Operand};
pub use traits::{BitAlgebra, SequenceAlgebra};
pub use word::{SUPERBLOCK_BITS, SUPERBLOCK_WORDS, WORD_BITS, Word};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitVecError {
    #[error("bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operand type for {op}: {operand}")]
    InvalidOperandType {
        op: &'static str,
        operand: &'static str,
    },
}
