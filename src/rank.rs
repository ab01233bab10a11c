//! Two-level rank directory.
//!
//! `supers[s]` holds the number of 1-bits before superblock `s` (512 bits),
//! and `blocks[w]` holds the number of 1-bits between the start of word `w`'s
//! superblock and the start of word `w`. A rank query is then a superblock
//! lookup, a word lookup and a popcount of the partial word.

use log::trace;

use crate::word::{
    SUPERBLOCK_BITS, SUPERBLOCK_SHIFT, SUPERBLOCK_WORDS, WORD_BITS, Word, rank_in_word,
    select_in_word, word_bit, word_key,
};

#[derive(Clone, Default, PartialEq, Eq)]
pub struct RankIndex {
    supers: Vec<usize>,
    blocks: Vec<u16>,
    ones: usize,
}

#[inline]
fn super_key(word: usize) -> usize {
    word >> SUPERBLOCK_SHIFT
}

impl RankIndex {
    /// Build the directory over `words`.
    pub fn build(words: &[Word]) -> Self {
        let mut index = Self {
            supers: vec![0; words.len().div_ceil(SUPERBLOCK_WORDS)],
            blocks: vec![0; words.len()],
            ones: 0,
        };
        index.rebuild_from(words, 0);
        index
    }

    /// Recompute the directory from the superblock containing `word` to the
    /// end. Summaries before that superblock are left untouched, so callers
    /// must pass the first word they modified.
    pub fn rebuild_from(&mut self, words: &[Word], word: usize) {
        debug_assert_eq!(self.blocks.len(), words.len());
        let first_super = super_key(word);
        if first_super >= self.supers.len() {
            return;
        }

        let mut total = self.supers[first_super];
        for (s, chunk) in words
            .chunks(SUPERBLOCK_WORDS)
            .enumerate()
            .skip(first_super)
        {
            self.supers[s] = total;
            let base = s * SUPERBLOCK_WORDS;
            let mut acc = 0usize;
            for (i, w) in chunk.iter().enumerate() {
                self.blocks[base + i] = acc as u16;
                acc += w.count_ones() as usize;
            }
            total += acc;
        }
        self.ones = total;

        trace!(
            "rebuilt rank index from superblock {first_super} of {} ({} ones)",
            self.supers.len(),
            self.ones
        );
    }

    /// Apply a single-bit change in `word`: `delta` is +1 when a bit was
    /// set and -1 when a bit was cleared.
    pub fn adjust(&mut self, word: usize, delta: isize) {
        let s = super_key(word);
        let end = ((s + 1) * SUPERBLOCK_WORDS).min(self.blocks.len());
        for block in &mut self.blocks[word + 1..end] {
            *block = block.wrapping_add_signed(delta as i16);
        }
        for total in &mut self.supers[s + 1..] {
            *total = total.wrapping_add_signed(delta);
        }
        self.ones = self.ones.wrapping_add_signed(delta);
    }

    /// Total number of 1-bits summarized.
    #[inline]
    pub fn ones(&self) -> usize {
        self.ones
    }

    /// Number of 1-bits in `[0, pos]`. `pos` must address a bit within
    /// `words`.
    #[inline]
    pub fn rank(&self, words: &[Word], pos: usize) -> usize {
        let w = word_key(pos);
        self.supers[super_key(w)] + self.blocks[w] as usize + rank_in_word(words[w], word_bit(pos))
    }

    /// Position of the k-th (0-based) 1-bit.
    pub fn select1(&self, words: &[Word], k: usize) -> Option<usize> {
        if k >= self.ones {
            return None;
        }
        // last superblock whose prefix count is <= k
        let s = self.supers.partition_point(|&before| before <= k) - 1;
        let mut remaining = k - self.supers[s];

        let base = s * SUPERBLOCK_WORDS;
        let end = (base + SUPERBLOCK_WORDS).min(words.len());
        for w in base..end {
            let before = self.blocks[w] as usize;
            let pop = words[w].count_ones() as usize;
            if remaining < before + pop {
                remaining -= before;
                let bit = select_in_word(words[w], remaining)?;
                return Some(w * WORD_BITS + bit as usize);
            }
        }
        None
    }

    /// Position of the k-th (0-based) 0-bit among the first `len` bits.
    pub fn select0(&self, words: &[Word], len: usize, k: usize) -> Option<usize> {
        if k >= len - self.ones {
            return None;
        }
        let zeros_before_super = |s: usize| s * SUPERBLOCK_BITS - self.supers[s];

        // binary search for the last superblock with zeros_before <= k
        let (mut lo, mut hi) = (0, self.supers.len());
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if zeros_before_super(mid) <= k {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let remaining = k - zeros_before_super(lo);

        let base = lo * SUPERBLOCK_WORDS;
        let end = (base + SUPERBLOCK_WORDS).min(words.len());
        for w in base..end {
            let before = (w - base) * WORD_BITS - self.blocks[w] as usize;
            let zeros = words[w].count_zeros() as usize;
            if remaining < before + zeros {
                let bit = select_in_word(!words[w], remaining - before)?;
                return Some(w * WORD_BITS + bit as usize);
            }
        }
        None
    }
}
