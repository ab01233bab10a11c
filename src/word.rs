pub type Word = u64;

/// Number of bits stored in each word.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of words summarized by one rank superblock.
pub const SUPERBLOCK_WORDS: usize = 1 << SUPERBLOCK_SHIFT;

/// Number of bits summarized by one rank superblock.
pub const SUPERBLOCK_BITS: usize = SUPERBLOCK_WORDS * WORD_BITS;

pub(crate) const SUPERBLOCK_SHIFT: usize = 3;

/// Return the index of the word holding bit `pos`
#[inline]
pub fn word_key(pos: usize) -> usize {
    pos / WORD_BITS
}

/// Return the position of bit `pos` inside its word
#[inline]
pub fn word_bit(pos: usize) -> u32 {
    (pos % WORD_BITS) as u32
}

/// Return the single-bit mask selecting `pos` inside its word
#[inline]
pub fn word_mask(pos: usize) -> Word {
    1 << word_bit(pos)
}

/// Number of words needed to hold `len` bits.
#[inline]
pub fn words_for_bits(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Mask of the valid bits in the final word of a `len` bit vector.
#[inline]
pub fn tail_mask(len: usize) -> Word {
    match len % WORD_BITS {
        0 => Word::MAX,
        tail => (1 << tail) - 1,
    }
}

/// Zero every padding bit past `len` in the final word.
#[inline]
pub fn apply_tail_mask(words: &mut [Word], len: usize) {
    if let Some(last) = words.last_mut() {
        *last &= tail_mask(len);
    }
}

/// Mask of bits `[lo, hi)` within one word. Requires `lo < hi <= WORD_BITS`.
#[inline]
pub fn span_mask(lo: u32, hi: u32) -> Word {
    debug_assert!(lo < hi && hi as usize <= WORD_BITS);
    (Word::MAX >> (WORD_BITS as u32 - (hi - lo))) << lo
}

/// Count the number of 1-bits in the word up to and including `bit`
#[inline]
pub fn rank_in_word(word: Word, bit: u32) -> usize {
    (word << (WORD_BITS as u32 - 1 - bit)).count_ones() as usize
}

/// Position of the k-th (0-based) set bit in `word`, or `None` if the word
/// has fewer than `k + 1` set bits.
#[inline]
pub fn select_in_word(word: Word, k: usize) -> Option<u32> {
    let mut word = word;
    for _ in 0..k {
        if word == 0 {
            return None;
        }
        word &= word - 1;
    }
    (word != 0).then(|| word.trailing_zeros())
}

/// Read 64 bits starting at bit `pos`, merging two adjacent words when `pos`
/// is not word aligned. Bits past the end of `words` read as zero.
#[inline]
pub fn word_at(words: &[Word], pos: usize) -> Word {
    let key = word_key(pos);
    let bit = word_bit(pos);
    let lo = words.get(key).copied().unwrap_or(0);
    if bit == 0 {
        return lo;
    }
    let hi = words.get(key + 1).copied().unwrap_or(0);
    (lo >> bit) | (hi << (WORD_BITS as u32 - bit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_mask() {
        assert_eq!(tail_mask(0), Word::MAX);
        assert_eq!(tail_mask(1), 0b1);
        assert_eq!(tail_mask(5), 0b11111);
        assert_eq!(tail_mask(64), Word::MAX);
        assert_eq!(tail_mask(70), 0b111111);

        let mut words = [Word::MAX; 2];
        apply_tail_mask(&mut words, 70);
        assert_eq!(words, [Word::MAX, 0b111111]);
    }

    #[test]
    fn test_span_mask() {
        assert_eq!(span_mask(0, 1), 0b1);
        assert_eq!(span_mask(2, 5), 0b11100);
        assert_eq!(span_mask(0, 64), Word::MAX);
        assert_eq!(span_mask(63, 64), 1 << 63);
    }

    #[test]
    fn test_rank_in_word() {
        let word: Word = 0b1011_0001;
        assert_eq!(rank_in_word(word, 0), 1);
        assert_eq!(rank_in_word(word, 3), 1);
        assert_eq!(rank_in_word(word, 4), 2);
        assert_eq!(rank_in_word(word, 7), 4);
        assert_eq!(rank_in_word(word, 63), 4);
        assert_eq!(rank_in_word(Word::MAX, 63), 64);
    }

    #[test]
    fn test_select_in_word() {
        let word: Word = 0b1011_0001;
        assert_eq!(select_in_word(word, 0), Some(0));
        assert_eq!(select_in_word(word, 1), Some(4));
        assert_eq!(select_in_word(word, 2), Some(5));
        assert_eq!(select_in_word(word, 3), Some(7));
        assert_eq!(select_in_word(word, 4), None);
        assert_eq!(select_in_word(0, 0), None);
        assert_eq!(select_in_word(1 << 63, 0), Some(63));
    }

    #[test]
    fn test_word_at() {
        let words = [0xFFFF_0000_0000_0000, 0x0000_0000_0000_00FF];
        assert_eq!(word_at(&words, 0), words[0]);
        assert_eq!(word_at(&words, 64), words[1]);
        assert_eq!(word_at(&words, 48), 0x0000_0000_00FF_FFFF);
        // reads past the end are zero filled
        assert_eq!(word_at(&words, 120), 0);
        assert_eq!(word_at(&words, 128), 0);
    }
}
