// =============================================================================
// Bit Manipulation Helpers
// =============================================================================
//
// Word-level helpers shared by GF(2) row reduction and dense syndrome
// unpacking.

/// Count trailing zeros in a 64-bit value.
#[inline(always)]
pub fn tzcnt(x: u64) -> u32 {
    x.trailing_zeros()
}

/// Bit scan and reset: clears the lowest set bit.
///
/// Equivalent to `x & (x - 1)`.
#[inline(always)]
pub fn blsr(x: u64) -> u64 {
    x & (x.wrapping_sub(1))
}

/// Number of 64-bit words needed to hold `bits` bits.
#[inline(always)]
pub const fn words_for(bits: usize) -> usize {
    bits.div_ceil(64)
}

/// Calls `f` with the index of every set bit in a packed word array,
/// in ascending order.
#[inline]
pub fn for_each_set_bit(words: &[u64], mut f: impl FnMut(usize)) {
    for (word_idx, &word) in words.iter().enumerate() {
        let base = word_idx * 64;
        let mut w = word;
        while w != 0 {
            f(base + tzcnt(w) as usize);
            w = blsr(w);
        }
    }
}

/// Index of the lowest set bit in a packed word array.
#[inline]
pub fn lowest_set_bit(words: &[u64]) -> Option<usize> {
    words
        .iter()
        .enumerate()
        .find(|(_, &w)| w != 0)
        .map(|(i, &w)| i * 64 + tzcnt(w) as usize)
}

/// Flips bit `idx` in a packed word array.
#[inline(always)]
pub fn toggle(words: &mut [u64], idx: usize) {
    words[idx / 64] ^= 1u64 << (idx % 64);
}

/// Tests bit `idx` in a packed word array.
#[cfg(test)]
fn test(words: &[u64], idx: usize) -> bool {
    words[idx / 64] & (1u64 << (idx % 64)) != 0
}
