//! InDel (insertion/deletion) edit distance
//!
//! The InDel distance is Levenshtein with substitutions costing 2, which
//! reduces to `len(a) + len(b) - 2 * LCS(a, b)`. Normalizing it by the sum
//! of both lengths gives the classic two-sided similarity ratio.
//!
//! Optimized with:
//! - Bit-parallel LCS (Hyyrö) for patterns up to 64 chars
//! - Two-row DP fallback for longer patterns
//! - Unicode-aware character handling

use super::Similarity;
use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum pattern length for the bit-parallel LCS (64 bits per block)
const LCS_BLOCK_SIZE: usize = 64;

/// InDel similarity calculator on a 0-100 scale.
///
/// Stateless calculator - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indel;

impl Indel {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for Indel {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        indel_similarity(a, b)
    }

    fn name(&self) -> &'static str {
        "indel"
    }
}

/// Bit-parallel LCS length for patterns up to 64 characters.
///
/// Every pattern position owns one bit of `s`. A zero bit marks a position
/// that is part of the current common subsequence, so the answer is the
/// number of cleared bits once the text has been consumed.
///
/// Based on: Hyyrö, H. (2004). "Bit-parallel LCS-length computation revisited"
#[inline]
fn lcs_64(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 || text.is_empty() {
        return 0;
    }
    if m > LCS_BLOCK_SIZE {
        return lcs_dp(pattern, text);
    }

    // For each character c, peq[c] has bit i set if pattern[i] == c
    let mut peq: AHashMap<char, u64> = AHashMap::with_capacity(m.min(26));
    for (i, &c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }

    let mut s: u64 = !0u64;
    for tc in text {
        let matches = peq.get(tc).copied().unwrap_or(0);
        let u = s & matches;
        s = s.wrapping_add(u) | (s - u);
    }

    let mask = if m == LCS_BLOCK_SIZE {
        !0u64
    } else {
        (1u64 << m) - 1
    };
    (!s & mask).count_ones() as usize
}

/// Two-row DP LCS for char slices (fallback for long strings)
#[inline]
fn lcs_dp(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Keep the shorter string on the column axis
    let (cols, rows) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let n = cols.len();

    let mut prev: SmallVec<[usize; 64]> = SmallVec::from_elem(0, n + 1);
    let mut curr: SmallVec<[usize; 64]> = SmallVec::from_elem(0, n + 1);

    for &rc in rows {
        curr[0] = 0;
        for j in 1..=n {
            curr[j] = if rc == cols[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Length of the longest common subsequence of two strings.
#[must_use]
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    lcs_with_chars(&a_chars, &b_chars)
}

fn lcs_with_chars(a: &[char], b: &[char]) -> usize {
    // The bit-parallel path wants the pattern to fit in one word
    if a.len() <= LCS_BLOCK_SIZE {
        lcs_64(a, b)
    } else if b.len() <= LCS_BLOCK_SIZE {
        lcs_64(b, a)
    } else {
        lcs_dp(a, b)
    }
}

/// InDel distance: the minimum number of insertions and deletions turning
/// `a` into `b`.
///
/// # Examples
/// ```
/// use bp_dupcheck::algorithms::indel::indel_distance;
/// assert_eq!(indel_distance("kitten", "sitting"), 5);
/// ```
#[must_use]
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    a_chars.len() + b_chars.len() - 2 * lcs_with_chars(&a_chars, &b_chars)
}

/// Normalized InDel similarity on a 0-100 scale:
/// `100 * (1 - indel_distance / (len(a) + len(b)))`.
///
/// Two empty strings are identical and score 100.
///
/// # Examples
/// ```
/// use bp_dupcheck::algorithms::indel::indel_similarity;
/// assert_eq!(indel_similarity("abc", "abc"), 100.0);
/// assert_eq!(indel_similarity("abc", "xyz"), 0.0);
/// ```
#[must_use]
pub fn indel_similarity(a: &str, b: &str) -> f64 {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 100.0;
    }
    let dist = total - 2 * lcs_with_chars(&a_chars, &b_chars);
    100.0 * (1.0 - dist as f64 / total as f64)
}
