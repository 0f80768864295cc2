//! Ratcliff/Obershelp similarity over grapheme clusters

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Longest common block `(start_a, start_b, len)` within the given windows
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[&str],
    b_index: &HashMap<&str, Vec<usize>>,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (a_lo, b_lo, 0);
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, grapheme) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_lengths = HashMap::new();
        if let Some(positions) = b_index.get(grapheme) {
            for &j in positions.iter().filter(|&&j| j >= b_lo) {
                if j >= b_hi {
                    break;
                }
                let len = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_lengths.insert(j, len);
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        run_lengths = next_lengths;
    }
    best
}

/// Total length of all matching blocks between `a` and `b`
fn matched_len(a: &[&str], b: &[&str]) -> usize {
    let mut b_index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (j, &grapheme) in b.iter().enumerate() {
        b_index.entry(grapheme).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![((0, a.len()), (0, b.len()))];
    while let Some(((a_lo, a_hi), (b_lo, b_hi))) = pending.pop() {
        let (i, j, len) = longest_match(a, &b_index, (a_lo, a_hi), (b_lo, b_hi));
        if len == 0 {
            continue;
        }
        total += len;
        if a_lo < i && b_lo < j {
            pending.push(((a_lo, i), (b_lo, j)));
        }
        if i + len < a_hi && j + len < b_hi {
            pending.push(((i + len, a_hi), (j + len, b_hi)));
        }
    }
    total
}

/// Similarity ratio `2 * M / T` in `[0.0, 1.0]`
///
/// `M` is the number of matched grapheme clusters and `T` the total in both
/// strings; two empty strings are identical.
///
/// ```
/// use utilkit::text::similarity;
///
/// assert_eq!(similarity("abcd", "bcde"), 0.75);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<&str> = a.graphemes(true).collect();
    let b: Vec<&str> = b.graphemes(true).collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}
