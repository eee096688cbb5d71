//! Levenshtein (edit) distance implementation
//!
//! Classic single-character edits (insertion, deletion, substitution, each
//! cost 1), computed with a single-row DP over Unicode characters. A bounded
//! variant terminates early once a row minimum exceeds the threshold.

use smallvec::SmallVec;

/// Compute the Levenshtein distance between two strings.
///
/// Operates on Unicode characters, not bytes.
///
/// # Example
/// ```
/// use namedup::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("café", "cafe"), 1);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// Compute the Levenshtein distance with an optional threshold.
///
/// Returns `None` as soon as the distance provably exceeds `max_distance`,
/// which avoids finishing the DP table for hopeless pairs. Without a
/// threshold this always returns `Some`.
///
/// # Example
/// ```
/// use namedup::algorithms::levenshtein::levenshtein_bounded;
///
/// assert_eq!(levenshtein_bounded("kitten", "sitting", None), Some(3));
/// assert_eq!(levenshtein_bounded("abc", "abd", Some(2)), Some(1));
/// assert_eq!(levenshtein_bounded("abcdef", "ghijkl", Some(3)), None);
/// ```
#[must_use]
pub fn levenshtein_bounded(a: &str, b: &str, max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    match max_distance {
        None => Some(dp_distance(&a_chars, &b_chars)),
        Some(max_d) => {
            if a_chars.len().abs_diff(b_chars.len()) > max_d {
                return None;
            }
            dp_distance_bounded(&a_chars, &b_chars, max_d)
        }
    }
}

/// Normalized Levenshtein similarity (0.0 to 1.0).
///
/// Defined as `1 - distance / max(len_a, len_b)` over character counts.
/// Two empty strings are identical, so the similarity is 1.0.
///
/// # Example
/// ```
/// use namedup::algorithms::levenshtein::levenshtein_similarity;
///
/// assert!(levenshtein_similarity("bolt technology", "bolt technlgy") > 0.85);
/// assert_eq!(levenshtein_similarity("", ""), 1.0);
/// ```
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let dist = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / max_len as f64)
    }
}

/// Single-row DP over char slices. The shorter string is kept on the column
/// axis so the row buffer stays small.
fn dp_distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let width = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=width).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for j in 0..width {
            let cost = usize::from(sc != target[j]);
            let above = row[j + 1];
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[width]
}

/// Bounded single-row DP. Bails out once every cell in a row exceeds the
/// threshold, since the distance can only grow from there.
fn dp_distance_bounded(a: &[char], b: &[char], max_distance: usize) -> Option<usize> {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return (n <= max_distance).then_some(n);
    }
    if n == 0 {
        return (m <= max_distance).then_some(m);
    }

    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let width = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=width).collect();

    for (i, &sc) in source.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for j in 0..width {
            let cost = usize::from(sc != target[j]);
            let above = row[j + 1];
            let cell = (above + 1).min(row[j] + 1).min(diagonal + cost);
            row[j + 1] = cell;
            diagonal = above;
            row_min = row_min.min(cell);
        }

        if row_min > max_distance {
            return None;
        }
    }

    let dist = row[width];
    (dist <= max_distance).then_some(dist)
}
