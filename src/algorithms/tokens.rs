//! Token-set comparison utilities
//!
//! Tokens are the whitespace-delimited words of a normalized form, held as
//! a sorted, deduplicated list so word order never affects set comparisons
//! and merge walks stay deterministic.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Geographic and regional terms used to soften token-set differences.
///
/// A pair of names whose token sets differ only by these words is usually
/// the same company labelled per site ("Ubisoft Montreal" / "Ubisoft
/// Toronto" / "Ubisoft"), so the token-match strategy grants such pairs a
/// small confidence boost. Matched as whole tokens only.
const GEOGRAPHIC_TERMS: &[&str] = &[
    // Country and region codes
    "us", "usa", "uk", "eu", "uae", "emea", "apac", "latam", "anz",
    // Regions
    "america", "americas", "american", "europe", "european", "asia", "asian",
    "pacific", "nordic", "benelux", "north", "south", "east", "west",
    // Countries
    "canada", "canadian", "france", "french", "germany", "german", "japan",
    "japanese", "china", "chinese", "india", "indian", "korea", "korean",
    "australia", "brazil", "mexico", "spain", "italy", "poland", "sweden",
    "norway", "denmark", "finland", "netherlands", "belgium", "austria",
    "switzerland", "ireland", "scotland", "england", "portugal", "turkey",
    "ukraine", "singapore",
    // Cities
    "montreal", "toronto", "vancouver", "quebec", "london", "paris", "berlin",
    "munich", "hamburg", "frankfurt", "madrid", "barcelona", "milan", "rome",
    "amsterdam", "stockholm", "copenhagen", "helsinki", "oslo", "warsaw",
    "prague", "vienna", "zurich", "dublin", "lisbon", "tokyo", "osaka",
    "kyoto", "seoul", "shanghai", "beijing", "shenzhen", "bangalore",
    "mumbai", "sydney", "melbourne", "auckland", "york", "angeles",
    "francisco", "seattle", "austin", "boston", "chicago", "dallas",
    "denver", "miami", "atlanta",
];

static GEO_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| GEOGRAPHIC_TERMS.iter().copied().collect());

/// Whether a normalized token names a country, city, region or region code.
#[must_use]
pub fn is_geographic_term(token: &str) -> bool {
    GEO_SET.contains(token)
}

/// Split a normalized form into its sorted, deduplicated tokens.
///
/// # Example
/// ```
/// use namedup::algorithms::tokens::token_set;
///
/// assert_eq!(token_set("montreal ubisoft montreal"), vec!["montreal", "ubisoft"]);
/// assert!(token_set("").is_empty());
/// ```
#[must_use]
pub fn token_set(normalized: &str) -> Vec<String> {
    let mut tokens: Vec<String> = normalized.split_whitespace().map(str::to_owned).collect();
    tokens.sort_unstable();
    tokens.dedup();
    tokens
}

/// Jaccard index of two sorted token sets: `|a ∩ b| / |a ∪ b|`.
///
/// Two empty sets yield 0.0, not NaN, so an empty-vs-empty pair is never
/// promoted to a match by the token strategy.
#[must_use]
pub fn token_overlap(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let mut intersection = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                intersection += 1;
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }

    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Jaccard overlap of two normalized strings.
///
/// Convenience wrapper over [`token_set`] and [`token_overlap`].
///
/// # Example
/// ```
/// use namedup::algorithms::tokens::token_overlap_str;
///
/// assert_eq!(token_overlap_str("ubisoft montreal", "montreal ubisoft"), 1.0);
/// assert_eq!(token_overlap_str("getir", "getir brand"), 0.5);
/// ```
#[must_use]
pub fn token_overlap_str(a: &str, b: &str) -> f64 {
    token_overlap(&token_set(a), &token_set(b))
}

/// Whether two sorted token sets differ only by geographic terms.
///
/// True iff every token in the symmetric difference belongs to the
/// geographic vocabulary; identical token sets are vacuously geographic
/// variants. Used only to boost token-match confidence, never to create a
/// match on its own.
#[must_use]
pub fn is_geographic_variant(a: &[String], b: &[String]) -> bool {
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => {
                if !is_geographic_term(&a[i]) {
                    return false;
                }
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                if !is_geographic_term(&b[j]) {
                    return false;
                }
                j += 1;
            }
        }
    }
    a[i..].iter().chain(b[j..].iter()).all(|t| is_geographic_term(t))
}
