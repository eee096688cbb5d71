//! Name normalization pipeline
//!
//! Produces the canonical comparable form of a raw company name. The step
//! order is part of the contract: suffixes are stripped only after
//! punctuation and digits are gone, so "Studio!" still matches the suffix
//! vocabulary as the whole token "studio".

use ahash::AHashSet;
use once_cell::sync::Lazy;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::MatchConfig;

/// Business, legal and industry suffix words removed during normalization.
///
/// Matched as whole tokens only, never as substrings, so compound words
/// like "Incorporation Station" are left alone.
const BUSINESS_SUFFIXES: &[&str] = &[
    // Legal forms
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "llc",
    "ltd",
    "limited",
    "plc",
    "gmbh",
    "ag",
    "sa",
    "sarl",
    "sas",
    "srl",
    "spa",
    "bv",
    "nv",
    "ab",
    "oy",
    "kk",
    "pty",
    "pte",
    "pvt",
    "lp",
    "llp",
    "se",
    "kg",
    // Corporate structure
    "holding",
    "holdings",
    "group",
    "ventures",
    "partners",
    "enterprises",
    // Industry tails common in game/software company names
    "studio",
    "studios",
    "entertainment",
    "interactive",
    "games",
    "gaming",
    "software",
    "digital",
    "media",
    "labs",
    "agency",
    "productions",
    "publishing",
    "solutions",
    "systems",
    "international",
    "worldwide",
    "global",
];

static SUFFIX_SET: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| BUSINESS_SUFFIXES.iter().copied().collect());

/// Whether a normalized token is a business/legal/industry suffix word.
#[must_use]
pub fn is_business_suffix(token: &str) -> bool {
    SUFFIX_SET.contains(token)
}

/// Normalize a raw name into its canonical comparable form.
///
/// Steps, in fixed order:
/// 1. lowercase and trim
/// 2. if `handle_accents`: NFD decompose and drop combining marks (é→e, ñ→n)
/// 3. if `remove_numbers`: drop digit runs
/// 4. map every non-alphanumeric, non-space character to a space, then
///    collapse whitespace runs and trim
/// 5. if `remove_suffixes`: drop whole tokens found in the suffix vocabulary
///
/// The result is a stable fixed point: normalizing twice yields the same
/// string as normalizing once.
///
/// # Example
/// ```
/// use namedup::algorithms::normalize::normalize;
/// use namedup::MatchConfig;
///
/// let config = MatchConfig::default();
/// assert_eq!(normalize("Ubisoft Montréal Studio!", &config), "ubisoft montreal");
/// assert_eq!(normalize("  O'Reilly  Media, Inc. ", &config), "o reilly");
/// ```
#[must_use]
pub fn normalize(raw: &str, config: &MatchConfig) -> String {
    let mut text = raw.trim().to_lowercase();

    if config.handle_accents {
        text = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    }

    if config.remove_numbers {
        text.retain(|c| !c.is_numeric());
    }

    let spaced: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut tokens: Vec<&str> = spaced.split_whitespace().collect();

    if config.remove_suffixes {
        tokens.retain(|t| !is_business_suffix(t));
    }

    tokens.join(" ")
}
