//! NameDup - fuzzy duplicate detection for company names
//!
//! Finds probable duplicate entries in a list of free-text company names
//! despite spelling variation, word reordering, added or missing legal
//! suffixes, accents, and abbreviation.
//!
//! # Features
//! - Configurable normalization (accent folding, suffix stripping, digit removal)
//! - Four layered matching strategies with per-strategy confidence floors
//! - Greedy, order-preserving duplicate clustering
//! - Threshold presets with partial overrides, validated up front
//! - Evaluation metrics for tuning against labelled data
//!
//! # Example
//! ```
//! use namedup::{find_duplicates, MatchConfig};
//!
//! let names = vec![
//!     "Ubisoft Montréal Studio".to_string(),
//!     "Ubisoft Montreal".to_string(),
//!     "Bolt Technology".to_string(),
//!     "Bolt Technlgy".to_string(),
//!     "Valve".to_string(),
//! ];
//! let result = find_duplicates(&names, &MatchConfig::default()).unwrap();
//! assert_eq!(result.groups.len(), 2);
//! assert_eq!(result.groups[0].representative, "Ubisoft Montréal Studio");
//! ```
//!
//! Matching one name against a pool without clustering:
//! ```
//! use namedup::{find_all_matches, MatchConfig, Preset};
//!
//! let candidates = vec!["Montreal Ubisoft".to_string()];
//! let config = MatchConfig::from_preset(Preset::Balanced);
//! let matches = find_all_matches("Ubisoft Montreal", &candidates, &config).unwrap();
//! assert_eq!(matches[0].confidence, 1.0);
//! ```
//!
//! File reading, argument parsing and output rendering are deliberately out
//! of scope; callers feed raw name lists in and serialize the returned
//! values with serde however they like.

pub mod algorithms;
pub mod config;
pub mod dedup;
pub mod matcher;
pub mod metrics;

pub use config::{ConfigError, ConfigOverrides, MatchConfig, Preset};
pub use dedup::{
    find_duplicates, find_duplicates_for_company, DeduplicationResult, DuplicateGroup,
};
pub use matcher::{find_all_matches, find_best_match, Match, MatchMethod};
