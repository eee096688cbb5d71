//! Pure comparison primitives used by the matching strategies.
//!
//! Each submodule is a set of standalone functions with no shared state,
//! so the matcher can compose them freely.

pub mod levenshtein;
pub mod normalize;
pub mod tokens;
