#![deny(unsafe_code)]

//! Field recommendation engine.
//!
//! Given a column name from an uploaded inventory (and optionally a sample of
//! its values), recommend the data-dictionary entity and field it most likely
//! corresponds to. Ranking is a pure computation over an immutable
//! [`MatchCatalog`]; degenerate input never fails, it simply yields
//! [`MatchResult::none`](dcm_model::MatchResult::none).

pub mod catalog;
pub mod config;
pub mod engine;
pub mod score;
pub mod synonyms;
pub mod tokens;

pub use catalog::{MatchCatalog, MatchTarget, TargetKind};
pub use config::RankerConfig;
pub use engine::{Ranker, ScoreComponent, ScoredTarget, rank, rank_with_config};
pub use score::{similarity, singularize};
pub use synonyms::{SynonymEntry, SynonymTable};
pub use tokens::{Hints, extract_hints};
