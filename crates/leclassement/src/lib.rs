//! leclassement - Match Scoring & Tier Classification
//!
//! *Le Classement* (The Ranking) - The recommendation engine: per-method
//! match scoring against a user's filter selection, semantic-validity rules
//! that veto incoherent suggestions regardless of score, and classification
//! of every catalog method into suggestion tiers.
//!
//! The whole crate is a pure, synchronous computation over an immutable
//! catalog and a per-request selection snapshot. It performs no I/O, holds
//! no state between calls, and is total on well-typed inputs: malformed or
//! absent attribute data degrades to "no declared constraint" instead of
//! failing.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod rules;
pub mod score;
pub mod selection;
pub mod tiers;

pub use rules::{RuleSet, SemanticValidator, Verdict};
pub use score::{score_method, MatchResult};
pub use selection::Selection;
pub use tiers::{Classification, RankedMethod, Recommender, Tier, GOOD_ALTERNATIVE_THRESHOLD};

/// Library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
