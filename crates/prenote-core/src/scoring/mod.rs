//! Scoring of parse results and condensing them for persistence.

mod hassle;
mod record;

pub use hassle::{score_hassle, summarize, HassleScorer};
pub use record::condense;
