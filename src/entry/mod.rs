/*!
 * Entry Module
 * Candidate notification records and renderer state types
 */

pub mod types;

pub use types::{AlertEntry, HeadsUpState, Ranking, RankingMap};
