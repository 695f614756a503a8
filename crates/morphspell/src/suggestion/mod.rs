// Spelling suggestions: candidate generators, status tracking and strategy

pub mod generators;
pub mod near_miss;
pub mod status;
pub mod strategy;

pub use generators::SuggestionGenerator;
pub use near_miss::{FormSource, NearMiss};
pub use status::{Suggestion, SuggestionStatus};
pub use strategy::{DEFAULT_MAX_COST, SuggestionStrategy, strategy_for_table};
