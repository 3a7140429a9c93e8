//! Rule violation errors.

use derive_more::{Display, Error};

/// Errors returned by the turn engine.
///
/// Every variant is a local validation failure: the caller corrects the
/// request and resubmits. Nothing here is transient or retryable.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RulesError {
    /// Operation requires an initialized game.
    #[display("game has not been started")]
    NotStarted,
    /// Player count outside the supported range.
    #[display("player count must be between 1 and 6, got {count}")]
    InvalidPlayerCount {
        /// The rejected count.
        count: usize,
    },
    /// Build attempted where the rules forbid one.
    #[display("cannot build a house on cell {position}")]
    NotEligible {
        /// The cell the build targeted.
        position: usize,
    },
}
