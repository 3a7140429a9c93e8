//! Pure game rules for richman, a circular-board dice game.
//!
//! This crate contains no I/O: it models the board, the players, and the
//! turn engine that resolves dice rolls, special cells, and house building.
//! Transport concerns (sessions, HTTP) live in `richman_server`.
//!
//! # Example
//!
//! ```
//! use richman_rules::{GameState, Ruleset};
//!
//! let mut game = GameState::new(Ruleset::festival16());
//! game.initialize(2)?;
//! let roll = game.apply_roll(&[4])?;
//! assert_eq!(roll.new_position, 4);
//! # Ok::<(), richman_rules::RulesError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod engine;
mod error;
mod player;
mod state;

// Crate-level exports - Board variants
pub use board::{BuildPolicy, Cell, CellEffect, PLAYER_PALETTE, Ruleset};

// Crate-level exports - Turn engine results
pub use engine::{BuildResult, RollResult, SpecialCell};

// Crate-level exports - Errors
pub use error::RulesError;

// Crate-level exports - State types
pub use player::Player;
pub use state::GameState;
