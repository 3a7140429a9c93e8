//! The per-session mutable game record.

use crate::board::Ruleset;
use crate::player::Player;

/// Complete state of one game.
///
/// Created empty and not started; populated by
/// [`initialize`](GameState::initialize), which fully replaces the player
/// list every time it is called. All other engine operations require
/// `started` to be true.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) ruleset: Ruleset,
    pub(crate) players: Vec<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) started: bool,
    /// Houses built since the last turn advance; the engine allows one.
    pub(crate) builds_this_turn: u32,
}

impl GameState {
    /// Creates an empty, not-started game on the given board.
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            players: Vec::new(),
            current_player_index: 0,
            started: false,
            builds_this_turn: 0,
        }
    }

    /// The board variant this game is played on.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Whether the game has been initialized.
    pub fn started(&self) -> bool {
        self.started
    }

    /// The player whose turn it is, if the game has any players.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }
}
