//! The turn engine: roll resolution, special cells, house building, and
//! turn order.
//!
//! Every operation takes `&mut GameState` and returns a [`RulesError`] on
//! rule violations. The engine keeps no hidden sub-state between calls:
//! the per-turn roll / build / advance choreography is the caller's
//! concern, enforced (or not) at the transport layer.

use crate::board::CellEffect;
use crate::error::RulesError;
use crate::player::Player;
use crate::state::GameState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Maximum supported player count.
pub(crate) const MAX_PLAYERS: usize = 6;

/// Special-cell effect reported by a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialCell {
    /// Rest cell: the mover must skip their next turn.
    Rest,
    /// Roll-again cell: the mover may roll once more this turn.
    RollAgain,
}

/// Outcome of one dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// Individual die values, one entry per die in the board variant.
    pub dice: Vec<u8>,
    /// Sum of the dice.
    pub total: usize,
    /// Id of the player who moved.
    pub player_id: usize,
    /// Position before the move.
    pub old_position: usize,
    /// Position after the move, `(old + total) % board_size`.
    pub new_position: usize,
    /// Whether the mover may build a house here this turn.
    pub can_build_house: bool,
    /// Whether the mover may roll again this turn.
    pub can_roll_again: bool,
    /// Effect of the landed cell, if any.
    pub special_cell: Option<SpecialCell>,
    /// Snapshot of the mover's visit history, landing included.
    pub visited_cells: Vec<usize>,
    /// Snapshot of the mover's houses.
    pub houses: BTreeMap<usize, u32>,
}

/// Outcome of building a house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    /// Id of the builder.
    pub player_id: usize,
    /// Cell the house was built on.
    pub position: usize,
    /// The builder's new house count on that cell.
    pub house_count: u32,
    /// Snapshot of the builder's houses.
    pub houses: BTreeMap<usize, u32>,
}

impl GameState {
    /// Initializes (or fully re-initializes) the game with `player_count`
    /// fresh players and marks it started.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidPlayerCount`] unless `1 <= player_count <= 6`.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, player_count: usize) -> Result<(), RulesError> {
        if player_count == 0 || player_count > MAX_PLAYERS {
            return Err(RulesError::InvalidPlayerCount {
                count: player_count,
            });
        }

        self.players = (0..player_count).map(Player::new).collect();
        self.current_player_index = 0;
        self.started = true;
        self.builds_this_turn = 0;

        info!(player_count, board_size = self.ruleset.board_size(), "game initialized");
        Ok(())
    }

    /// Rolls the board's dice for the current player and applies the move.
    ///
    /// # Errors
    ///
    /// [`RulesError::NotStarted`] if the game has not been initialized.
    #[instrument(skip(self, rng), fields(player = self.current_player_index))]
    pub fn roll_dice<R: Rng>(&mut self, rng: &mut R) -> Result<RollResult, RulesError> {
        if !self.started {
            return Err(RulesError::NotStarted);
        }

        let dice: Vec<u8> = (0..self.ruleset.dice_count())
            .map(|_| rng.gen_range(1..=6))
            .collect();
        self.apply_roll(&dice)
    }

    /// Applies a move with the given die values, exactly as
    /// [`roll_dice`](GameState::roll_dice) does after drawing them.
    ///
    /// Public for replays and deterministic tests; the values are trusted
    /// as-is and only their sum matters to movement.
    ///
    /// # Errors
    ///
    /// [`RulesError::NotStarted`] if the game has not been initialized.
    #[instrument(skip(self), fields(player = self.current_player_index))]
    pub fn apply_roll(&mut self, dice: &[u8]) -> Result<RollResult, RulesError> {
        if !self.started {
            return Err(RulesError::NotStarted);
        }

        let total: usize = dice.iter().map(|&d| d as usize).sum();
        let ruleset = &self.ruleset;
        let player = &mut self.players[self.current_player_index];

        let old_position = player.position;
        let new_position = (old_position + total) % ruleset.board_size();
        player.position = new_position;

        // Eligibility is judged before the landing is recorded: under the
        // visited-unbuilt policy a first visit does not qualify.
        let can_build_house =
            self.builds_this_turn == 0 && ruleset.can_build(player, new_position);

        player.record_visit(new_position);

        let effect = ruleset.effect_at(new_position);
        let special_cell = match effect {
            CellEffect::Rest => {
                player.skip_next_turn = true;
                Some(SpecialCell::Rest)
            }
            CellEffect::RollAgain => Some(SpecialCell::RollAgain),
            _ => None,
        };
        let can_roll_again = matches!(special_cell, Some(SpecialCell::RollAgain));

        debug!(
            ?dice,
            total,
            old_position,
            new_position,
            ?effect,
            can_build_house,
            "roll applied"
        );

        Ok(RollResult {
            dice: dice.to_vec(),
            total,
            player_id: player.id,
            old_position,
            new_position,
            can_build_house,
            can_roll_again,
            special_cell,
            visited_cells: player.visited_cells.clone(),
            houses: player.houses.clone(),
        })
    }

    /// Clears the current player's skip-turn flag. Idempotent.
    ///
    /// The engine never clears this flag on its own; rest-cell enforcement
    /// is the caller's job, consuming the flag through this call.
    ///
    /// # Errors
    ///
    /// [`RulesError::NotStarted`] if the game has not been initialized.
    #[instrument(skip(self), fields(player = self.current_player_index))]
    pub fn clear_skip(&mut self) -> Result<usize, RulesError> {
        if !self.started {
            return Err(RulesError::NotStarted);
        }

        let player = &mut self.players[self.current_player_index];
        player.skip_next_turn = false;
        debug!(player_id = player.id, "skip flag cleared");
        Ok(player.id)
    }

    /// Builds one house on the current player's cell.
    ///
    /// The engine re-validates eligibility with the same predicate
    /// [`apply_roll`](GameState::apply_roll) consulted, and additionally
    /// owns the one-house-per-turn limit: a second build before the next
    /// turn advance is rejected.
    ///
    /// # Errors
    ///
    /// [`RulesError::NotStarted`] if the game has not been initialized;
    /// [`RulesError::NotEligible`] when the rules forbid the build.
    #[instrument(skip(self), fields(player = self.current_player_index))]
    pub fn build_house(&mut self) -> Result<BuildResult, RulesError> {
        if !self.started {
            return Err(RulesError::NotStarted);
        }

        let ruleset = &self.ruleset;
        let player = &mut self.players[self.current_player_index];
        let position = player.position;

        if self.builds_this_turn > 0 || !ruleset.can_build(player, position) {
            return Err(RulesError::NotEligible { position });
        }

        let house_count = player.add_house(position);
        self.builds_this_turn += 1;

        info!(player_id = player.id, position, house_count, "house built");

        Ok(BuildResult {
            player_id: player.id,
            position,
            house_count,
            houses: player.houses.clone(),
        })
    }

    /// Advances the turn to the next player and returns the new current
    /// player index.
    ///
    /// Resets the per-turn build counter. Deliberately leaves
    /// `skip_next_turn` untouched: a flagged player stays flagged until an
    /// explicit clear-skip consumes it.
    ///
    /// # Errors
    ///
    /// [`RulesError::NotStarted`] when the game has no players.
    #[instrument(skip(self))]
    pub fn next_player(&mut self) -> Result<usize, RulesError> {
        if self.players.is_empty() {
            return Err(RulesError::NotStarted);
        }

        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        self.builds_this_turn = 0;
        debug!(current_player = self.current_player_index, "turn advanced");
        Ok(self.current_player_index)
    }
}
