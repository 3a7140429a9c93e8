//! Per-player bookkeeping: position, visit history, houses.

use crate::board::PLAYER_PALETTE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A player on the board.
///
/// `id` doubles as the player's index in the game's turn order and as the
/// display rank. `color` is cosmetic and consulted by no rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Index into the game's player list, stable for the game's duration.
    pub id: usize,
    /// Current cell, always in `[0, board_size)`.
    pub position: usize,
    /// Cells occupied at least once, in first-visit order. Membership is
    /// what the rules consult; the order is kept for display. Always
    /// contains the start cell 0.
    pub visited_cells: Vec<usize>,
    /// Houses built by this player, cell position to count.
    pub houses: BTreeMap<usize, u32>,
    /// Set when landing on a rest cell; consumed only by an explicit
    /// clear-skip call, never by turn advance.
    pub skip_next_turn: bool,
    /// Display color from the fixed palette.
    pub color: String,
}

impl Player {
    /// Creates a fresh player at the start cell.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            position: 0,
            visited_cells: vec![0],
            houses: BTreeMap::new(),
            skip_next_turn: false,
            color: PLAYER_PALETTE[id % PLAYER_PALETTE.len()].to_string(),
        }
    }

    /// Whether this player has ever occupied `position`.
    pub fn has_visited(&self, position: usize) -> bool {
        self.visited_cells.contains(&position)
    }

    /// Records a first visit to `position`; revisits are not duplicated.
    pub fn record_visit(&mut self, position: usize) {
        if !self.has_visited(position) {
            self.visited_cells.push(position);
        }
    }

    /// Number of houses this player has built on `position`.
    pub fn house_count(&self, position: usize) -> u32 {
        self.houses.get(&position).copied().unwrap_or(0)
    }

    /// Adds one house on `position`, returning the new count.
    pub fn add_house(&mut self, position: usize) -> u32 {
        let count = self.houses.entry(position).or_insert(0);
        *count += 1;
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_at_origin() {
        let player = Player::new(0);
        assert_eq!(player.position, 0);
        assert_eq!(player.visited_cells, vec![0]);
        assert!(player.houses.is_empty());
        assert!(!player.skip_next_turn);
        assert_eq!(player.color, PLAYER_PALETTE[0]);
    }

    #[test]
    fn revisits_are_not_duplicated() {
        let mut player = Player::new(0);
        player.record_visit(5);
        player.record_visit(3);
        player.record_visit(5);
        assert_eq!(player.visited_cells, vec![0, 5, 3]);
    }

    #[test]
    fn house_counts_accumulate_per_cell() {
        let mut player = Player::new(1);
        assert_eq!(player.add_house(5), 1);
        assert_eq!(player.add_house(5), 2);
        assert_eq!(player.add_house(9), 1);
        assert_eq!(player.house_count(5), 2);
        assert_eq!(player.house_count(0), 0);
    }

    #[test]
    fn palette_assignment_wraps() {
        assert_eq!(Player::new(6).color, Player::new(0).color);
        assert_ne!(Player::new(1).color, Player::new(0).color);
    }
}
