//! Board variants and the configurable ruleset descriptor.
//!
//! Each shipped board is a [`Ruleset`] value: cell count, dice count, the
//! special-cell table, and the house-building policy. Rule variants are
//! selected by constructing a different descriptor, never by branching
//! inside the engine.

use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Fixed display palette for player tokens, indexed modulo its length.
pub const PLAYER_PALETTE: [&str; 6] = [
    "#FF6B6B", "#4169E1", "#2ECC71", "#FFA500", "#9B59B6", "#F1C40F",
];

/// Effect attached to a board cell.
///
/// Only [`CellEffect::Rest`] and [`CellEffect::RollAgain`] carry rule
/// effects; the themed variants are labels surfaced for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellEffect {
    /// The start / finish corner.
    Start,
    /// No effect, no label.
    Plain,
    /// Themed label, no rule effect.
    TaiwanFestival,
    /// Themed label, no rule effect.
    ForeignFestival,
    /// Chance / destiny label, no rule effect.
    Chance,
    /// Landing here flags the player to skip their next turn.
    Rest,
    /// Landing here grants another roll this turn.
    RollAgain,
}

impl CellEffect {
    /// Display label for the cell, empty for plain cells.
    pub fn label(self) -> &'static str {
        match self {
            CellEffect::Start => "Start / Finish",
            CellEffect::Plain => "",
            CellEffect::TaiwanFestival => "Taiwan festival",
            CellEffect::ForeignFestival => "Foreign festival",
            CellEffect::Chance => "Chance / Destiny",
            CellEffect::Rest => "Rest one turn",
            CellEffect::RollAgain => "Roll again",
        }
    }
}

/// House-building eligibility policy.
///
/// Both observed rule revisions are preserved as selectable policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildPolicy {
    /// Build on any cell except the start cell and rest cells.
    AnyCell,
    /// Additionally requires the cell to be previously visited by the
    /// builder and to hold none of the builder's houses.
    VisitedUnbuilt,
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's effect.
    pub effect: CellEffect,
}

/// A complete board variant: size, dice, special cells, build policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruleset {
    board_size: usize,
    dice_count: usize,
    cells: Vec<Cell>,
    build_policy: BuildPolicy,
}

impl Ruleset {
    /// The 16-cell festival board: one die, build-anywhere policy.
    ///
    /// Cell table: start 0; Taiwan festival 1, 6, 9; foreign festival
    /// 3, 11, 14; chance 7, 15; rest 4, 12; roll-again 8.
    pub fn festival16() -> Self {
        use CellEffect::*;
        let effects = [
            Start,           // 0
            TaiwanFestival,  // 1
            Plain,           // 2
            ForeignFestival, // 3
            Rest,            // 4
            Plain,           // 5
            TaiwanFestival,  // 6
            Chance,          // 7
            RollAgain,       // 8
            TaiwanFestival,  // 9
            Plain,           // 10
            ForeignFestival, // 11
            Rest,            // 12
            Plain,           // 13
            ForeignFestival, // 14
            Chance,          // 15
        ];
        Self::from_effects(&effects, 1, BuildPolicy::AnyCell)
    }

    /// The 40-cell classic board: two dice, visited-and-unbuilt policy.
    pub fn classic40() -> Self {
        use CellEffect::*;
        let effects: Vec<CellEffect> = (0..40)
            .map(|pos| match pos {
                0 => Start,
                10 | 30 => Rest,
                20 => RollAgain,
                7 | 22 | 36 => Chance,
                _ => Plain,
            })
            .collect();
        Self::from_effects(&effects, 2, BuildPolicy::VisitedUnbuilt)
    }

    fn from_effects(effects: &[CellEffect], dice_count: usize, build_policy: BuildPolicy) -> Self {
        Self {
            board_size: effects.len(),
            dice_count,
            cells: effects.iter().map(|&effect| Cell { effect }).collect(),
            build_policy,
        }
    }

    /// Replaces the build policy, keeping the board otherwise unchanged.
    pub fn with_build_policy(mut self, build_policy: BuildPolicy) -> Self {
        self.build_policy = build_policy;
        self
    }

    /// Replaces the number of dice drawn per roll, keeping the board
    /// otherwise unchanged. One observed revision rolled two dice on the
    /// 16-cell board.
    pub fn with_dice_count(mut self, dice_count: usize) -> Self {
        self.dice_count = dice_count;
        self
    }

    /// Number of cells on the board.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Number of dice drawn per roll.
    pub fn dice_count(&self) -> usize {
        self.dice_count
    }

    /// The build policy in effect.
    pub fn build_policy(&self) -> BuildPolicy {
        self.build_policy
    }

    /// The full cell table.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Effect of the cell at `position`. Positions are taken modulo the
    /// board size by the engine before lookup.
    pub fn effect_at(&self, position: usize) -> CellEffect {
        self.cells[position].effect
    }

    /// Whether `player` may build a house on `position` under this
    /// ruleset's policy.
    ///
    /// The start cell and rest cells are never buildable. Under
    /// [`BuildPolicy::VisitedUnbuilt`] the cell must also have been visited
    /// before and hold none of the player's houses.
    pub fn can_build(&self, player: &Player, position: usize) -> bool {
        match self.effect_at(position) {
            CellEffect::Start | CellEffect::Rest => return false,
            _ => {}
        }
        match self.build_policy {
            BuildPolicy::AnyCell => true,
            BuildPolicy::VisitedUnbuilt => {
                player.has_visited(position) && player.house_count(position) == 0
            }
        }
    }
}
