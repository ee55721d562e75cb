//! Reference strategies. They exist to drive the engine, not to play well.

pub mod aggressive;
pub mod balanced;
pub mod defensive;
pub mod evolving;
pub mod wall;

pub use aggressive::Aggressive;
pub use balanced::Balanced;
pub use defensive::Defensive;
pub use evolving::Evolving;
pub use wall::Wall;

use crate::board::Board;
use crate::combat::{max_attackers, max_defenders};
use crate::player::PlayerId;
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

pub const DEFAULT_THREAT_RANGE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Aggressive,
    Defensive,
    Balanced,
    Evolving,
    Wall,
}

impl StrategyKind {
    pub fn build(self, threat_range: u32, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Aggressive => Box::new(Aggressive::new(threat_range)),
            StrategyKind::Defensive => Box::new(Defensive::new(threat_range)),
            StrategyKind::Balanced => Box::new(Balanced::new()),
            StrategyKind::Evolving => Box::new(Evolving::new(threat_range, seed)),
            StrategyKind::Wall => Box::new(Wall::new()),
        }
    }
}

/// Where a player is in the placement life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The player owns nothing yet.
    First,
    /// Some territories are still unowned.
    Claiming,
    /// Every territory has an owner.
    Reinforcing,
}

pub(crate) fn placement_stage(board: &Board, me: PlayerId) -> Placement {
    if board.count_owned(Some(me)) == 0 {
        Placement::First
    } else if board.count_owned(None) > 0 {
        Placement::Claiming
    } else {
        Placement::Reinforcing
    }
}

pub(crate) fn unowned_with_degree(board: &Board, degree: usize) -> Vec<TerritoryId> {
    board
        .with_degree(degree)
        .into_iter()
        .filter(|&t| board.owner(t).is_none())
        .collect()
}

/// Unowned territories next to something `me` already holds.
pub(crate) fn unowned_frontier(board: &Board, me: PlayerId) -> Vec<TerritoryId> {
    board
        .owned_by(Some(me))
        .into_iter()
        .flat_map(|t| board.unowned_neighbours(t))
        .unique()
        .collect()
}

/// Owned territories with at least one enemy neighbour, or every owned
/// territory when none border an enemy.
pub(crate) fn border_or_all(board: &Board, me: PlayerId) -> Vec<TerritoryId> {
    let owned = board.owned_by(Some(me));
    let border: Vec<_> = owned
        .iter()
        .copied()
        .filter(|&t| board.borders_enemy(t, me))
        .collect();
    if border.is_empty() {
        owned
    } else {
        border
    }
}

/// First candidate with the highest score.
pub(crate) fn first_max_by<F>(candidates: &[TerritoryId], score: F) -> Option<TerritoryId>
where
    F: Fn(TerritoryId) -> u64,
{
    candidates.iter().copied().min_by_key(|&t| Reverse(score(t)))
}

/// First candidate with the lowest score.
pub(crate) fn first_min_by<F>(candidates: &[TerritoryId], score: F) -> Option<TerritoryId>
where
    F: Fn(TerritoryId) -> u64,
{
    candidates.iter().copied().min_by_key(|&t| score(t))
}

/// Every strategy here defends with as many dice as allowed.
pub(crate) fn full_defence(board: &Board, to: TerritoryId) -> u32 {
    max_defenders(board.units(to))
}

/// Owned territories, strongest first.
pub(crate) fn strongest_first(board: &Board, me: PlayerId) -> Vec<TerritoryId> {
    board
        .owned_by(Some(me))
        .into_iter()
        .sorted_by_key(|&t| Reverse(board.units(t)))
        .collect()
}

/// Enemy neighbours of `from`, weakest first.
pub(crate) fn weakest_targets(board: &Board, from: TerritoryId, me: PlayerId) -> Vec<TerritoryId> {
    board
        .enemy_neighbours(from, me)
        .into_iter()
        .filter(|&t| board.owner(t).is_some())
        .sorted_by_key(|&t| board.units(t))
        .collect()
}

/// Attacks outward from every owned territory, strongest first. Captured
/// territories join the list of launch points. `press` decides, before each
/// exchange, whether to keep attacking `to` from `from`; a line is also
/// abandoned when an attack is rejected or `stop_after` says so.
pub(crate) fn attack_sweep<P, S>(
    ctx: &mut TurnContext<'_>,
    occupier: &mut dyn Strategy,
    press: P,
    stop_after: S,
) where
    P: Fn(&Board, TerritoryId, TerritoryId) -> bool,
    S: Fn(&crate::combat::AttackReport) -> bool,
{
    let me = ctx.me();
    let mut launch_points = strongest_first(ctx.board(), me);
    let mut index = 0;

    while index < launch_points.len() {
        let from = launch_points[index];
        index += 1;

        for to in weakest_targets(ctx.board(), from, me) {
            loop {
                let board = ctx.board();
                if !board.territory(from).is_some_and(|t| t.is_owned_by(me)) {
                    break;
                }
                if board.units(from) <= 1 || board.owner(to) == Some(me) || !press(board, from, to) {
                    break;
                }
                let attackers = max_attackers(board.units(from));
                match ctx.attack(occupier, from, to, attackers) {
                    Ok(report) => {
                        if report.captured() {
                            launch_points.push(to);
                        }
                        if stop_after(&report) {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    }
}

/// Moves units from the least threatened friendly neighbour of the most
/// threatened connected territory into it.
pub(crate) fn fortify_most_threatened(ctx: &mut TurnContext<'_>, range: u32) {
    let me = ctx.me();
    let board = ctx.board();
    let connected: Vec<_> = board
        .owned_by(Some(me))
        .into_iter()
        .filter(|&t| !board.friendly_neighbours(t, me).is_empty())
        .collect();
    if connected.len() < 2 {
        return;
    }

    let Some(to) = first_max_by(&connected, |t| board.unit_threat(t, range)) else {
        return;
    };
    let max_threat = board.unit_threat(to, range);
    let from = board
        .friendly_neighbours(to, me)
        .into_iter()
        .map(|t| (t, board.unit_threat(t, range)))
        .filter(|&(_, threat)| threat < max_threat)
        .min_by_key(|&(_, threat)| threat)
        .map(|(t, _)| t);

    if let Some(from) = from {
        let units = board.units(from).saturating_sub(1);
        if units > 0 {
            let _ = ctx.fortify(from, to, units);
        }
    }
}
