use super::{
    attack_sweep, border_or_all, first_max_by, fortify_most_threatened, full_defence,
    placement_stage, unowned_frontier, unowned_with_degree, Placement,
};
use crate::board::Board;
use crate::player::PlayerId;
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;

/// Claims crowded territories, attacks whatever it can reach and moves every
/// spare unit forward.
#[derive(Debug, Clone)]
pub struct Aggressive {
    pub range: u32,
}

impl Aggressive {
    pub fn new(range: u32) -> Self {
        Self { range }
    }
}

/// Unowned territory with the highest degree, most surrounded first.
fn most_exposed_unowned(board: &Board, me: PlayerId, range: u32) -> Option<TerritoryId> {
    (2..=board.max_degree()).rev().find_map(|degree| {
        let candidates = unowned_with_degree(board, degree);
        first_max_by(&candidates, |t| board.adjacency_threat_for(t, range, Some(me)))
    })
}

pub(crate) fn place(board: &Board, me: PlayerId, range: u32) -> Option<TerritoryId> {
    match placement_stage(board, me) {
        Placement::First => most_exposed_unowned(board, me, range).or_else(|| board.unowned().first().copied()),
        Placement::Claiming => {
            let frontier = unowned_frontier(board, me);
            first_max_by(&frontier, |t| board.adjacency_threat_for(t, range, Some(me)))
                .or_else(|| most_exposed_unowned(board, me, range))
                .or_else(|| board.unowned().first().copied())
        }
        Placement::Reinforcing => {
            let candidates = border_or_all(board, me);
            first_max_by(&candidates, |t| board.unit_threat(t, range))
        }
    }
}

pub(crate) fn occupy(board: &Board, from: TerritoryId) -> u32 {
    board.units(from).saturating_sub(1)
}

pub(crate) fn play_turn(ctx: &mut TurnContext<'_>, occupier: &mut dyn Strategy, range: u32) {
    attack_sweep(ctx, occupier, |_, _, _| true, |_| false);
    fortify_most_threatened(ctx, range);
}

impl Strategy for Aggressive {
    fn name(&self) -> &str {
        "aggressive"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        place(board, me, self.range)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let range = self.range;
        play_turn(ctx, self, range);
    }

    fn defend(&mut self, board: &Board, _me: PlayerId, _from: TerritoryId, to: TerritoryId, _incoming: u32) -> u32 {
        full_defence(board, to)
    }

    fn occupy(&mut self, board: &Board, _me: PlayerId, from: TerritoryId, _to: TerritoryId) -> u32 {
        occupy(board, from)
    }
}
