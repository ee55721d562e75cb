use super::{
    attack_sweep, first_max_by, first_min_by, fortify_most_threatened, full_defence,
    placement_stage, unowned_frontier, unowned_with_degree, Placement,
};
use crate::board::Board;
use crate::player::PlayerId;
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;

/// Starts in quiet corners, only attacks territories it outnumbers and splits
/// units after a capture according to where the threat is.
#[derive(Debug, Clone)]
pub struct Defensive {
    pub range: u32,
}

impl Defensive {
    pub fn new(range: u32) -> Self {
        Self { range }
    }
}

/// Unowned territory with the lowest degree, least surrounded first.
fn most_sheltered_unowned(board: &Board, me: PlayerId, range: u32) -> Option<TerritoryId> {
    (1..=board.max_degree()).find_map(|degree| {
        let candidates = unowned_with_degree(board, degree);
        first_min_by(&candidates, |t| board.adjacency_threat_for(t, range, Some(me)))
    })
}

pub(crate) fn place(board: &Board, me: PlayerId, range: u32) -> Option<TerritoryId> {
    match placement_stage(board, me) {
        Placement::First => most_sheltered_unowned(board, me, range).or_else(|| board.unowned().first().copied()),
        Placement::Claiming => {
            let frontier = unowned_frontier(board, me);
            first_min_by(&frontier, |t| board.adjacency_threat_for(t, range, Some(me)))
                .or_else(|| most_sheltered_unowned(board, me, range))
                .or_else(|| board.unowned().first().copied())
        }
        Placement::Reinforcing => {
            let owned = board.owned_by(Some(me));
            first_max_by(&owned, |t| board.unit_threat(t, range))
        }
    }
}

/// Splits the units of `from` between the two territories in proportion to
/// the threat each one faces.
pub(crate) fn occupy(board: &Board, from: TerritoryId, to: TerritoryId, range: u32) -> u32 {
    let units = board.units(from);
    let from_threat = board.unit_threat(from, range);
    if from_threat == 0 {
        return units.saturating_sub(1);
    }

    let ratio = board.unit_threat(to, range) as f64 / from_threat as f64;
    let to_send = (ratio * (f64::from(units) / (ratio + 1.0))).floor() as u32;
    to_send.clamp(1, units.saturating_sub(1).max(1))
}

pub(crate) fn play_turn(ctx: &mut TurnContext<'_>, occupier: &mut dyn Strategy, range: u32) {
    attack_sweep(
        ctx,
        occupier,
        |board, from, to| board.units(to) <= board.units(from),
        |_| false,
    );
    fortify_most_threatened(ctx, range);
}

impl Strategy for Defensive {
    fn name(&self) -> &str {
        "defensive"
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

    fn occupy(&mut self, board: &Board, _me: PlayerId, from: TerritoryId, to: TerritoryId) -> u32 {
        occupy(board, from, to, self.range)
    }
}
