use super::{balanced, border_or_all, full_defence, placement_stage, Placement};
use crate::board::Board;
use crate::player::PlayerId;
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;

/// Plays like `Balanced` but only evens out the front line when reinforcing:
/// interior territories are left with whatever they have.
#[derive(Debug, Clone, Default)]
pub struct Wall;

impl Wall {
    pub fn new() -> Self {
        Self
    }
}

pub(crate) fn place(board: &Board, me: PlayerId) -> Option<TerritoryId> {
    if placement_stage(board, me) != Placement::Reinforcing {
        return balanced::place(board, me);
    }

    let border = border_or_all(board, me);
    if border.is_empty() {
        return None;
    }
    let total: u32 = border.iter().map(|&t| board.units(t)).sum();
    let average = total / u32::try_from(border.len()).unwrap_or(u32::MAX);
    border
        .iter()
        .copied()
        .find(|&t| board.units(t) < average)
        .or_else(|| border.iter().copied().min_by_key(|&t| board.units(t)))
}

impl Strategy for Wall {
    fn name(&self) -> &str {
        "wall"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        place(board, me)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        balanced::play_turn(ctx, self);
    }

    fn defend(&mut self, board: &Board, _me: PlayerId, _from: TerritoryId, to: TerritoryId, _incoming: u32) -> u32 {
        full_defence(board, to)
    }

    fn occupy(&mut self, board: &Board, _me: PlayerId, from: TerritoryId, _to: TerritoryId) -> u32 {
        balanced::occupy(board, from)
    }
}
