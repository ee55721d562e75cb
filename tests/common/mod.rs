#![allow(dead_code)]

use risk_sim::board::Board;
use risk_sim::player::PlayerId;
use risk_sim::strategy::{Strategy, TurnContext};
use risk_sim::territory::TerritoryId;

/// Builds a board from `(a, b)` links over `n` territories named `T0`..
pub fn board_with_links(n: usize, links: &[(usize, usize)]) -> Board {
    let mut board = Board::new();
    for i in 0..n {
        board.add_territory(&format!("T{i}"));
    }
    for &(a, b) in links {
        board.add_adjacency_link(a, b).unwrap();
    }
    board
}

pub fn place_many(board: &mut Board, territory: TerritoryId, player: PlayerId, units: u32) {
    for _ in 0..units {
        board.place_unit(territory, player).unwrap();
    }
}

/// Answers combat questions with fixed numbers and never acts on its turn.
/// Places on the first unowned territory, then on the first one it owns.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub defend_with: u32,
    pub occupy_with: u32,
}

impl Scripted {
    pub fn new(defend_with: u32, occupy_with: u32) -> Self {
        Self {
            defend_with,
            occupy_with,
        }
    }
}

pub fn first_free_or_own(board: &Board, me: PlayerId) -> Option<TerritoryId> {
    board
        .unowned()
        .first()
        .copied()
        .or_else(|| board.owned_by(Some(me)).first().copied())
}

impl Strategy for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        first_free_or_own(board, me)
    }

    fn turn(&mut self, _ctx: &mut TurnContext<'_>) {}

    fn defend(&mut self, _board: &Board, _me: PlayerId, _from: TerritoryId, _to: TerritoryId, _incoming: u32) -> u32 {
        self.defend_with
    }

    fn occupy(&mut self, _board: &Board, _me: PlayerId, _from: TerritoryId, _to: TerritoryId) -> u32 {
        self.occupy_with
    }
}

/// Attacks every enemy neighbour with a single die until it either wins the
/// territory or runs out of units. Defends with one die, occupies with one unit.
#[derive(Debug, Clone, Default)]
pub struct OneDieBully;

impl Strategy for OneDieBully {
    fn name(&self) -> &str {
        "one_die_bully"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        first_free_or_own(board, me)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let me = ctx.me();
        for from in ctx.owned() {
            for to in ctx.board().enemy_neighbours(from, me) {
                while ctx.board().units(from) > 1 && ctx.board().owner(to) != Some(me) {
                    if ctx.attack(self, from, to, 1).is_err() {
                        break;
                    }
                }
            }
        }
    }

    fn defend(&mut self, _board: &Board, _me: PlayerId, _from: TerritoryId, _to: TerritoryId, _incoming: u32) -> u32 {
        1
    }

    fn occupy(&mut self, _board: &Board, _me: PlayerId, _from: TerritoryId, _to: TerritoryId) -> u32 {
        1
    }
}
