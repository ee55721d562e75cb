use super::{attack_sweep, full_defence, placement_stage, unowned_frontier, Placement};
use crate::board::Board;
use crate::player::PlayerId;
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;

/// Degrees preferred when claiming territory, best first.
const PREFERRED_DEGREES: [usize; 5] = [4, 3, 5, 2, 6];

/// Spreads units evenly and backs off an attack as soon as it costs anything.
#[derive(Debug, Clone, Default)]
pub struct Balanced;

impl Balanced {
    pub fn new() -> Self {
        Self
    }
}

fn preferred_unowned(board: &Board) -> Option<TerritoryId> {
    PREFERRED_DEGREES
        .iter()
        .find_map(|&degree| {
            board
                .with_degree(degree)
                .into_iter()
                .find(|&t| board.owner(t).is_none())
        })
        .or_else(|| board.unowned().first().copied())
}

fn average_units(board: &Board, me: PlayerId) -> u32 {
    let owned = board.count_owned(Some(me));
    if owned == 0 {
        return 0;
    }
    board.total_units(me) / u32::try_from(owned).unwrap_or(u32::MAX)
}

pub(crate) fn place(board: &Board, me: PlayerId) -> Option<TerritoryId> {
    match placement_stage(board, me) {
        Placement::First => preferred_unowned(board),
        Placement::Claiming => {
            let frontier = unowned_frontier(board, me);
            if frontier.len() == 1 {
                return frontier.first().copied();
            }
            PREFERRED_DEGREES
                .iter()
                .find_map(|&degree| {
                    frontier
                        .iter()
                        .copied()
                        .find(|&t| board.territory(t).is_some_and(|t| t.degree() == degree))
                })
                .or_else(|| frontier.first().copied())
                .or_else(|| preferred_unowned(board))
        }
        Placement::Reinforcing => {
            let owned = board.owned_by(Some(me));
            let average = average_units(board, me);
            owned
                .iter()
                .copied()
                .find(|&t| board.units(t) < average)
                .or_else(|| owned.iter().copied().min_by_key(|&t| board.units(t)))
        }
    }
}

pub(crate) fn occupy(board: &Board, from: TerritoryId) -> u32 {
    let units = board.units(from);
    units - units / 2
}

/// Tops up the first below-average territory from a friendly neighbour that
/// can spare the difference without dropping below average itself.
fn fortify_towards_average(ctx: &mut TurnContext<'_>) {
    let me = ctx.me();
    let board = ctx.board();
    let average = average_units(board, me);

    let transfer = board
        .owned_by(Some(me))
        .into_iter()
        .filter(|&t| board.units(t) < average && !board.friendly_neighbours(t, me).is_empty())
        .find_map(|to| {
            let deficit = average - board.units(to);
            board
                .friendly_neighbours(to, me)
                .into_iter()
                .find(|&from| board.units(from) >= average + deficit)
                .map(|from| (from, to, deficit))
        });

    if let Some((from, to, units)) = transfer {
        let _ = ctx.fortify(from, to, units);
    }
}

pub(crate) fn play_turn(ctx: &mut TurnContext<'_>, occupier: &mut dyn Strategy) {
    attack_sweep(ctx, occupier, |_, _, _| true, |report| report.defender_wins > 0);
    fortify_towards_average(ctx);
}

impl Strategy for Balanced {
    fn name(&self) -> &str {
        "balanced"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        place(board, me)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        play_turn(ctx, self);
    }

    fn defend(&mut self, board: &Board, _me: PlayerId, _from: TerritoryId, to: TerritoryId, _incoming: u32) -> u32 {
        full_defence(board, to)
    }

    fn occupy(&mut self, board: &Board, _me: PlayerId, from: TerritoryId, _to: TerritoryId) -> u32 {
        occupy(board, from)
    }
}
