//! The contract between the match engine and the decision makers it seats.

use crate::board::Board;
use crate::combat::{check_attack, resolve_attack, AttackOrder, AttackReport, Combatants, Dice};
use crate::error::{AttackError, FortifyError};
use crate::player::{Player, PlayerId, PlayerStats};
use crate::territory::TerritoryId;
use tracing::debug;

pub trait Strategy {
    fn name(&self) -> &str;

    /// Chooses where the next single unit goes.
    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId>;

    /// Plays the attack and fortify part of a round through `ctx`.
    fn turn(&mut self, ctx: &mut TurnContext<'_>);

    /// Number of dice to defend `to` with against `incoming` attacking dice.
    fn defend(
        &mut self,
        board: &Board,
        me: PlayerId,
        from: TerritoryId,
        to: TerritoryId,
        incoming: u32,
    ) -> u32;

    /// Number of units to move from `from` into the freshly captured `to`.
    fn occupy(&mut self, board: &Board, me: PlayerId, from: TerritoryId, to: TerritoryId) -> u32;

    /// Called before setup of every match with the player's accumulated stats.
    fn on_match_start(&mut self, _me: PlayerId, _stats: &PlayerStats) {}
}

/// Strategies of every seat except the one taking its turn.
pub(crate) struct Opponents<'a> {
    current: PlayerId,
    before: &'a mut [Box<dyn Strategy>],
    after: &'a mut [Box<dyn Strategy>],
}

impl<'a> Opponents<'a> {
    pub(crate) fn split(
        strategies: &'a mut [Box<dyn Strategy>],
        current: PlayerId,
    ) -> Option<(&'a mut Box<dyn Strategy>, Self)> {
        if current >= strategies.len() {
            return None;
        }
        let (before, rest) = strategies.split_at_mut(current);
        let (own, after) = rest.split_first_mut()?;
        Some((
            own,
            Self {
                current,
                before,
                after,
            },
        ))
    }

    fn get_mut(&mut self, player: PlayerId) -> Option<&mut Box<dyn Strategy>> {
        if player < self.current {
            self.before.get_mut(player)
        } else if player > self.current {
            self.after.get_mut(player - self.current - 1)
        } else {
            None
        }
    }
}

/// Everything a strategy may touch during its turn. `attack` and `fortify`
/// are the only ways to change the board.
pub struct TurnContext<'a> {
    board: &'a mut Board,
    players: &'a mut [Player],
    opponents: Opponents<'a>,
    dice: &'a mut dyn Dice,
    me: PlayerId,
    round: u32,
}

impl<'a> TurnContext<'a> {
    pub(crate) fn new(
        board: &'a mut Board,
        players: &'a mut [Player],
        opponents: Opponents<'a>,
        dice: &'a mut dyn Dice,
        me: PlayerId,
        round: u32,
    ) -> Self {
        Self {
            board,
            players,
            opponents,
            dice,
            me,
            round,
        }
    }

    pub fn board(&self) -> &Board {
        &*self.board
    }

    pub fn me(&self) -> PlayerId {
        self.me
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn owned(&self) -> Vec<TerritoryId> {
        self.board.owned_by(Some(self.me))
    }

    /// Attacks `to` from `from` with `attackers` dice.
    ///
    /// The acting strategy is lent out to the engine for the whole turn, so it
    /// hands itself back in as `occupier`: if the target falls, the occupy
    /// question goes to `occupier` and nowhere else. The engine does not check
    /// which strategy that is; whatever it answers is validated like any other
    /// occupy answer. The defender is looked up from the target's owner and
    /// must be seated in this match.
    pub fn attack(
        &mut self,
        occupier: &mut dyn Strategy,
        from: TerritoryId,
        to: TerritoryId,
        attackers: u32,
    ) -> Result<AttackReport, AttackError> {
        let order = AttackOrder {
            attacker: self.me,
            from,
            to,
            attackers,
        };
        let defender_id = check_attack(&*self.board, &order)?;
        let defender: &mut dyn Strategy = &mut **self
            .opponents
            .get_mut(defender_id)
            .ok_or(AttackError::UnknownDefender(defender_id))?;

        let report = resolve_attack(
            &mut *self.board,
            &mut *self.dice,
            order,
            Combatants {
                attacker: occupier,
                defender,
            },
        )?;

        if let Some(player) = self.players.get_mut(self.me) {
            player.stats.record_attack(&report);
        }
        if let Some(player) = self.players.get_mut(report.defender) {
            player.stats.record_defence(&report);
        }
        Ok(report)
    }

    /// Moves `units` between two adjacent territories the player owns,
    /// leaving at least one unit behind.
    pub fn fortify(&mut self, from: TerritoryId, to: TerritoryId, units: u32) -> Result<(), FortifyError> {
        check_fortify(&*self.board, self.me, from, to, units)?;
        self.board.move_units(from, to, units);
        debug!(player = self.me, from, to, units, "fortified");
        Ok(())
    }
}

pub fn check_fortify(
    board: &Board,
    player: PlayerId,
    from: TerritoryId,
    to: TerritoryId,
    units: u32,
) -> Result<(), FortifyError> {
    let source = board.territory(from).ok_or(FortifyError::UnknownTerritory(from))?;
    let destination = board.territory(to).ok_or(FortifyError::UnknownTerritory(to))?;

    if !source.is_owned_by(player) {
        return Err(FortifyError::NotOwner {
            territory: from,
            player,
        });
    }
    if !destination.is_owned_by(player) {
        return Err(FortifyError::DestinationNotOwned {
            territory: to,
            player,
        });
    }
    if from == to {
        return Err(FortifyError::SameTerritory(from));
    }
    if units == 0 || units >= source.units() {
        return Err(FortifyError::InvalidUnitCount {
            requested: units,
            available: source.units().saturating_sub(1),
        });
    }
    if !source.is_adjacent(to) {
        return Err(FortifyError::NotAdjacent { from, to });
    }
    Ok(())
}
