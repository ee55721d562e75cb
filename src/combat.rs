//! Dice combat between two adjacent territories.
//!
//! One call to [`resolve_attack`] is one exchange: validate the order, ask the
//! defender how many dice to roll, roll, pair the highest dice of each side,
//! apply losses and, when the target is emptied, ask the attacker how many
//! units to move in. Either the whole exchange applies or nothing does.

use crate::board::{Board, Holding};
use crate::error::AttackError;
use crate::player::PlayerId;
use crate::strategy::Strategy;
use crate::territory::TerritoryId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub const MAX_ATTACK_DICE: u32 = 3;
pub const MAX_DEFENCE_DICE: u32 = 2;

/// Source of six-sided die rolls.
pub trait Dice {
    /// Returns a value in `1..=6`.
    fn roll(&mut self) -> u8;
}

#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: ChaCha8Rng,
}

impl RandomDice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of rolls, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<u8>) -> Self {
        Self { rolls, next: 0 }
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        if self.rolls.is_empty() {
            return 1;
        }
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOrder {
    pub attacker: PlayerId,
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub attackers: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub from: TerritoryId,
    pub to: TerritoryId,
    /// Rolls of each side, highest first.
    pub attacker_dice: Vec<u8>,
    pub defender_dice: Vec<u8>,
    pub attacker_wins: u32,
    pub defender_wins: u32,
    /// Units moved into the target when it was captured.
    pub occupied_with: Option<u32>,
    pub defender_eliminated: bool,
}

impl AttackReport {
    pub fn captured(&self) -> bool {
        self.occupied_with.is_some()
    }
}

/// The two strategies consulted during an exchange.
pub struct Combatants<'s> {
    pub attacker: &'s mut dyn Strategy,
    pub defender: &'s mut dyn Strategy,
}

/// Checks every precondition of an attack order and returns the defending player.
pub fn check_attack(board: &Board, order: &AttackOrder) -> Result<PlayerId, AttackError> {
    let from = board
        .territory(order.from)
        .ok_or(AttackError::UnknownTerritory(order.from))?;
    let to = board
        .territory(order.to)
        .ok_or(AttackError::UnknownTerritory(order.to))?;

    if !from.is_owned_by(order.attacker) {
        return Err(AttackError::NotOwner {
            territory: order.from,
            player: order.attacker,
        });
    }
    if to.is_owned_by(order.attacker) {
        return Err(AttackError::OwnTerritory { territory: order.to });
    }

    let max = max_attackers(from.units());
    if order.attackers == 0 || order.attackers > max {
        return Err(AttackError::InvalidAttackerCount {
            requested: order.attackers,
            max,
        });
    }
    if !from.is_adjacent(order.to) {
        return Err(AttackError::NotAdjacent {
            from: order.from,
            to: order.to,
        });
    }

    to.owner()
        .ok_or(AttackError::Unoccupied { territory: order.to })
}

/// Largest number of dice a territory holding `units` may attack with.
pub fn max_attackers(units: u32) -> u32 {
    units.saturating_sub(1).min(MAX_ATTACK_DICE)
}

/// Largest number of dice a territory holding `units` may defend with.
pub fn max_defenders(units: u32) -> u32 {
    units.min(MAX_DEFENCE_DICE)
}

/// Pairs both sides' dice highest against highest. Ties go to the defender.
/// Returns `(attacker_wins, defender_wins)`.
pub fn duel(attacker_dice: &[u8], defender_dice: &[u8]) -> (u32, u32) {
    let mut attack = attacker_dice.to_vec();
    let mut defend = defender_dice.to_vec();
    attack.sort_unstable_by(|a, b| b.cmp(a));
    defend.sort_unstable_by(|a, b| b.cmp(a));

    attack
        .iter()
        .zip(defend.iter())
        .fold((0, 0), |(att, def), (a, d)| {
            if a > d {
                (att + 1, def)
            } else {
                (att, def + 1)
            }
        })
}

pub fn resolve_attack(
    board: &mut Board,
    dice: &mut dyn Dice,
    order: AttackOrder,
    combatants: Combatants<'_>,
) -> Result<AttackReport, AttackError> {
    let defender = check_attack(board, &order)?;
    let AttackOrder {
        attacker,
        from,
        to,
        attackers,
    } = order;

    let from_before = board.units(from);
    let to_before = board.units(to);

    let max = max_defenders(to_before);
    let defenders = combatants.defender.defend(board, defender, from, to, attackers);
    if defenders == 0 || defenders > max {
        debug!(defender, requested = defenders, max, "defender broke the dice limit");
        return Err(AttackError::InvalidDefenderCount {
            requested: defenders,
            max,
        });
    }

    let mut attacker_dice: Vec<u8> = (0..attackers).map(|_| dice.roll()).collect();
    let mut defender_dice: Vec<u8> = (0..defenders).map(|_| dice.roll()).collect();
    attacker_dice.sort_unstable_by(|a, b| b.cmp(a));
    defender_dice.sort_unstable_by(|a, b| b.cmp(a));
    let (attacker_wins, defender_wins) = duel(&attacker_dice, &defender_dice);
    trace!(?attacker_dice, ?defender_dice, attacker_wins, defender_wins, "dice rolled");

    let from_after = from_before - defender_wins;
    let mut occupied_with = None;

    if to_before <= attacker_wins {
        // Apply the capture provisionally so the occupy decision sees the
        // post-combat board; undo everything if the answer is out of range.
        board.set_holding(from, Holding { owner: Some(attacker), units: from_after });
        board.set_holding(to, Holding { owner: Some(attacker), units: 0 });

        let requested = combatants.attacker.occupy(board, attacker, from, to);
        if requested == 0 || requested >= from_after {
            board.set_holding(from, Holding { owner: Some(attacker), units: from_before });
            board.set_holding(to, Holding { owner: Some(defender), units: to_before });
            debug!(attacker, requested, available = from_after, "occupy rejected, attack rolled back");
            return Err(AttackError::InvalidOccupy {
                requested,
                available: from_after,
            });
        }

        board.move_units(from, to, requested);
        occupied_with = Some(requested);
    } else {
        board.set_holding(from, Holding { owner: Some(attacker), units: from_after });
        board.set_holding(to, Holding { owner: Some(defender), units: to_before - attacker_wins });
    }

    let defender_eliminated = occupied_with.is_some() && board.count_owned(Some(defender)) == 0;

    debug!(
        attacker,
        defender,
        from,
        to,
        attacker_wins,
        defender_wins,
        captured = occupied_with.is_some(),
        "attack resolved"
    );

    Ok(AttackReport {
        attacker,
        defender,
        from,
        to,
        attacker_dice,
        defender_dice,
        attacker_wins,
        defender_wins,
        occupied_with,
        defender_eliminated,
    })
}
