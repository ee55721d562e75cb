use crate::error::PlaceError;
use crate::game::{Game, MatchOutcome};
use crate::player::PlayerId;
use crate::strategy::{Opponents, TurnContext};
use crate::territory::TerritoryId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum MatchPhase {
    Setup,
    Reinforcing(PlayerId),
    Acting(PlayerId),
    Terminal(MatchOutcome),
}

/// Units each player places before the first round.
pub fn starting_units(num_players: usize) -> u32 {
    match num_players {
        0 | 1 => 0,
        2 => 40,
        3 => 35,
        4 => 30,
        5 => 25,
        _ => 20, // 6 or more players
    }
}

/// Units granted at the start of a player's turn.
pub fn reinforcements(territories_owned: usize) -> u32 {
    u32::try_from(territories_owned / 3).unwrap_or(u32::MAX)
}

impl Game {
    /// Every player places one unit at a time, in seat order, until each has
    /// placed its starting pool.
    pub(crate) fn run_setup(&mut self) {
        let pool = self
            .starting_units
            .unwrap_or_else(|| starting_units(self.players.len()));
        for _ in 0..pool {
            for player in 0..self.players.len() {
                let _ = self.place_one(player);
            }
        }
        debug!(pool, players = self.players.len(), "setup complete");
    }

    /// Asks `player` for one placement. A failed placement still uses up the unit.
    pub(crate) fn place_one(&mut self, player: PlayerId) -> Result<TerritoryId, PlaceError> {
        let choice = match self.strategies.get_mut(player) {
            Some(strategy) => strategy.place(&self.board, player),
            None => None,
        };
        let result = match choice {
            Some(territory) => self.board.place_unit(territory, player).map(|_| territory),
            None => Err(PlaceError::NoTerritoryChosen),
        };
        if let Err(err) = &result {
            if let Some(p) = self.players.get_mut(player) {
                p.stats.placements_rejected += 1;
            }
            match err {
                PlaceError::NoTerritoryChosen => warn!(player, "strategy chose no territory to place on"),
                _ => debug!(player, %err, "placement rejected"),
            }
        }
        result
    }

    /// One round: each player still on the board reinforces, then acts.
    pub(crate) fn play_round(&mut self) {
        for player in 0..self.players.len() {
            let owned = self.board.count_owned(Some(player));
            if owned == 0 {
                continue;
            }

            self.phase = MatchPhase::Reinforcing(player);
            for _ in 0..reinforcements(owned) {
                let _ = self.place_one(player);
            }

            self.phase = MatchPhase::Acting(player);
            self.take_turn(player);
            self.players[player].stats.rounds_survived += 1;
        }
    }

    fn take_turn(&mut self, player: PlayerId) {
        let Some((own, opponents)) = Opponents::split(&mut self.strategies, player) else {
            return;
        };
        let mut ctx = TurnContext::new(
            &mut self.board,
            &mut self.players,
            opponents,
            &mut *self.dice,
            player,
            self.round,
        );
        own.turn(&mut ctx);
    }
}
