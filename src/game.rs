use crate::board::Board;
use crate::combat::{Dice, RandomDice};
use crate::error::GameError;
use crate::player::{Player, PlayerId};
use crate::strategy::Strategy;
use crate::turn_phase::MatchPhase;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_MAX_ROUNDS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner { player: PlayerId, rounds: u32 },
    /// The round cap was reached with more than one player still holding territory.
    Tie { rounds: u32, survivors: Vec<PlayerId> },
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Winner { player, .. } => Some(*player),
            MatchOutcome::Tie { .. } => None,
        }
    }

    pub fn rounds(&self) -> u32 {
        match self {
            MatchOutcome::Winner { rounds, .. } | MatchOutcome::Tie { rounds, .. } => *rounds,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, MatchOutcome::Tie { .. })
    }
}

/// Counters kept by the engine across every `run_game` call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchStats {
    pub matches: u64,
    pub total_rounds: u64,
    pub min_rounds: Option<u32>,
    pub max_rounds: u32,
    pub ties: u64,
}

impl MatchStats {
    pub fn record(&mut self, outcome: &MatchOutcome) {
        let rounds = outcome.rounds();
        self.matches += 1;
        self.total_rounds += u64::from(rounds);
        self.min_rounds = Some(self.min_rounds.map_or(rounds, |min| min.min(rounds)));
        self.max_rounds = self.max_rounds.max(rounds);
        if outcome.is_tie() {
            self.ties += 1;
        }
    }

    pub fn average_rounds(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.matches as f64
    }

    pub fn merge(&mut self, other: &MatchStats) {
        self.matches += other.matches;
        self.total_rounds += other.total_rounds;
        self.min_rounds = match (self.min_rounds, other.min_rounds) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_rounds = self.max_rounds.max(other.max_rounds);
        self.ties += other.ties;
    }
}

/// The match engine. One `Game` owns one board and its seated strategies and
/// can run any number of matches on them; the board is restored to its
/// post-setup snapshot before each one.
pub struct Game {
    pub board: Board,
    pub players: Vec<Player>,
    pub(crate) strategies: Vec<Box<dyn Strategy>>,
    pub(crate) dice: Box<dyn Dice>,
    pub max_rounds: u32,
    pub starting_units: Option<u32>,
    pub phase: MatchPhase,
    pub round: u32,
    pub stats: MatchStats,
}

impl Game {
    /// Takes a finished map. If it carries no snapshot yet, its current state
    /// becomes the post-setup state.
    pub fn new(mut board: Board) -> Self {
        if !board.has_snapshot() {
            board.capture_snapshot();
        }
        Self {
            board,
            players: Vec::new(),
            strategies: Vec::new(),
            dice: Box::new(RandomDice::from_entropy()),
            max_rounds: DEFAULT_MAX_ROUNDS,
            starting_units: None,
            phase: MatchPhase::Setup,
            round: 0,
            stats: MatchStats::default(),
        }
    }

    pub fn with_dice<D: Dice + 'static>(mut self, dice: D) -> Self {
        self.dice = Box::new(dice);
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_starting_units(mut self, units: u32) -> Self {
        self.starting_units = Some(units);
        self
    }

    pub fn add_player(&mut self, name: &str, strategy: Box<dyn Strategy>) -> PlayerId {
        let id = self.players.len();
        self.players.push(Player::new(id, name));
        self.strategies.push(strategy);
        id
    }

    pub fn strategy_name(&self, player: PlayerId) -> Option<&str> {
        self.strategies.get(player).map(|s| s.name())
    }

    /// Players that still own at least one territory.
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .map(|p| p.id)
            .filter(|&id| self.board.count_owned(Some(id)) > 0)
            .collect()
    }

    /// Plays one full match: setup, rounds until one player is left or the
    /// round cap is hit, then bookkeeping.
    pub fn run_game(&mut self) -> Result<MatchOutcome, GameError> {
        if self.players.len() < 2 {
            return Err(GameError::TooFewPlayers(self.players.len()));
        }
        self.board.restore()?;
        self.round = 0;

        for (player, strategy) in self.players.iter().zip(self.strategies.iter_mut()) {
            strategy.on_match_start(player.id, &player.stats);
        }

        self.phase = MatchPhase::Setup;
        self.run_setup();

        let outcome = loop {
            let active = self.active_players();
            if active.len() <= 1 {
                match active.first() {
                    Some(&player) => {
                        break MatchOutcome::Winner {
                            player,
                            rounds: self.round,
                        }
                    }
                    None => {
                        break MatchOutcome::Tie {
                            rounds: self.round,
                            survivors: active,
                        }
                    }
                }
            }
            if self.round >= self.max_rounds {
                break MatchOutcome::Tie {
                    rounds: self.round,
                    survivors: active,
                };
            }

            self.round += 1;
            self.play_round();
        };

        self.finish(&outcome);
        Ok(outcome)
    }

    fn finish(&mut self, outcome: &MatchOutcome) {
        self.stats.record(outcome);
        let active = self.active_players();
        for player in &mut self.players {
            match outcome {
                MatchOutcome::Winner { player: winner, .. } if *winner == player.id => {
                    player.stats.games_won += 1;
                }
                MatchOutcome::Tie { .. } if active.contains(&player.id) => {
                    player.stats.games_tied += 1;
                }
                _ => player.stats.games_lost += 1,
            }
        }

        match outcome {
            MatchOutcome::Winner { player, rounds } => info!(
                winner = %self.players[*player].name,
                rounds,
                "match finished"
            ),
            MatchOutcome::Tie { rounds, survivors } => info!(
                rounds,
                survivors = survivors.len(),
                "match ended in a tie"
            ),
        }
        self.phase = MatchPhase::Terminal(outcome.clone());
    }
}
