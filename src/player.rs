use crate::combat::AttackReport;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type PlayerId = usize;

/// A seat in a match. The id doubles as the ownership token stored on territories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            stats: PlayerStats::default(),
        }
    }
}

/// Per-player counters. They accumulate across every match the player takes part in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStats {
    pub attacks: u64,
    pub territories_won: u64,
    pub territories_lost: u64,
    pub units_killed: u64,
    pub units_lost: u64,
    pub players_eliminated: u64,
    pub rounds_survived: u64,
    pub placements_rejected: u64,
    pub games_won: u64,
    pub games_lost: u64,
    pub games_tied: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCounter {
    Attacks,
    TerritoriesWon,
    TerritoriesLost,
    UnitsKilled,
    UnitsLost,
    PlayersEliminated,
    RoundsSurvived,
    PlacementsRejected,
    GamesWon,
    GamesLost,
    GamesTied,
}

impl PlayerCounter {
    pub const ALL: [PlayerCounter; 11] = [
        PlayerCounter::Attacks,
        PlayerCounter::TerritoriesWon,
        PlayerCounter::TerritoriesLost,
        PlayerCounter::UnitsKilled,
        PlayerCounter::UnitsLost,
        PlayerCounter::PlayersEliminated,
        PlayerCounter::RoundsSurvived,
        PlayerCounter::PlacementsRejected,
        PlayerCounter::GamesWon,
        PlayerCounter::GamesLost,
        PlayerCounter::GamesTied,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlayerCounter::Attacks => "attacks",
            PlayerCounter::TerritoriesWon => "territories_won",
            PlayerCounter::TerritoriesLost => "territories_lost",
            PlayerCounter::UnitsKilled => "units_killed",
            PlayerCounter::UnitsLost => "units_lost",
            PlayerCounter::PlayersEliminated => "players_eliminated",
            PlayerCounter::RoundsSurvived => "rounds_survived",
            PlayerCounter::PlacementsRejected => "placements_rejected",
            PlayerCounter::GamesWon => "games_won",
            PlayerCounter::GamesLost => "games_lost",
            PlayerCounter::GamesTied => "games_tied",
        }
    }
}

impl fmt::Display for PlayerCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PlayerStats {
    pub fn get(&self, counter: PlayerCounter) -> u64 {
        match counter {
            PlayerCounter::Attacks => self.attacks,
            PlayerCounter::TerritoriesWon => self.territories_won,
            PlayerCounter::TerritoriesLost => self.territories_lost,
            PlayerCounter::UnitsKilled => self.units_killed,
            PlayerCounter::UnitsLost => self.units_lost,
            PlayerCounter::PlayersEliminated => self.players_eliminated,
            PlayerCounter::RoundsSurvived => self.rounds_survived,
            PlayerCounter::PlacementsRejected => self.placements_rejected,
            PlayerCounter::GamesWon => self.games_won,
            PlayerCounter::GamesLost => self.games_lost,
            PlayerCounter::GamesTied => self.games_tied,
        }
    }

    pub fn games_played(&self) -> u64 {
        self.games_won + self.games_lost + self.games_tied
    }

    pub fn merge(&mut self, other: &PlayerStats) {
        self.attacks += other.attacks;
        self.territories_won += other.territories_won;
        self.territories_lost += other.territories_lost;
        self.units_killed += other.units_killed;
        self.units_lost += other.units_lost;
        self.players_eliminated += other.players_eliminated;
        self.rounds_survived += other.rounds_survived;
        self.placements_rejected += other.placements_rejected;
        self.games_won += other.games_won;
        self.games_lost += other.games_lost;
        self.games_tied += other.games_tied;
    }

    pub(crate) fn record_attack(&mut self, report: &AttackReport) {
        self.attacks += 1;
        self.units_killed += u64::from(report.attacker_wins);
        self.units_lost += u64::from(report.defender_wins);
        if report.captured() {
            self.territories_won += 1;
        }
        if report.defender_eliminated {
            self.players_eliminated += 1;
        }
    }

    pub(crate) fn record_defence(&mut self, report: &AttackReport) {
        self.units_killed += u64::from(report.defender_wins);
        self.units_lost += u64::from(report.attacker_wins);
        if report.captured() {
            self.territories_lost += 1;
        }
    }
}
