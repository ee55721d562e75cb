use crate::board::Board;
use crate::combat::RandomDice;
use crate::error::ConfigError;
use crate::game::{Game, DEFAULT_MAX_ROUNDS};
use crate::strategies::{StrategyKind, DEFAULT_THREAT_RANGE};
use crate::territory::TerritoryId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    #[serde(default)]
    pub starting_units: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub strategy: StrategyKind,
    #[serde(default = "default_threat_range")]
    pub threat_range: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapConfig {
    /// Named territories with the names of their neighbours. A link only
    /// needs to be listed on one side.
    Adjacency { territories: Vec<TerritoryConfig> },
    /// Neighbour indices per territory, territory `i` being the `i`th list.
    NeighbourLists { lists: Vec<Vec<usize>> },
    /// A generated map with the given number of territories of each degree.
    Degrees { table: DegreeTable },
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig::Degrees {
            table: DegreeTable::standard(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub name: String,
    #[serde(default)]
    pub adjacent: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DegreeCount {
    pub degree: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DegreeTable(pub Vec<DegreeCount>);

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

fn default_threat_range() -> u32 {
    DEFAULT_THREAT_RANGE
}

impl DegreeTable {
    /// The classic 42 territory layout.
    pub fn standard() -> Self {
        DegreeTable(
            [(2, 5), (3, 13), (4, 12), (5, 7), (6, 5)]
                .into_iter()
                .map(|(degree, count)| DegreeCount { degree, count })
                .collect(),
        )
    }

    pub fn territory_count(&self) -> usize {
        self.0.iter().map(|entry| entry.count).sum()
    }

    /// Builds a simple graph with exactly this degree sequence. Territories are
    /// numbered in table order and named `T0`, `T1`, ... The construction is
    /// Havel-Hakimi with ties broken by id, so the same table always yields
    /// the same map.
    pub fn generate(&self) -> Result<Board, ConfigError> {
        let mut board = Board::new();
        let mut remaining: Vec<(usize, TerritoryId)> = Vec::with_capacity(self.territory_count());
        for entry in &self.0 {
            for _ in 0..entry.count {
                let id = board.add_territory(&format!("T{}", board.len()));
                remaining.push((entry.degree, id));
            }
        }

        loop {
            remaining.retain(|&(degree, _)| degree > 0);
            if remaining.is_empty() {
                break;
            }
            remaining.sort_by_key(|&(degree, id)| (Reverse(degree), id));
            let (degree, id) = remaining.remove(0);
            if degree > remaining.len() {
                return Err(ConfigError::NotGraphical);
            }
            for entry in remaining.iter_mut().take(degree) {
                board.add_adjacency_link(id, entry.1)?;
                entry.0 -= 1;
            }
        }

        debug!(territories = board.len(), "generated map from degree table");
        Ok(board)
    }
}

impl Board {
    /// Territory `i` is linked to every index in `lists[i]`.
    pub fn from_neighbour_lists(lists: &[Vec<usize>]) -> Result<Board, ConfigError> {
        let mut board = Board::new();
        for i in 0..lists.len() {
            board.add_territory(&format!("T{i}"));
        }
        for (territory, neighbours) in lists.iter().enumerate() {
            for &neighbour in neighbours {
                if neighbour >= lists.len() {
                    return Err(ConfigError::NeighbourOutOfRange { territory, neighbour });
                }
                board.add_adjacency_link(territory, neighbour)?;
            }
        }
        Ok(board)
    }
}

impl MapConfig {
    pub fn to_board(&self) -> Result<Board, ConfigError> {
        match self {
            MapConfig::Adjacency { territories } => {
                let mut board = Board::new();
                let mut ids = HashMap::new();
                for territory in territories {
                    if ids.contains_key(territory.name.as_str()) {
                        return Err(ConfigError::DuplicateTerritory(territory.name.clone()));
                    }
                    ids.insert(territory.name.as_str(), board.add_territory(&territory.name));
                }
                for territory in territories {
                    let id = ids[territory.name.as_str()];
                    for adjacent in &territory.adjacent {
                        let other = ids
                            .get(adjacent.as_str())
                            .copied()
                            .ok_or_else(|| ConfigError::UnknownTerritory(adjacent.clone()))?;
                        board.add_adjacency_link(id, other)?;
                    }
                }
                Ok(board)
            }
            MapConfig::NeighbourLists { lists } => Board::from_neighbour_lists(lists),
            MapConfig::Degrees { table } => table.generate(),
        }
    }
}

impl GameConfig {
    /// A config seating one player per strategy on the standard map.
    pub fn with_strategies(strategies: &[StrategyKind]) -> Self {
        let players = strategies
            .iter()
            .enumerate()
            .map(|(i, &strategy)| PlayerConfig {
                name: format!("{} {}", strategy_label(strategy), i + 1),
                strategy,
                threat_range: DEFAULT_THREAT_RANGE,
            })
            .collect();
        Self {
            players,
            map: MapConfig::default(),
            max_rounds: DEFAULT_MAX_ROUNDS,
            starting_units: None,
            seed: None,
        }
    }

    /// Builds an independent game for one batch worker. With a seed set, the
    /// dice and every seat of every worker get their own stream, see
    /// [`stream_seed`].
    pub fn to_game(&self, worker: usize) -> Result<Game, ConfigError> {
        if self.players.len() < 2 {
            return Err(ConfigError::TooFewPlayers(self.players.len()));
        }

        let board = self.map.to_board()?;
        let dice = match self.seed {
            Some(seed) => RandomDice::seeded(stream_seed(seed, worker, 0)),
            None => RandomDice::from_entropy(),
        };

        let mut game = Game::new(board).with_dice(dice).with_max_rounds(self.max_rounds);
        if let Some(units) = self.starting_units {
            game = game.with_starting_units(units);
        }
        for (seat, player) in self.players.iter().enumerate() {
            let seed = match self.seed {
                Some(seed) => stream_seed(seed, worker, seat + 1),
                None => rand::random(),
            };
            game.add_player(&player.name, player.strategy.build(player.threat_range, seed));
        }
        Ok(game)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&data)?;
        Ok(config)
    }
}

/// Seed of one random stream in a batch. Stream 0 is the dice, stream
/// `seat + 1` a seat's strategy. The worker sits in the high half and the
/// stream in the low half, so no two (worker, stream) pairs collide.
pub fn stream_seed(seed: u64, worker: usize, stream: usize) -> u64 {
    seed ^ ((worker as u64) << 32) ^ (stream as u64 & 0xffff_ffff)
}

fn strategy_label(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Aggressive => "Aggressive",
        StrategyKind::Defensive => "Defensive",
        StrategyKind::Balanced => "Balanced",
        StrategyKind::Evolving => "Evolving",
        StrategyKind::Wall => "Wall",
    }
}
