//! Parallel batches of matches.
//!
//! Each worker builds its own `Game` and plays its share of the trials on it
//! sequentially, so strategies that learn between matches see every match of
//! their worker. Telemetry is collected per worker and merged once the
//! parallel section is over.

use crate::error::GameError;
use crate::game::{Game, MatchStats};
use crate::player::PlayerStats;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerSummary {
    pub name: String,
    pub strategy: String,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchSummary {
    pub trials: u64,
    pub workers: usize,
    pub matches: MatchStats,
    pub players: Vec<PlayerSummary>,
}

impl BatchSummary {
    fn from_game(game: &Game) -> Self {
        let players = game
            .players
            .iter()
            .map(|player| PlayerSummary {
                name: player.name.clone(),
                strategy: game.strategy_name(player.id).unwrap_or_default().to_string(),
                stats: player.stats,
            })
            .collect();
        Self {
            trials: game.stats.matches,
            workers: 1,
            matches: game.stats,
            players,
        }
    }

    /// Adds another worker's results, seat by seat.
    pub fn merge(&mut self, other: &BatchSummary) {
        self.trials += other.trials;
        self.workers += other.workers;
        self.matches.merge(&other.matches);
        for (i, theirs) in other.players.iter().enumerate() {
            match self.players.get_mut(i) {
                Some(ours) => ours.stats.merge(&theirs.stats),
                None => self.players.push(theirs.clone()),
            }
        }
    }
}

/// Trials handed to `worker` when `trials` are spread over `workers`.
pub fn worker_share(trials: u64, workers: usize, worker: usize) -> u64 {
    let workers = workers.max(1) as u64;
    let worker = worker as u64;
    trials / workers + u64::from(worker < trials % workers)
}

/// Runs `trials` matches spread over `workers` independent games built by
/// `build(worker)`.
pub fn run_batch<F, E>(trials: u64, workers: usize, build: F) -> Result<BatchSummary, E>
where
    F: Fn(usize) -> Result<Game, E> + Sync,
    E: From<GameError> + Send,
{
    let workers = workers.max(1);
    let start = Instant::now();

    let summaries = (0..workers)
        .into_par_iter()
        .map(|worker| {
            let mut game = build(worker)?;
            let share = worker_share(trials, workers, worker);
            for _ in 0..share {
                game.run_game()?;
            }
            debug!(worker, matches = share, "worker finished");
            Ok(BatchSummary::from_game(&game))
        })
        .collect::<Result<Vec<_>, E>>()?;

    let mut total = BatchSummary {
        trials: 0,
        workers: 0,
        matches: MatchStats::default(),
        players: Vec::new(),
    };
    for summary in &summaries {
        total.merge(summary);
    }

    info!(
        trials = total.trials,
        workers = total.workers,
        ties = total.matches.ties,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch finished"
    );
    Ok(total)
}
