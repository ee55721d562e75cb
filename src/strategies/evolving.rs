use super::{aggressive, balanced, defensive, full_defence, wall};
use crate::board::Board;
use crate::player::{PlayerId, PlayerStats};
use crate::strategy::{Strategy, TurnContext};
use crate::territory::TerritoryId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

const LEARNING_RATE: f64 = 0.01;
const MUTATION_RATE: f64 = 3.0;

/// The fixed policies an `Evolving` player can borrow a decision from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Aggressive,
    Balanced,
    Defensive,
    Wall,
}

impl Policy {
    const ALL: [Policy; 4] = [Policy::Aggressive, Policy::Balanced, Policy::Defensive, Policy::Wall];
}

/// The decisions that are chosen independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Defend,
    Occupy,
    Place,
    Turn,
}

impl Decision {
    const ALL: [Decision; 4] = [Decision::Defend, Decision::Occupy, Decision::Place, Decision::Turn];

    /// Policies that may be picked for this decision, in `Policy::ALL` order.
    /// Every policy defends the same way, so defence stays with the first.
    /// Wall only differs from `Balanced` in placement.
    fn eligible(self, policy: Policy) -> bool {
        match (self, policy) {
            (Decision::Defend, Policy::Aggressive) => true,
            (Decision::Defend, _) => false,
            (Decision::Place, _) => true,
            (_, Policy::Wall) => false,
            _ => true,
        }
    }
}

/// Picks a policy per decision at the start of every match. Choices that were
/// in use when a match was won get a small boost; every pick is perturbed by
/// noise large enough that all combinations keep getting tried.
#[derive(Debug, Clone)]
pub struct Evolving {
    pub range: u32,
    preferences: [[f64; 4]; 4],
    chosen: [Policy; 4],
    games_won: u64,
    rng: ChaCha8Rng,
}

impl Evolving {
    pub fn new(range: u32, seed: u64) -> Self {
        Self {
            range,
            preferences: [[0.0; 4]; 4],
            chosen: [Policy::Aggressive; 4],
            games_won: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self, decision: Decision) -> Policy {
        self.chosen[decision as usize]
    }

    pub fn preference(&self, decision: Decision, policy: Policy) -> f64 {
        self.preferences[decision as usize][policy as usize]
    }

    fn reinforce(&mut self) {
        for decision in Decision::ALL {
            let policy = self.chosen[decision as usize];
            self.preferences[decision as usize][policy as usize] += self.rng.gen::<f64>() * LEARNING_RATE;
        }
    }

    fn choose(&mut self) {
        for decision in Decision::ALL {
            let row = self.preferences[decision as usize];
            let mut best = Policy::ALL[0];
            let mut best_score = f64::MIN;
            for policy in Policy::ALL.into_iter().filter(|&p| decision.eligible(p)) {
                let score = row[policy as usize] + self.rng.gen::<f64>() * MUTATION_RATE;
                if score > best_score {
                    best = policy;
                    best_score = score;
                }
            }
            self.chosen[decision as usize] = best;
        }
    }
}

impl Strategy for Evolving {
    fn name(&self) -> &str {
        "evolving"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        match self.policy(Decision::Place) {
            Policy::Aggressive => aggressive::place(board, me, self.range),
            Policy::Balanced => balanced::place(board, me),
            Policy::Defensive => defensive::place(board, me, self.range),
            Policy::Wall => wall::place(board, me),
        }
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let range = self.range;
        match self.policy(Decision::Turn) {
            Policy::Aggressive => aggressive::play_turn(ctx, self, range),
            Policy::Balanced | Policy::Wall => balanced::play_turn(ctx, self),
            Policy::Defensive => defensive::play_turn(ctx, self, range),
        }
    }

    fn defend(&mut self, board: &Board, _me: PlayerId, _from: TerritoryId, to: TerritoryId, _incoming: u32) -> u32 {
        // Every policy defends the same way.
        full_defence(board, to)
    }

    fn occupy(&mut self, board: &Board, _me: PlayerId, from: TerritoryId, to: TerritoryId) -> u32 {
        match self.policy(Decision::Occupy) {
            Policy::Aggressive => aggressive::occupy(board, from),
            Policy::Balanced | Policy::Wall => balanced::occupy(board, from),
            Policy::Defensive => defensive::occupy(board, from, to, self.range),
        }
    }

    fn on_match_start(&mut self, me: PlayerId, stats: &PlayerStats) {
        if stats.games_won > self.games_won {
            self.reinforce();
        }
        self.games_won = stats.games_won;
        self.choose();
        debug!(player = me, policies = ?self.chosen, "evolving strategy picked policies");
    }
}
