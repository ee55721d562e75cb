mod common;

use common::{board_with_links, first_free_or_own, place_many, OneDieBully, Scripted};
use risk_sim::board::Board;
use risk_sim::combat::{RandomDice, ScriptedDice};
use risk_sim::error::{AttackError, FortifyError};
use risk_sim::game::{Game, MatchOutcome};
use risk_sim::game_config::DegreeTable;
use risk_sim::player::PlayerId;
use risk_sim::strategies::StrategyKind;
use risk_sim::strategy::{Strategy, TurnContext};
use risk_sim::territory::TerritoryId;
use risk_sim::turn_phase::{reinforcements, MatchPhase};
use std::cell::RefCell;
use std::rc::Rc;

fn ring(n: usize) -> Board {
    let links: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    board_with_links(n, &links)
}

/// Passive player that writes down what the board looked like at each of its turns.
struct Recorder {
    log: Rc<RefCell<Vec<(u32, u32, usize)>>>,
}

impl Strategy for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        first_free_or_own(board, me)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let board = ctx.board();
        let total = board.territories().iter().map(|t| t.units()).sum();
        self.log
            .borrow_mut()
            .push((ctx.round(), total, board.count_owned(Some(ctx.me()))));
    }

    fn defend(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId, _: u32) -> u32 {
        1
    }

    fn occupy(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId) -> u32 {
        1
    }
}

/// Always wants the same territory, or nothing at all.
struct Fixated(Option<TerritoryId>);

impl Strategy for Fixated {
    fn name(&self) -> &str {
        "fixated"
    }

    fn place(&mut self, _: &Board, _: PlayerId) -> Option<TerritoryId> {
        self.0
    }

    fn turn(&mut self, _: &mut TurnContext<'_>) {}

    fn defend(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId, _: u32) -> u32 {
        1
    }

    fn occupy(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId) -> u32 {
        1
    }
}

#[test]
fn four_players_place_thirty_each_before_round_one() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut game = Game::new(ring(12)).with_max_rounds(1);
    game.add_player("P0", Box::new(Recorder { log: Rc::clone(&log) }));
    for name in ["P1", "P2", "P3"] {
        game.add_player(name, Box::new(Scripted::new(1, 1)));
    }
    game.run_game().unwrap();

    let log = log.borrow();
    let (round, total, owned) = log[0];
    assert_eq!(round, 1);
    assert_eq!(owned, 3);
    // P0 has already received its reinforcements for round one.
    assert_eq!(total - reinforcements(owned), 30 * 4);
    assert!(game.players.iter().all(|p| p.stats.placements_rejected == 0));
}

#[test]
fn round_cap_with_three_survivors_is_a_tie() {
    let mut game = Game::new(ring(9)).with_max_rounds(5);
    for name in ["P0", "P1", "P2"] {
        game.add_player(name, Box::new(Scripted::new(1, 1)));
    }
    let outcome = game.run_game().unwrap();

    assert_eq!(
        outcome,
        MatchOutcome::Tie {
            rounds: 5,
            survivors: vec![0, 1, 2]
        }
    );
    assert_eq!(outcome.winner(), None);
    assert_eq!(game.stats.ties, 1);
    assert_eq!(game.stats.matches, 1);
    for player in &game.players {
        assert_eq!(player.stats.games_tied, 1);
        assert_eq!(player.stats.games_won, 0);
        assert_eq!(player.stats.rounds_survived, 5);
    }
    assert_eq!(game.phase, MatchPhase::Terminal(outcome));
}

fn duel_game() -> Game {
    let board = board_with_links(2, &[(0, 1)]);
    let mut game = Game::new(board)
        .with_dice(ScriptedDice::new(vec![6, 1]))
        .with_starting_units(3);
    game.add_player("bully", Box::new(OneDieBully));
    game.add_player("victim", Box::new(Scripted::new(1, 1)));
    game
}

#[test]
fn elimination_ends_the_match_with_a_winner() {
    let mut game = duel_game();
    let outcome = game.run_game().unwrap();
    assert_eq!(outcome, MatchOutcome::Winner { player: 0, rounds: 1 });

    let bully = game.players[0].stats;
    assert_eq!(bully.attacks, 3);
    assert_eq!(bully.units_killed, 3);
    assert_eq!(bully.territories_won, 1);
    assert_eq!(bully.players_eliminated, 1);
    assert_eq!(bully.games_won, 1);
    assert_eq!(bully.rounds_survived, 1);

    let victim = game.players[1].stats;
    assert_eq!(victim.units_lost, 3);
    assert_eq!(victim.territories_lost, 1);
    assert_eq!(victim.games_lost, 1);
    assert_eq!(victim.rounds_survived, 0);

    assert_eq!(game.board.owner(1), Some(0));
    assert_eq!(game.board.units(0), 2);
    assert_eq!(game.board.units(1), 1);
}

#[test]
fn repeated_matches_restore_the_board_and_accumulate_stats() {
    let mut game = duel_game();
    let first = game.run_game().unwrap();
    let second = game.run_game().unwrap();
    assert_eq!(first, second);
    assert_eq!(game.stats.matches, 2);
    assert_eq!(game.players[0].stats.games_won, 2);
    assert_eq!(game.players[1].stats.games_lost, 2);

    for _ in 0..3 {
        game.board.restore().unwrap();
        assert!(game.board.territories().iter().all(|t| t.owner().is_none() && t.units() == 0));
    }
}

#[test]
fn failed_placements_still_use_up_the_unit() {
    let board = board_with_links(2, &[(0, 1)]);
    let mut game = Game::new(board).with_starting_units(3);
    game.add_player("first", Box::new(Fixated(Some(0))));
    game.add_player("second", Box::new(Fixated(Some(0))));
    game.add_player("idle", Box::new(Fixated(None)));

    let outcome = game.run_game().unwrap();
    // Setup alone left a single owner, so no round is played.
    assert_eq!(outcome, MatchOutcome::Winner { player: 0, rounds: 0 });
    assert_eq!(game.board.units(0), 3);
    assert_eq!(game.players[0].stats.placements_rejected, 0);
    assert_eq!(game.players[1].stats.placements_rejected, 3);
    assert_eq!(game.players[2].stats.placements_rejected, 3);
}

#[test]
fn zero_round_cap_stops_after_setup() {
    let mut game = Game::new(ring(6)).with_max_rounds(0);
    for name in ["P0", "P1"] {
        game.add_player(name, Box::new(Scripted::new(1, 1)));
    }
    let outcome = game.run_game().unwrap();

    assert_eq!(
        outcome,
        MatchOutcome::Tie {
            rounds: 0,
            survivors: vec![0, 1]
        }
    );
    assert_eq!(game.board.total_units(0) + game.board.total_units(1), 2 * 40);
    for player in &game.players {
        assert_eq!(player.stats.rounds_survived, 0);
        assert_eq!(player.stats.games_tied, 1);
    }
}

/// Attacks with one die and lets a stand-in answer the occupy question.
struct Delegating;

impl Strategy for Delegating {
    fn name(&self) -> &str {
        "delegating"
    }

    fn place(&mut self, board: &Board, me: PlayerId) -> Option<TerritoryId> {
        first_free_or_own(board, me)
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let me = ctx.me();
        let mut stand_in = Scripted::new(1, 2);
        while ctx.board().units(0) > 1 && ctx.board().owner(1) != Some(me) {
            if ctx.attack(&mut stand_in, 0, 1, 1).is_err() {
                break;
            }
        }
    }

    fn defend(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId, _: u32) -> u32 {
        1
    }

    fn occupy(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId) -> u32 {
        1
    }
}

#[test]
fn occupy_is_answered_by_the_strategy_passed_to_attack() {
    let board = board_with_links(2, &[(0, 1)]);
    let mut game = Game::new(board)
        .with_dice(ScriptedDice::new(vec![6, 1]))
        .with_starting_units(3);
    game.add_player("delegating", Box::new(Delegating));
    game.add_player("victim", Box::new(Scripted::new(1, 1)));

    let outcome = game.run_game().unwrap();
    assert_eq!(outcome, MatchOutcome::Winner { player: 0, rounds: 1 });
    // Delegating itself would have moved one unit; the stand-in moved two.
    assert_eq!(game.board.units(0), 1);
    assert_eq!(game.board.units(1), 2);
}

type FortifyLog = Rc<RefCell<Vec<Result<(), FortifyError>>>>;

/// Places from a fixed list, then tries a few fortify moves and one attack.
struct Drill {
    placements: std::vec::IntoIter<TerritoryId>,
    fortified: FortifyLog,
    attacked: Rc<RefCell<Option<AttackError>>>,
}

impl Strategy for Drill {
    fn name(&self) -> &str {
        "drill"
    }

    fn place(&mut self, _: &Board, _: PlayerId) -> Option<TerritoryId> {
        self.placements.next()
    }

    fn turn(&mut self, ctx: &mut TurnContext<'_>) {
        let moves = [ctx.fortify(0, 1, 1), ctx.fortify(0, 2, 1), ctx.fortify(1, 0, 5)];
        self.fortified.borrow_mut().extend(moves);
        let attacked = ctx.attack(self, 0, 3, 1).err();
        *self.attacked.borrow_mut() = attacked;
    }

    fn defend(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId, _: u32) -> u32 {
        1
    }

    fn occupy(&mut self, _: &Board, _: PlayerId, _: TerritoryId, _: TerritoryId) -> u32 {
        1
    }
}

#[test]
fn fortify_during_a_turn_moves_units_or_reports_why_not() {
    // T0 touches T1, T2 and T3. T3 belongs to a player who is not seated.
    let mut board = board_with_links(4, &[(0, 1), (0, 2), (0, 3)]);
    place_many(&mut board, 3, 7, 2);

    let fortified = Rc::new(RefCell::new(Vec::new()));
    let attacked = Rc::new(RefCell::new(None));
    let mut game = Game::new(board).with_starting_units(4).with_max_rounds(1);
    game.add_player(
        "drill",
        Box::new(Drill {
            placements: vec![0, 1, 0, 0].into_iter(),
            fortified: Rc::clone(&fortified),
            attacked: Rc::clone(&attacked),
        }),
    );
    game.add_player("holder", Box::new(Fixated(Some(2))));

    let outcome = game.run_game().unwrap();
    assert_eq!(
        outcome,
        MatchOutcome::Tie {
            rounds: 1,
            survivors: vec![0, 1]
        }
    );

    assert_eq!(
        *fortified.borrow(),
        vec![
            Ok(()),
            Err(FortifyError::DestinationNotOwned { territory: 2, player: 0 }),
            Err(FortifyError::InvalidUnitCount { requested: 5, available: 1 }),
        ]
    );
    assert_eq!(*attacked.borrow(), Some(AttackError::UnknownDefender(7)));

    assert_eq!(game.board.units(0), 2);
    assert_eq!(game.board.units(1), 2);
    assert_eq!(game.board.units(2), 4);
    assert_eq!(game.board.owner(3), Some(7));
    assert_eq!(game.board.units(3), 2);
}

#[test]
fn reference_strategies_keep_the_board_consistent() {
    let board = DegreeTable::standard().generate().unwrap();
    let mut game = Game::new(board)
        .with_dice(RandomDice::seeded(11))
        .with_max_rounds(200);
    let kinds = [
        StrategyKind::Aggressive,
        StrategyKind::Defensive,
        StrategyKind::Balanced,
        StrategyKind::Evolving,
        StrategyKind::Wall,
    ];
    for (seat, kind) in kinds.into_iter().enumerate() {
        game.add_player(&format!("P{seat}"), kind.build(3, seat as u64));
    }

    for _ in 0..3 {
        let outcome = game.run_game().unwrap();
        assert!(outcome.rounds() >= 1 && outcome.rounds() <= 200);
        for territory in game.board.territories() {
            assert_eq!(territory.owner().is_some(), territory.units() >= 1, "{}", territory.name);
        }
    }

    let stats: Vec<_> = game.players.iter().map(|p| p.stats).collect();
    let won: u64 = stats.iter().map(|s| s.territories_won).sum();
    let lost: u64 = stats.iter().map(|s| s.territories_lost).sum();
    let killed: u64 = stats.iter().map(|s| s.units_killed).sum();
    let dead: u64 = stats.iter().map(|s| s.units_lost).sum();
    assert_eq!(won, lost);
    assert_eq!(killed, dead);
    assert_eq!(game.stats.matches, 3);
    assert!(stats.iter().all(|s| s.games_played() == 3));
}
