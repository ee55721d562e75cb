mod common;

use common::{board_with_links, place_many};
use risk_sim::game_config::DegreeTable;
use rayon::prelude::*;

/// T0 - T1 - T2 - T3 with P0 on T0, P1 on T1 (3) and T2 (2), P2 on T3 (5).
fn corridor() -> risk_sim::board::Board {
    let mut board = board_with_links(4, &[(0, 1), (1, 2), (2, 3)]);
    place_many(&mut board, 0, 0, 1);
    place_many(&mut board, 1, 1, 3);
    place_many(&mut board, 2, 1, 2);
    place_many(&mut board, 3, 2, 5);
    board
}

#[test]
fn weights_decay_with_distance() {
    let board = corridor();
    assert_eq!(board.unit_threat(0, 3), 3 * 3 + 2 * 2 + 5);
    assert_eq!(board.unit_threat(0, 2), 3 * 2 + 2);
    assert_eq!(board.unit_threat(0, 1), 3);
    assert_eq!(board.adjacency_threat(0, 3), 3 + 2 + 1);
}

#[test]
fn own_territory_blocks_the_walk() {
    let mut board = corridor();
    board.add_territory("T4");
    board.add_adjacency_link(0, 4).unwrap();
    place_many(&mut board, 4, 0, 2);
    // Seen from T4, T0 is friendly, so nothing behind it is reachable.
    assert_eq!(board.unit_threat(4, 5), 0);
    assert_eq!(board.adjacency_threat(4, 5), 0);
}

#[test]
fn cycles_count_each_territory_once() {
    let mut board = board_with_links(3, &[(0, 1), (1, 2), (2, 0)]);
    place_many(&mut board, 0, 0, 1);
    place_many(&mut board, 1, 1, 4);
    place_many(&mut board, 2, 1, 6);
    assert_eq!(board.unit_threat(0, 2), (4 + 6) * 2);
    assert_eq!(board.adjacency_threat(0, 3), 3 + 3);
}

#[test]
fn viewer_can_differ_from_owner() {
    let board = corridor();
    // P1 looking at its own T2: T1 is friendly, T3 holds 5 and T0 is behind T1.
    assert_eq!(board.unit_threat(2, 3), 5 * 3);
    // P2 considering T2 before owning it sees T1 and T0 through P1's ground.
    assert_eq!(board.unit_threat_for(2, 3, Some(2)), 3 * 3 + 2);
}

#[test]
fn concurrent_evaluations_agree_with_sequential_ones() {
    let mut board = DegreeTable::standard().generate().unwrap();
    for t in 0..board.len() {
        place_many(&mut board, t, t % 4, (t % 5) as u32 + 1);
    }

    let sequential: Vec<u64> = (0..board.len()).map(|t| board.unit_threat(t, 4)).collect();
    let parallel: Vec<u64> = (0..board.len())
        .into_par_iter()
        .map(|t| board.unit_threat(t, 4))
        .collect();
    assert_eq!(sequential, parallel);

    // Hammer the same territory from many threads at once.
    let expected = board.adjacency_threat(7, 3);
    assert!((0..256)
        .into_par_iter()
        .all(|_| board.adjacency_threat(7, 3) == expected));
}
