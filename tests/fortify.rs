mod common;

use common::{board_with_links, place_many};
use risk_sim::board::Board;
use risk_sim::error::FortifyError;
use risk_sim::strategy::check_fortify;

/// T0 - T1 - T2, T1 - T3. P0 holds T0 (3), T1 (1) and T3 (2); P1 holds T2 (2).
fn home_ground() -> Board {
    let mut board = board_with_links(4, &[(0, 1), (1, 2), (1, 3)]);
    place_many(&mut board, 0, 0, 3);
    place_many(&mut board, 1, 0, 1);
    place_many(&mut board, 2, 1, 2);
    place_many(&mut board, 3, 0, 2);
    board
}

#[test]
fn every_rejected_move_is_named() {
    let board = home_ground();
    let cases: Vec<((usize, usize, u32), FortifyError)> = vec![
        ((9, 0, 1), FortifyError::UnknownTerritory(9)),
        ((0, 9, 1), FortifyError::UnknownTerritory(9)),
        ((2, 1, 1), FortifyError::NotOwner { territory: 2, player: 0 }),
        ((0, 2, 1), FortifyError::DestinationNotOwned { territory: 2, player: 0 }),
        ((0, 0, 1), FortifyError::SameTerritory(0)),
        ((0, 1, 3), FortifyError::InvalidUnitCount { requested: 3, available: 2 }),
        ((0, 1, 0), FortifyError::InvalidUnitCount { requested: 0, available: 2 }),
        ((1, 0, 1), FortifyError::InvalidUnitCount { requested: 1, available: 0 }),
        ((0, 3, 1), FortifyError::NotAdjacent { from: 0, to: 3 }),
    ];

    for ((from, to, units), expected) in cases {
        assert_eq!(check_fortify(&board, 0, from, to, units), Err(expected), "{from} -> {to} x{units}");
    }
}

#[test]
fn legal_moves_keep_one_unit_behind() {
    let mut board = home_ground();
    assert_eq!(check_fortify(&board, 0, 0, 1, 2), Ok(()));
    assert_eq!(check_fortify(&board, 0, 3, 1, 1), Ok(()));

    board.move_units(0, 1, 2);
    assert_eq!(board.units(0), 1);
    assert_eq!(board.units(1), 3);
    assert_eq!(board.owner(0), Some(0));
    // The drained territory has nothing left to give.
    assert!(check_fortify(&board, 0, 0, 1, 1).is_err());
    assert_eq!(check_fortify(&board, 1, 2, 1, 1), Err(FortifyError::DestinationNotOwned { territory: 1, player: 1 }));
}
