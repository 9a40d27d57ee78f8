use seabattle::{fleet_lengths, CellStatus, Grid, GridError, Orientation, ShotOutcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

#[test]
fn test_place_horizontal_at_origin() {
    let mut grid = Grid::new(10, 10);
    let ship = grid.place(5, Orientation::Horizontal, 0, 0).unwrap();

    assert_eq!(ship.positions(), &[0, 1, 2, 3, 4]);
    let adjacent: BTreeSet<usize> = ship.adjacent().iter().copied().collect();
    let expected: BTreeSet<usize> = [5, 10, 11, 12, 13, 14, 15].into_iter().collect();
    assert_eq!(adjacent, expected);
    assert_eq!(grid.ship_positions().len(), 5);
}

#[test]
fn test_place_rejects_touching_and_overlap() {
    let mut grid = Grid::new(10, 10);
    grid.place(2, Orientation::Horizontal, 0, 0).unwrap();

    // diagonal neighbour of (0, 1)
    assert_eq!(
        grid.place(1, Orientation::Horizontal, 1, 2).unwrap_err(),
        GridError::CellOccupiedOrExcluded { row: 1, col: 2 }
    );
    assert_eq!(
        grid.place(3, Orientation::Vertical, 0, 1).unwrap_err(),
        GridError::CellOccupiedOrExcluded { row: 0, col: 1 }
    );
    // one cell of water in between is enough
    assert!(grid.place(1, Orientation::Horizontal, 0, 3).is_ok());
    assert_eq!(grid.ship_positions().len(), 3);
}

#[test]
fn test_place_out_of_bounds_and_invalid_length() {
    let mut grid = Grid::new(10, 10);
    assert_eq!(
        grid.place(3, Orientation::Horizontal, 0, 8).unwrap_err(),
        GridError::OutOfBounds { row: 0, col: 10 }
    );
    assert_eq!(
        grid.place(4, Orientation::Vertical, 7, 0).unwrap_err(),
        GridError::OutOfBounds { row: 10, col: 0 }
    );
    assert_eq!(
        grid.place(0, Orientation::Vertical, 0, 0).unwrap_err(),
        GridError::InvalidLength { length: 0 }
    );
    assert!(grid.ship_positions().is_empty());
}

#[test]
fn test_failed_place_leaves_layout_untouched() {
    let mut grid = Grid::new(10, 10);
    // runs off the right edge after passing (0, 7)
    assert!(grid.place(4, Orientation::Horizontal, 0, 7).is_err());
    // so a ship touching (0, 7) is still legal
    assert!(grid.place(1, Orientation::Horizontal, 1, 7).is_ok());
}

#[test]
fn test_place_rejects_missed_cell() {
    let mut grid = Grid::new(10, 10);
    assert_eq!(grid.shoot(23).unwrap(), ShotOutcome::Miss);
    assert_eq!(
        grid.place(3, Orientation::Horizontal, 2, 1).unwrap_err(),
        GridError::CellOccupiedOrExcluded { row: 2, col: 3 }
    );
}

#[test]
fn test_shoot_hit_then_repeat() {
    let mut grid = Grid::new(10, 10);
    grid.place(2, Orientation::Horizontal, 0, 0).unwrap();

    assert_eq!(grid.shoot(0).unwrap(), ShotOutcome::Hit);
    assert!(grid.hit_positions().contains(&0));
    assert!(!grid.ship_positions().contains(&0));

    let before = grid.clone();
    assert_eq!(
        grid.shoot(0).unwrap_err(),
        GridError::AlreadyTargeted { index: 0 }
    );
    assert_eq!(grid.hit_positions(), before.hit_positions());
    assert_eq!(grid.miss_positions(), before.miss_positions());
    assert_eq!(grid.ship_positions(), before.ship_positions());
    assert_eq!(grid.cells(), before.cells());
}

#[test]
fn test_shoot_miss_and_out_of_range() {
    let mut grid = Grid::new(4, 4);
    assert_eq!(grid.shoot(5).unwrap(), ShotOutcome::Miss);
    assert_eq!(grid.cell(5).unwrap().status, CellStatus::Miss);
    assert_eq!(
        grid.shoot(16).unwrap_err(),
        GridError::IndexOutOfBounds { index: 16 }
    );
}

#[test]
fn test_refresh_reveals_ships_on_request() {
    let mut grid = Grid::new(5, 5);
    grid.place(2, Orientation::Vertical, 1, 1).unwrap();
    grid.shoot(6).unwrap();
    grid.shoot(0).unwrap();

    grid.refresh(false);
    assert_eq!(grid.cell(11).unwrap().status, CellStatus::Empty);
    assert_eq!(grid.cell(6).unwrap().status, CellStatus::Hit);
    assert_eq!(grid.cell(0).unwrap().status, CellStatus::Miss);

    grid.refresh(true);
    assert_eq!(grid.cell(11).unwrap().status, CellStatus::Ship);
    let once = grid.cells().to_vec();
    grid.refresh(true);
    assert_eq!(grid.cells(), &once[..]);
}

#[test]
fn test_reset_clears_cells_but_keeps_positions() {
    let mut grid = Grid::new(5, 5);
    grid.place(3, Orientation::Horizontal, 2, 0).unwrap();
    grid.shoot(24).unwrap();
    grid.reset();

    assert!(grid.cells().iter().all(|c| c.status == CellStatus::Empty));
    assert_eq!(grid.ship_positions().len(), 3);
    assert!(grid.miss_positions().contains(&24));

    grid.refresh(true);
    assert_eq!(grid.cell(10).unwrap().status, CellStatus::Ship);
    assert_eq!(grid.cell(24).unwrap().status, CellStatus::Miss);
}

#[test]
fn test_place_fleet_randomly_keeps_ships_apart() {
    let mut grid = Grid::new(10, 10);
    let mut rng = SmallRng::seed_from_u64(42);
    let ships = grid.place_fleet_randomly(&fleet_lengths(), &mut rng).unwrap();

    assert_eq!(ships.len(), 5);
    assert_eq!(grid.ship_positions().len(), 1 + 2 + 3 + 4 + 5);
    for (i, a) in ships.iter().enumerate() {
        for b in ships.iter().skip(i + 1) {
            for &p in a.positions() {
                for &q in b.positions() {
                    let (pr, pc) = grid.coords(p);
                    let (qr, qc) = grid.coords(q);
                    let distance = pr.abs_diff(qr).max(pc.abs_diff(qc));
                    assert!(distance >= 2, "ships touch at {:?} and {:?}", (pr, pc), (qr, qc));
                }
            }
        }
    }
}

#[test]
fn test_place_fleet_randomly_reproducible() {
    let mut rng1 = SmallRng::seed_from_u64(7);
    let mut rng2 = SmallRng::seed_from_u64(7);
    let mut grid1 = Grid::new(10, 10);
    let mut grid2 = Grid::new(10, 10);
    let ships1 = grid1.place_fleet_randomly(&fleet_lengths(), &mut rng1).unwrap();
    let ships2 = grid2.place_fleet_randomly(&fleet_lengths(), &mut rng2).unwrap();
    assert_eq!(ships1, ships2);
}

#[test]
fn test_place_fleet_randomly_gives_up_when_full() {
    let mut grid = Grid::new(2, 2);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        grid.place_fleet_randomly(&[1, 1], &mut rng).unwrap_err(),
        GridError::UnableToPlaceShip { length: 1 }
    );
}

#[test]
fn test_failed_fleet_placement_leaves_grid_untouched() {
    let mut grid = Grid::new(3, 3);
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        grid.place_fleet_randomly(&[3, 3, 3], &mut rng).unwrap_err(),
        GridError::UnableToPlaceShip { length: 3 }
    );
    assert!(grid.ship_positions().is_empty());
    // no exclusion halo survives from the ships placed before the failure
    assert!(grid.place(3, Orientation::Horizontal, 1, 0).is_ok());
}

#[test]
fn test_reset_keeps_ships_clear_of_recorded_fleet() {
    let mut grid = Grid::new(5, 5);
    grid.place(2, Orientation::Horizontal, 0, 0).unwrap();
    grid.reset();

    assert_eq!(
        grid.place(2, Orientation::Horizontal, 0, 0).unwrap_err(),
        GridError::CellOccupiedOrExcluded { row: 0, col: 0 }
    );
    assert_eq!(
        grid.place(1, Orientation::Horizontal, 0, 2).unwrap_err(),
        GridError::CellOccupiedOrExcluded { row: 0, col: 2 }
    );
    assert!(grid.place(1, Orientation::Horizontal, 0, 3).is_ok());
}

#[test]
fn test_observe_copies_evidence_without_ships() {
    let mut defender = Grid::new(3, 3);
    defender.place(1, Orientation::Horizontal, 0, 0).unwrap();
    defender.place(1, Orientation::Horizontal, 2, 2).unwrap();
    defender.shoot(0).unwrap();
    defender.shoot(5).unwrap();

    let mut board = Grid::new(3, 3);
    board.observe(&defender).unwrap();
    assert_eq!(board.hit_positions(), defender.hit_positions());
    assert_eq!(board.miss_positions(), defender.miss_positions());
    assert!(board.ship_positions().is_empty());
    assert_eq!(board.cell(0).unwrap().status, CellStatus::Hit);

    board.observe(&defender).unwrap();
    assert_eq!(board.hit_positions().len(), 1);
    assert_eq!(
        board.record(0, ShotOutcome::Hit).unwrap_err(),
        GridError::AlreadyTargeted { index: 0 }
    );
    assert_eq!(
        board.record(9, ShotOutcome::Miss).unwrap_err(),
        GridError::IndexOutOfBounds { index: 9 }
    );
}

#[test]
fn test_display_marks_cells() {
    let mut grid = Grid::new(2, 3);
    grid.place(1, Orientation::Horizontal, 0, 0).unwrap();
    grid.shoot(2).unwrap();
    grid.refresh(true);
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0].trim(), "A B C");
    assert_eq!(lines[1], " 1  S . o");
    assert_eq!(lines[2], " 2  . . .");
}
