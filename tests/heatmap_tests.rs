use seabattle::{Configuration, Grid, Heatmap, Orientation, Sampler, SamplerConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn configs(cells: &[&[usize]]) -> Vec<Configuration> {
    cells.iter().map(|c| Configuration::new(c.to_vec())).collect()
}

#[test]
fn test_tally_and_first_index_on_ties() {
    let grid = Grid::new(3, 3);
    let heatmap = Heatmap::aggregate(&grid, &configs(&[&[4], &[4, 5], &[5], &[1]]));

    assert_eq!(heatmap.count(4), 2);
    assert_eq!(heatmap.count(5), 2);
    assert_eq!(heatmap.count(1), 1);
    assert_eq!(heatmap.best(), Some(4));
    assert_eq!(heatmap.level(4), 15);
    assert_eq!(heatmap.level(1), 8);
    assert_eq!(heatmap.level(0), 0);
}

#[test]
fn test_hit_cells_are_zeroed_and_never_chosen() {
    let mut grid = Grid::new(3, 3);
    grid.place(1, Orientation::Horizontal, 1, 1).unwrap();
    grid.shoot(4).unwrap();

    let heatmap = Heatmap::aggregate(&grid, &configs(&[&[4, 3], &[4, 3], &[4, 7]]));
    assert_eq!(heatmap.count(4), 0);
    assert_eq!(heatmap.best(), Some(3));
}

#[test]
fn test_all_zero_picks_first_open_cell() {
    let mut grid = Grid::new(3, 3);
    grid.shoot(0).unwrap();
    let heatmap = Heatmap::aggregate(&grid, &[]);
    assert!(heatmap.levels().iter().all(|&l| l == 0));
    assert_eq!(heatmap.best(), Some(1));
}

#[test]
fn test_fully_targeted_grid_has_no_best() {
    let mut grid = Grid::new(1, 2);
    grid.shoot(0).unwrap();
    grid.shoot(1).unwrap();
    let heatmap = Heatmap::aggregate(&grid, &configs(&[&[0]]));
    assert_eq!(heatmap.best(), None);
}

#[test]
fn test_exhaustive_placements_symmetric_under_rotation() {
    let grid = Grid::new(6, 6);
    let configurations: Vec<Configuration> = [2, 3, 4]
        .iter()
        .flat_map(|&len| grid.enumerate_placements(len))
        .map(|p| Configuration::new(p.positions))
        .collect();
    let heatmap = Heatmap::aggregate(&grid, &configurations);
    let last = grid.len() - 1;
    for i in 0..grid.len() {
        assert_eq!(heatmap.count(i), heatmap.count(last - i), "cell {}", i);
    }
    // the centre of the board is favoured over the corners
    assert!(heatmap.count(14) > heatmap.count(0));
}

#[test]
fn test_sampled_heatmap_prefers_cells_next_to_hit() {
    let mut grid = Grid::new(10, 10);
    grid.place(3, Orientation::Horizontal, 4, 4).unwrap();
    grid.shoot(45).unwrap();
    let mut fleet = vec![2, 3, 4];
    let mut rng = SmallRng::seed_from_u64(21);

    let sampler = Sampler::new(SamplerConfig::with_trials(300));
    let configurations = sampler.sample(&mut grid, &mut fleet, &mut rng).unwrap();
    let heatmap = Heatmap::aggregate(&grid, &configurations);
    let best = heatmap.best().unwrap();
    assert!([35, 44, 46, 55].contains(&best), "best was {}", best);
    assert_eq!(heatmap.count(45), 0);
}

#[test]
fn test_display_uses_hex_levels() {
    let grid = Grid::new(1, 3);
    let heatmap = Heatmap::aggregate(&grid, &configs(&[&[0], &[0], &[1]]));
    let text = heatmap.to_string();
    let row = text.lines().nth(1).unwrap();
    assert_eq!(row, " 1  F 8 0");
}
