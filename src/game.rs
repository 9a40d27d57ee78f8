use rand::rngs::SmallRng;
use serde::Serialize;

use crate::{
    common::{GridError, ShotOutcome},
    grid::Grid,
    player::Player,
    ship::Ship,
};

/// Outcome of a single shot, including the length of a ship it destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShotReport {
    pub index: usize,
    pub outcome: ShotOutcome,
    pub destroyed: Option<usize>,
}

/// Summary of one side's shots against a defended grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HuntReport {
    pub shots: usize,
    pub hits: usize,
    pub misses: usize,
    pub ships_destroyed: usize,
    pub complete: bool,
}

/// A defended grid together with the fleet placed on it.
pub struct Engagement {
    grid: Grid,
    ships: Vec<Ship>,
    shots: usize,
}

impl Engagement {
    pub fn new(grid: Grid, ships: Vec<Ship>) -> Self {
        Self {
            grid,
            ships,
            shots: 0,
        }
    }

    /// Build a `height`×`width` grid and place a fleet on it.
    pub fn deploy(
        player: &mut dyn Player,
        rng: &mut SmallRng,
        height: usize,
        width: usize,
        lengths: &[usize],
    ) -> Result<Self, GridError> {
        let mut grid = Grid::new(height, width);
        let ships = player.place_fleet(rng, &mut grid, lengths)?;
        Ok(Self::new(grid, ships))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Shoot at `index` and credit a hit to the ship occupying it.
    pub fn fire(&mut self, index: usize) -> Result<ShotReport, GridError> {
        let outcome = self.grid.shoot(index)?;
        self.shots += 1;
        let mut destroyed = None;
        if outcome == ShotOutcome::Hit {
            if let Some(ship) = self.ships.iter_mut().find(|s| s.contains(index)) {
                ship.register_hit(index);
                if ship.is_destroyed() {
                    destroyed = Some(ship.length());
                }
            }
        }
        Ok(ShotReport {
            index,
            outcome,
            destroyed,
        })
    }

    /// All ships destroyed.
    pub fn is_over(&self) -> bool {
        self.grid.fleet_destroyed()
    }

    pub fn report(&self) -> HuntReport {
        HuntReport {
            shots: self.shots,
            hits: self.grid.hit_positions().len() + self.grid.sunk_positions().len(),
            misses: self.grid.miss_positions().len(),
            ships_destroyed: self.ships.iter().filter(|s| s.is_destroyed()).count(),
            complete: self.is_over(),
        }
    }
}

/// Let `player` take one shot at `engagement`. Returns `None` when the player
/// has nothing left to shoot at.
pub fn take_turn(
    player: &mut dyn Player,
    engagement: &mut Engagement,
    rng: &mut SmallRng,
) -> Result<Option<ShotReport>, GridError> {
    let Some(index) = player.select_target(rng, engagement.grid()) else {
        return Ok(None);
    };
    let report = engagement.fire(index)?;
    player.handle_shot_result(index, report.outcome);
    Ok(Some(report))
}

/// Let `player` shoot until the fleet is destroyed or `max_shots` is reached.
pub fn run_hunt(
    player: &mut dyn Player,
    engagement: &mut Engagement,
    rng: &mut SmallRng,
    max_shots: usize,
) -> Result<HuntReport, GridError> {
    while !engagement.is_over() && engagement.shots() < max_shots {
        if take_turn(player, engagement, rng)?.is_none() {
            break;
        }
    }
    Ok(engagement.report())
}
