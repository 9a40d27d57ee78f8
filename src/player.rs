use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    common::{GridError, ShotOutcome},
    config::SamplerConfig,
    grid::Grid,
    heatmap::Heatmap,
    sampler::Sampler,
    ship::Ship,
};

/// Interface implemented by different player types.
pub trait Player {
    /// Place a fleet of the given lengths onto the provided grid.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        grid: &mut Grid,
        lengths: &[usize],
    ) -> Result<Vec<Ship>, GridError> {
        grid.place_fleet_randomly(lengths, rng)
    }

    /// Choose the next cell to shoot on the opponent's grid. Returns `None`
    /// when every cell has been targeted.
    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Grid) -> Option<usize>;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _index: usize, _outcome: ShotOutcome) {}
}

/// Pick a uniformly random untargeted cell.
pub fn random_target<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<usize> {
    let open = grid.untargeted();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

/// AI player that targets the most probable cell of a Monte-Carlo heat-map.
///
/// The AI keeps its own board of the shots it has seen on the opponent's grid
/// and resolves sunk ships there, so the defender's grid is only read.
pub struct AiPlayer {
    sampler: Sampler,
    fleet: Vec<usize>,
    board: Option<Grid>,
    last_heatmap: Option<Heatmap>,
}

impl AiPlayer {
    /// `fleet` lists the lengths of the opponent's ships.
    pub fn new(config: SamplerConfig, fleet: Vec<usize>) -> Self {
        Self {
            sampler: Sampler::new(config),
            fleet,
            board: None,
            last_heatmap: None,
        }
    }

    /// Lengths of opponent ships not yet known to be sunk.
    pub fn live_fleet(&self) -> &[usize] {
        &self.fleet
    }

    /// Evidence gathered on the opponent's grid, once the AI has aimed.
    pub fn board(&self) -> Option<&Grid> {
        self.board.as_ref()
    }

    /// Heat-map behind the most recent targeting decision.
    pub fn last_heatmap(&self) -> Option<&Heatmap> {
        self.last_heatmap.as_ref()
    }
}

/// First untargeted cell orthogonally next to an unresolved hit.
fn open_end(board: &Grid) -> Option<usize> {
    board.hit_positions().iter().find_map(|&hit| {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(|(dr, dc)| board.offset(hit, dr, dc))
            .find(|&i| !board.is_targeted(i))
    })
}

impl Player for AiPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Grid) -> Option<usize> {
        let board = self
            .board
            .get_or_insert_with(|| Grid::new(enemy.height(), enemy.width()));
        if let Err(e) = board.observe(enemy) {
            warn!("{}; falling back to a random cell", e);
            self.last_heatmap = None;
            return random_target(enemy, rng);
        }
        match self.sampler.sample(board, &mut self.fleet, rng) {
            Ok(configurations) => {
                let heatmap = Heatmap::aggregate(board, &configurations);
                let mut best = heatmap.best();
                // Hits no live ship can extend belong to a complete ship;
                // shooting beside them bounds it so it can be resolved.
                if board.has_unresolved_hits() && best.is_some_and(|i| heatmap.count(i) == 0) {
                    debug!("no live ship extends the hits, probing their open ends");
                    best = open_end(board).or(best);
                }
                self.last_heatmap = Some(heatmap);
                best
            }
            Err(e) => {
                warn!("{}; falling back to a random cell", e);
                self.last_heatmap = None;
                random_target(board, rng)
            }
        }
    }
}

/// Baseline player shooting uniformly at random.
#[derive(Default)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Grid) -> Option<usize> {
        random_target(enemy, rng)
    }
}
