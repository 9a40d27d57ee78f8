//! Monte-Carlo sampling of fleet configurations consistent with the shots
//! recorded on a grid.

use std::collections::BTreeSet;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::common::SampleError;
use crate::config::SamplerConfig;
use crate::grid::Grid;
use crate::placement::Placement;

/// Cells occupied by every live ship in one sampled fleet layout. In target
/// mode ships may share cells, so an index can appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    cells: Vec<usize>,
}

impl Configuration {
    pub fn new(cells: Vec<usize>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

/// Draws random fleet layouts that agree with the hit, miss and sunk evidence
/// on a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    /// Remove from `fleet` every ship length the grid shows as sunk, moving
    /// the matched hits into the grid's sunk set. Returns the removed lengths.
    pub fn remove_sunk(grid: &mut Grid, fleet: &mut Vec<usize>) -> Vec<usize> {
        let Some(max_length) = fleet.iter().copied().max() else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        fleet.retain(|&length| {
            if grid.resolve_sunk(length, max_length) {
                removed.push(length);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Placements of a ship of `length` that avoid misses, sunk ships and
    /// their halos. Unresolved hits are ignored.
    pub fn placements(grid: &Grid, length: usize) -> Vec<Placement> {
        let sunk = grid.sunk_positions();
        grid.enumerate_placements(length)
            .into_iter()
            .filter(|p| {
                !p.positions
                    .iter()
                    .chain(&p.adjacent)
                    .any(|i| sunk.contains(i))
            })
            .collect()
    }

    /// Legal placements of a ship of `length` given the evidence on `grid`.
    ///
    /// Placements touching a sunk ship are dropped. While hits are
    /// unresolved, a placement must cover every unresolved hit, or lie
    /// entirely on hit cells when the ship is shorter than the hit count.
    pub fn candidates(grid: &Grid, length: usize) -> Vec<Placement> {
        let hits = grid.hit_positions();
        Self::placements(grid, length)
            .into_iter()
            .filter(|p| hits.is_empty() || explains_hits(hits, &p.positions))
            .collect()
    }

    /// Sample `trials` configurations of the live `fleet`.
    ///
    /// Ships shown as sunk are first removed from `fleet`. In hunt mode (no
    /// unresolved hit) ships within a configuration may neither overlap nor
    /// touch; a conflicting draw is discarded and retried. In target mode each
    /// ship is drawn independently from its hit-consistent placements, and a
    /// ship that cannot cover the hits is left out of the configurations.
    ///
    /// Fails with [`SampleError::NoValidPlacement`] when a live ship fits
    /// nowhere on the grid, or when no live ship can cover the hits.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        fleet: &mut Vec<usize>,
        rng: &mut R,
    ) -> Result<Vec<Configuration>, SampleError> {
        Self::remove_sunk(grid, fleet);
        let grid: &Grid = grid;

        let hunting = !grid.has_unresolved_hits();
        let mut pools = Vec::with_capacity(fleet.len());
        for &length in fleet.iter() {
            let pool = Self::candidates(grid, length);
            if !pool.is_empty() {
                pools.push(pool);
            } else if hunting || Self::placements(grid, length).is_empty() {
                warn!("no placement left for ship of length {}", length);
                return Err(SampleError::NoValidPlacement { length });
            } else {
                debug!("ship of length {} cannot cover the hits, skipped", length);
            }
        }
        if let Some(&length) = fleet.iter().min() {
            if pools.is_empty() {
                warn!("no live ship covers the unresolved hits");
                return Err(SampleError::NoValidPlacement { length });
            }
        }

        let requested = self.config.trials;
        let budget = self.config.attempt_budget();
        let mut order: Vec<usize> = (0..pools.len()).collect();
        // Cells claimed in the current attempt carry the attempt number.
        let mut claimed = vec![0usize; grid.len()];
        let mut configurations = Vec::with_capacity(requested);
        let mut attempts = 0;

        while configurations.len() < requested {
            if attempts == budget {
                warn!(
                    "sampling gave up after {} attempts with {}/{} configurations",
                    attempts,
                    configurations.len(),
                    requested
                );
                return Err(SampleError::Exhausted {
                    requested,
                    accepted: configurations.len(),
                    attempts,
                });
            }
            attempts += 1;
            order.shuffle(rng);

            let mut cells = Vec::new();
            let mut conflict = false;
            for &ship in &order {
                let pool = &pools[ship];
                let placement = &pool[rng.random_range(0..pool.len())];
                if hunting
                    && placement
                        .positions
                        .iter()
                        .chain(&placement.adjacent)
                        .any(|&i| claimed[i] == attempts)
                {
                    conflict = true;
                    break;
                }
                for &index in &placement.positions {
                    claimed[index] = attempts;
                }
                cells.extend_from_slice(&placement.positions);
            }
            if !conflict {
                configurations.push(Configuration { cells });
            }
        }

        debug!(
            "sampled {} configurations of {} ships in {} attempts",
            configurations.len(),
            pools.len(),
            attempts
        );
        Ok(configurations)
    }
}

/// Exact-match test between a placement and the unresolved hits, compared in
/// the direction of the smaller set.
fn explains_hits(hits: &BTreeSet<usize>, positions: &[usize]) -> bool {
    if hits.len() <= positions.len() {
        hits.iter().all(|i| positions.contains(i))
    } else {
        positions.iter().all(|i| hits.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explains_hits_compares_against_smaller_set() {
        let hits: BTreeSet<usize> = [3, 4].into_iter().collect();
        assert!(explains_hits(&hits, &[2, 3, 4]));
        assert!(!explains_hits(&hits, &[4, 5, 6]));
        assert!(explains_hits(&hits, &[4]));
        assert!(!explains_hits(&hits, &[5]));
    }
}
