//! Probability heat-map over sampled configurations and next-target choice.

use core::fmt;

use crate::config::HEAT_LEVELS;
use crate::grid::Grid;
use crate::sampler::Configuration;

/// Per-cell occupancy tally of a sampling round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    height: usize,
    width: usize,
    counts: Vec<u32>,
    levels: Vec<u8>,
    best: Option<usize>,
}

impl Heatmap {
    /// Tally how often each cell is occupied across `configurations`.
    ///
    /// Cells already hit are forced to zero. The best cell is the first
    /// untargeted cell with the highest count, or the first untargeted cell if
    /// every count is zero; `None` only when the whole grid was shot at.
    /// Levels scale counts into `0..=HEAT_LEVELS` relative to the maximum.
    pub fn aggregate(grid: &Grid, configurations: &[Configuration]) -> Self {
        let mut counts = vec![0u32; grid.len()];
        for configuration in configurations {
            for &index in configuration.cells() {
                if let Some(count) = counts.get_mut(index) {
                    *count += 1;
                }
            }
        }
        for &index in grid.hit_positions() {
            counts[index] = 0;
        }

        let best = (0..counts.len())
            .filter(|&i| !grid.is_targeted(i))
            .fold(None, |best: Option<usize>, i| match best {
                Some(b) if counts[b] >= counts[i] => Some(b),
                _ => Some(i),
            });

        let max = counts.iter().copied().max().unwrap_or(0);
        let levels = counts
            .iter()
            .map(|&count| scale(count, max))
            .collect();

        Self {
            height: grid.height(),
            width: grid.width(),
            counts,
            levels,
            best,
        }
    }

    pub fn best(&self) -> Option<usize> {
        self.best
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Normalised heat levels, one per cell.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn count(&self, index: usize) -> u32 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn level(&self, index: usize) -> u8 {
        self.levels.get(index).copied().unwrap_or(0)
    }
}

/// `ceil(count / max * HEAT_LEVELS)`, or zero when nothing was counted.
fn scale(count: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let scaled = (u64::from(count) * u64::from(HEAT_LEVELS)).div_ceil(u64::from(max));
    scaled as u8
}

impl fmt::Display for Heatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.width {
            write!(f, " {}", (b'A' + (c % 26) as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..self.height {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..self.width {
                write!(f, " {:X}", self.levels[r * self.width + c])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
