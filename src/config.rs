//! Board dimensions, fleet definition and sampler defaults.

/// Default number of rows of a board.
pub const HEIGHT: usize = 10;
/// Default number of columns of a board.
pub const WIDTH: usize = 10;

/// Number of Monte-Carlo configurations sampled per targeting decision.
pub const DEFAULT_TRIALS: usize = 10_000;
/// Conflict retries allowed per requested configuration before a sampling
/// round gives up.
pub const MAX_ATTEMPTS_PER_TRIAL: usize = 1_000;
/// Random anchors tried per ship before random fleet placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;
/// Highest value of a normalised heat-map cell.
pub const HEAT_LEVELS: u8 = 15;

/// A named class of ship and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Submarine", 1),
    ShipClass::new("Frigate", 2),
    ShipClass::new("Destroyer", 3),
    ShipClass::new("Cruiser", 4),
    ShipClass::new("Battleship", 5),
];

/// Lengths of the standard fleet, in placement order.
pub fn fleet_lengths() -> Vec<usize> {
    FLEET.iter().map(ShipClass::length).collect()
}

/// Name of the standard ship class with the given length, if any.
pub fn ship_class(length: usize) -> Option<&'static str> {
    FLEET
        .iter()
        .find(|class| class.length() == length)
        .map(ShipClass::name)
}

/// Tuning of a Monte-Carlo sampling round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Configurations to collect per round.
    pub trials: usize,
    /// Conflict retries budgeted per requested configuration.
    pub max_attempts_per_trial: usize,
}

impl SamplerConfig {
    pub fn with_trials(trials: usize) -> Self {
        Self {
            trials,
            ..Self::default()
        }
    }

    /// Total number of trial attempts allowed in one round.
    pub fn attempt_budget(&self) -> usize {
        self.trials.saturating_mul(self.max_attempts_per_trial).max(1)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            max_attempts_per_trial: MAX_ATTEMPTS_PER_TRIAL,
        }
    }
}
