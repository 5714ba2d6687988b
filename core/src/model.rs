/// Model configuration, per-slot learner state, and the owning model type.
///
/// The six state arrays are plain parallel Vec<f64>s over the hashed slot
/// space — the whole model is n+1 slots of six numbers plus seven
/// hyperparameters. Everything else in the crate is free functions that
/// read and mutate this aggregate.

use serde::{Deserialize, Serialize};

use crate::data::SparseRows;
use crate::indexer::compute_indices;
use crate::predict::predict_one;
use crate::train;
use crate::update::update_one;

/// Hyperparameters — immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FtrlConfig {
    /// Per-coordinate learning-rate scale.
    pub alpha: f64,
    /// Exponential time-decay rate applied to `d` and `h` every update.
    pub gamma: f64,
    /// L1 regularization strength (soft-threshold width).
    pub l1: f64,
    /// L2 regularization strength.
    pub l2: f64,
    /// Hashed slot-space size. Slot n itself is the bias slot.
    pub n: usize,
    /// Number of passes over the data.
    pub epoch: usize,
    /// Whether to hash pairwise interaction features.
    pub interaction: bool,
}

impl Default for FtrlConfig {
    fn default() -> Self {
        FtrlConfig {
            alpha: 0.01,
            gamma: 0.0005,
            l1: 1.0,
            l2: 1.0,
            n: 1 << 20,
            epoch: 1,
            interaction: true,
        }
    }
}

impl FtrlConfig {
    /// Validate hyperparameter ranges. Fatal at construction.
    ///
    /// The negated comparisons also reject NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0) {
            return Err(ConfigError::NonPositive { param: "alpha", value: self.alpha });
        }
        if !(self.gamma >= 0.0) {
            return Err(ConfigError::Negative { param: "gamma", value: self.gamma });
        }
        if !(self.l1 >= 0.0) {
            return Err(ConfigError::Negative { param: "l1", value: self.l1 });
        }
        if !(self.l2 >= 0.0) {
            return Err(ConfigError::Negative { param: "l2", value: self.l2 });
        }
        if self.n == 0 {
            return Err(ConfigError::ZeroSlots);
        }
        if self.epoch == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        Ok(())
    }

    /// Test configuration: tiny slot space for exact-value tests.
    pub fn test_config() -> Self {
        FtrlConfig { n: 16, interaction: false, ..FtrlConfig::default() }
    }
}

impl std::fmt::Display for FtrlConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ftrl_proximal(alpha={}, gamma={}, l1={}, l2={}, n={}, epoch={}, interaction={})",
            self.alpha, self.gamma, self.l1, self.l2, self.n, self.epoch, self.interaction
        )
    }
}

/// Invalid hyperparameter, reported at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositive { param: &'static str, value: f64 },
    Negative { param: &'static str, value: f64 },
    ZeroSlots,
    ZeroEpochs,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { param, value } => {
                write!(f, "{param} must be positive, got {value}")
            }
            ConfigError::Negative { param, value } => {
                write!(f, "{param} must be non-negative, got {value}")
            }
            ConfigError::ZeroSlots => write!(f, "n must be at least 1"),
            ConfigError::ZeroEpochs => write!(f, "epoch must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime failures on the training and prediction paths.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Feature rows and targets disagree on example count.
    DimensionMismatch { rows: usize, targets: usize },
    /// A computed slot index fell outside the state arrays. Indicates a
    /// defect in the indexer or hash; reported, never silently clamped.
    SlotOutOfRange { slot: usize, limit: usize },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DimensionMismatch { rows, targets } => {
                write!(f, "{rows} feature rows but {targets} targets")
            }
            ModelError::SlotOutOfRange { slot, limit } => {
                write!(f, "slot {slot} outside state arrays of length {limit}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

// ── Per-slot state ───────────────────────────────────────────────────

/// Per-slot accumulator arrays. All six share length n+1; slot n is the
/// permanently reserved bias slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FtrlState {
    /// Cumulative squared residuals (adaptive-rate denominator).
    pub u: Vec<f64>,
    /// Decayed cumulative per-coordinate rate increment.
    pub d: Vec<f64>,
    /// Cumulative raw residuals.
    pub v: Vec<f64>,
    /// Decayed cumulative weighted-rate term.
    pub h: Vec<f64>,
    /// Dual residual v - h; drives the proximal threshold.
    pub z: Vec<f64>,
    /// Materialized weight, overwritten on every prediction touching the slot.
    pub w: Vec<f64>,
}

impl FtrlState {
    /// All-zero state over n hash slots plus the bias slot.
    pub fn new(n: usize) -> Self {
        FtrlState {
            u: vec![0.0; n + 1],
            d: vec![0.0; n + 1],
            v: vec![0.0; n + 1],
            h: vec![0.0; n + 1],
            z: vec![0.0; n + 1],
            w: vec![0.0; n + 1],
        }
    }

    /// Array length shared by all six accumulators (n + 1).
    pub fn slots(&self) -> usize {
        self.w.len()
    }
}

// ── The model ────────────────────────────────────────────────────────

/// The learner: exclusively owns its configuration and per-slot state.
///
/// Single-threaded by construction — each example's update mutates slot
/// state the next example's prediction reads, so rows cannot be reordered
/// or parallelized without changing the algorithm.
#[derive(Clone, Debug)]
pub struct FtrlModel {
    pub config: FtrlConfig,
    pub state: FtrlState,
}

impl FtrlModel {
    /// Build a model from a validated configuration.
    pub fn new(config: FtrlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = FtrlState::new(config.n);
        Ok(FtrlModel { config, state })
    }

    /// Slot sequence for one example: bias, raw features, interactions.
    pub fn indices(&self, x: &[u32]) -> Vec<usize> {
        compute_indices(x, self.config.n, self.config.interaction)
    }

    /// Predict the probability for one example.
    ///
    /// Side-effecting read: materializes `w` at every touched slot.
    pub fn predict_one(&mut self, x: &[u32]) -> Result<f64, ModelError> {
        predict_one(&self.config, &mut self.state, x)
    }

    /// Apply one residual update. Must follow `predict_one` on the same x.
    pub fn update_one(&mut self, x: &[u32], e: f64) -> Result<(), ModelError> {
        update_one(&self.config, &mut self.state, x, e)
    }

    /// Train over all rows for the configured number of epochs.
    /// Returns the mean logistic loss of each epoch's pre-update predictions.
    pub fn fit(&mut self, x: &SparseRows, y: &[f64]) -> Result<Vec<f64>, ModelError> {
        train::fit(&self.config, &mut self.state, x, y)
    }

    /// Batch prediction, row order preserved. Carries the same
    /// weight-materializing side effect as training; there is no separate
    /// read-only mode.
    pub fn predict(&mut self, x: &SparseRows) -> Result<Vec<f64>, ModelError> {
        train::predict(&self.config, &mut self.state, x)
    }
}
