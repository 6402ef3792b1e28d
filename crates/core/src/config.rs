//! Mining configuration and its fluent, validating builder.

use crate::cancellation::CancellationToken;
use crate::error::{MiningError, Result};

/// Parameters governing a single mining run.
///
/// Construct via [`MiningConfig::builder`]; there is no public constructor
/// that skips validation.
#[derive(Debug, Clone)]
pub struct MiningConfig {
    radius: f64,
    min_prevalence: f64,
    coarse_pruning: bool,
    grid_size: Option<f64>,
    max_instances_per_pattern: usize,
    cancellation: Option<CancellationToken>,
}

impl MiningConfig {
    pub fn builder() -> MiningConfigBuilder {
        MiningConfigBuilder::new()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn min_prevalence(&self) -> f64 {
        self.min_prevalence
    }

    pub fn coarse_pruning(&self) -> bool {
        self.coarse_pruning
    }

    /// Side length of a coarse grid cell. Defaults to twice the radius
    /// when not set explicitly.
    pub fn grid_size(&self) -> f64 {
        self.grid_size.unwrap_or(self.radius * 2.0)
    }

    pub fn max_instances_per_pattern(&self) -> usize {
        self.max_instances_per_pattern
    }

    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancellation {
            Some(token) if token.is_cancelled() => Err(MiningError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Fluent builder for [`MiningConfig`].
#[derive(Debug, Clone)]
pub struct MiningConfigBuilder {
    radius: f64,
    min_prevalence: f64,
    coarse_pruning: bool,
    grid_size: Option<f64>,
    max_instances_per_pattern: usize,
    cancellation: Option<CancellationToken>,
}

impl Default for MiningConfigBuilder {
    fn default() -> Self {
        Self {
            radius: 0.0,
            min_prevalence: 0.0,
            coarse_pruning: true,
            grid_size: None,
            max_instances_per_pattern: 1_000_000,
            cancellation: None,
        }
    }
}

impl MiningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the neighborhood radius. Required; must be positive and finite.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the minimum participation index (θ) a pattern must reach to be
    /// reported. Required; must lie in `[0, 1]`.
    pub fn min_prevalence(mut self, min_prevalence: f64) -> Self {
        self.min_prevalence = min_prevalence;
        self
    }

    /// Enables or disables the coarse-grid multi-resolution pruner.
    /// Enabled by default.
    pub fn coarse_pruning(mut self, enabled: bool) -> Self {
        self.coarse_pruning = enabled;
        self
    }

    /// Overrides the coarse grid cell size. Defaults to `2 * radius`.
    pub fn grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = Some(grid_size);
        self
    }

    /// Caps the number of witnessing instances kept per pattern, guarding
    /// against combinatorial blowup on dense inputs.
    pub fn max_instances_per_pattern(mut self, max: usize) -> Self {
        self.max_instances_per_pattern = max;
        self
    }

    /// Attaches a [`CancellationToken`] the engine polls between phases.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn build(self) -> Result<MiningConfig> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MiningError::InvalidRadius(self.radius));
        }
        if !(0.0..=1.0).contains(&self.min_prevalence) {
            return Err(MiningError::InvalidPrevalence(self.min_prevalence));
        }
        if let Some(grid_size) = self.grid_size
            && (!grid_size.is_finite() || grid_size <= 0.0)
        {
            return Err(MiningError::InvalidRadius(grid_size));
        }

        Ok(MiningConfig {
            radius: self.radius,
            min_prevalence: self.min_prevalence,
            coarse_pruning: self.coarse_pruning,
            grid_size: self.grid_size,
            max_instances_per_pattern: self.max_instances_per_pattern,
            cancellation: self.cancellation,
        })
    }
}
