use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

pub const DEFAULT_TEAM_COUNT: usize = 4;
pub const DEFAULT_MAX_ITERATIONS: usize = 20_000;

/// Bounds and step of every weight explored by the grid search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for WeightRange {
    fn default() -> Self {
        WeightRange { min: 0.1, max: 0.8, step: 0.1 }
    }
}

impl WeightRange {
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(OptimizeError::InvalidConfiguration(format!("weight range {:?} is not finite", self)));
        }
        if self.min < 0.0 {
            return Err(OptimizeError::InvalidConfiguration(format!("weight range min {} is negative", self.min)));
        }
        if self.min > self.max {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "weight range min {} is greater than max {}", self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(OptimizeError::InvalidConfiguration(format!("weight step {} must be positive", self.step)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub team_count: usize,
    pub max_iterations: usize,
    pub weight_range: WeightRange,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            team_count: DEFAULT_TEAM_COUNT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weight_range: WeightRange::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.team_count = team_count;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_weight_range(mut self, weight_range: WeightRange) -> Self {
        self.weight_range = weight_range;
        self
    }

    pub fn validate_team_count(&self, roster_len: usize) -> Result<()> {
        if self.team_count == 0 || self.team_count > roster_len {
            return Err(OptimizeError::InvalidConfiguration(format!(
                "team count {} must be between 1 and the roster size {}", self.team_count, roster_len
            )));
        }
        Ok(())
    }
}
