use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::climb::{optimize_teams, SearchResult};
use crate::config::OptimizerConfig;
use crate::error::Result;
use crate::grid::{self, GridSearch, Progress, RankedResult};
use crate::model::condition::Weights;
use crate::roster::Roster;

/// Roster, configuration and random source for repeated optimization runs.
pub struct TeamOptimizer<R: Rng = SmallRng> {
    roster: Roster,
    config: OptimizerConfig,
    rng: R,
}

impl TeamOptimizer<SmallRng> {
    pub fn new(roster: Roster, config: OptimizerConfig) -> Result<Self> {
        TeamOptimizer::with_rng(roster, config, SmallRng::from_entropy())
    }
}

impl<R: Rng> TeamOptimizer<R> {
    pub fn with_rng(roster: Roster, config: OptimizerConfig, rng: R) -> Result<Self> {
        config.validate_team_count(roster.len())?;
        config.weight_range.validate()?;
        Ok(TeamOptimizer { roster, config, rng })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// One local search with fixed weights.
    pub fn optimize(&mut self, weights: &Weights) -> Result<SearchResult> {
        optimize_teams(&self.roster, weights, &self.config, &mut self.rng)
    }

    /// Incremental weight grid search.
    pub fn grid(&mut self) -> Result<GridSearch<'_>> {
        GridSearch::new(&self.roster, self.config, &mut self.rng)
    }

    pub fn grid_search(&mut self) -> Result<Vec<RankedResult>> {
        grid::weight_grid_search(&self.roster, self.config, &mut self.rng)
    }

    pub fn grid_search_with_progress<F: FnMut(Progress)>(&mut self, on_progress: F) -> Result<Vec<RankedResult>> {
        grid::weight_grid_search_with_progress(&self.roster, self.config, &mut self.rng, on_progress)
    }

    #[cfg(feature = "parallel")]
    pub fn par_grid_search(&mut self) -> Result<Vec<RankedResult>> {
        grid::par_weight_grid_search(&self.roster, self.config, &mut self.rng)
    }
}
