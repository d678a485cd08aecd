//! Splits a roster of climbers into balanced teams.
//!
//! Teams are found by hill climbing over random member swaps, scored on
//! satisfied preferences, grade balance and size balance. A grid search over
//! the three objective weights picks the best-scoring configuration.

pub mod action;
pub mod climb;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod optimizer;
pub mod report;
pub mod roster;
pub mod score;

pub use climb::{local_search, optimize_teams, random_neighbor, random_partition, SearchResult};
pub use config::{OptimizerConfig, WeightRange};
pub use error::{OptimizeError, Result};
pub use grid::{weight_combinations, weight_grid_search, weight_grid_search_with_progress, GridSearch, GridStep, Progress, RankedResult};
pub use model::condition::{Score, Weights};
pub use model::entity::{Climber, Id, Member};
pub use model::team::{Table, Team};
pub use optimizer::TeamOptimizer;
pub use report::{PreferenceKind, TeamStats, UnmetPreference};
pub use roster::Roster;
pub use score::{score_assignment, ScoreBreakdown};

#[cfg(feature = "parallel")]
pub use grid::par_weight_grid_search;
