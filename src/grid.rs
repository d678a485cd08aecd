use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::climb::optimize_teams;
use crate::config::{OptimizerConfig, WeightRange};
use crate::error::Result;
use crate::model::condition::{Score, Weights};
use crate::model::team::Table;
use crate::roster::Roster;

/// Absolute slack on every range bound. Grid points are computed as
/// `min + i * step` rather than by repeated addition, and a point within this
/// distance of a bound counts as inside, so both bounds are inclusive.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub table: Table,
    pub score: Score,
    pub weights: Weights,
}

impl RankedResult {
    /// The best `n` entries of a ranked result list.
    pub fn top(results: &[RankedResult], n: usize) -> &[RankedResult] {
        &results[..n.min(results.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStep {
    pub progress: Progress,
    pub result: RankedResult,
}

/// Every `(s, g, b)` with `s` in `[min, max]`, `g` in `[min, max - s]` and
/// `b = 1 - s - g` in `[min, max]`.
pub fn weight_combinations(range: &WeightRange) -> Result<Vec<Weights>> {
    range.validate()?;
    let point = |i: usize| range.min + i as f64 * range.step;
    let mut combos = Vec::new();

    let mut i = 0;
    while point(i) <= range.max + BOUNDARY_EPSILON {
        let s = point(i);
        let mut j = 0;
        while point(j) <= range.max - s + BOUNDARY_EPSILON {
            let g = point(j);
            let b = 1.0 - s - g;
            if b >= range.min - BOUNDARY_EPSILON && b <= range.max + BOUNDARY_EPSILON {
                combos.push(Weights::new(s, g, b.clamp(range.min, range.max)));
            }
            j += 1;
        }
        i += 1;
    }
    Ok(combos)
}

fn run_cell(roster: &Roster, config: &OptimizerConfig, weights: Weights, seed: u64) -> Result<RankedResult> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let result = optimize_teams(roster, &weights, config, &mut rng)?;
    Ok(RankedResult { table: result.table, score: result.score, weights })
}

/// Lazy sweep over the weight grid, one independent local search per cell.
///
/// Each cell's RNG is seeded from the caller's RNG when the sweep is built,
/// so the outcome of a cell does not depend on how far the sweep is consumed.
/// The sweep is finite and cannot be restarted; dropping it early leaves the
/// results already yielded valid.
pub struct GridSearch<'a> {
    roster: &'a Roster,
    config: OptimizerConfig,
    cells: std::vec::IntoIter<(Weights, u64)>,
    progress: Progress,
}

impl<'a> GridSearch<'a> {
    pub fn new<R: Rng + ?Sized>(roster: &'a Roster, config: OptimizerConfig, rng: &mut R) -> Result<GridSearch<'a>> {
        config.validate_team_count(roster.len())?;
        let cells = weight_combinations(&config.weight_range)?
            .into_iter()
            .map(|weights| (weights, rng.gen::<u64>()))
            .collect::<Vec<_>>();
        info!(cells = cells.len(), members = roster.len(), teams = config.team_count, "starting weight grid search");
        Ok(GridSearch {
            roster,
            config,
            progress: Progress { current: 0, total: cells.len() },
            cells: cells.into_iter(),
        })
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }
}

impl<'a> Iterator for GridSearch<'a> {
    type Item = Result<GridStep>;

    fn next(&mut self) -> Option<Self::Item> {
        let (weights, seed) = self.cells.next()?;
        let result = match run_cell(self.roster, &self.config, weights, seed) {
            Ok(result) => result,
            Err(err) => return Some(Err(err)),
        };
        self.progress.current += 1;
        debug!(
            current = self.progress.current,
            total = self.progress.total,
            score = result.score,
            ?weights,
            "grid cell done"
        );
        Some(Ok(GridStep { progress: self.progress, result }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

fn rank(mut results: Vec<RankedResult>) -> Vec<RankedResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    if let Some(best) = results.first() {
        info!(score = best.score, weights = ?best.weights, "weight grid search finished");
    }
    results
}

/// Runs the whole grid and returns its results, best score first.
pub fn weight_grid_search<R: Rng + ?Sized>(roster: &Roster, config: OptimizerConfig, rng: &mut R) -> Result<Vec<RankedResult>> {
    weight_grid_search_with_progress(roster, config, rng, |_| {})
}

/// Like [`weight_grid_search`], reporting `(current, total)` after every cell.
pub fn weight_grid_search_with_progress<R, F>(
    roster: &Roster,
    config: OptimizerConfig,
    rng: &mut R,
    mut on_progress: F,
) -> Result<Vec<RankedResult>>
where
    R: Rng + ?Sized,
    F: FnMut(Progress),
{
    let results = GridSearch::new(roster, config, rng)?
        .map(|step| {
            let step = step?;
            on_progress(step.progress);
            Ok(step.result)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rank(results))
}

/// Parallel grid search on the rayon pool. Returns the same ranking as
/// [`weight_grid_search`] for an RNG in the same state.
#[cfg(feature = "parallel")]
pub fn par_weight_grid_search<R: Rng + ?Sized>(roster: &Roster, config: OptimizerConfig, rng: &mut R) -> Result<Vec<RankedResult>> {
    use rayon::prelude::*;

    let search = GridSearch::new(roster, config, rng)?;
    let cells = search.cells.collect::<Vec<_>>();
    let results = cells
        .into_par_iter()
        .map(|(weights, seed)| run_cell(roster, &config, weights, seed))
        .collect::<Result<Vec<_>>>()?;
    Ok(rank(results))
}
