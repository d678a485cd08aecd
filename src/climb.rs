use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, trace};

use crate::action::{Action, Index, Position};
use crate::config::OptimizerConfig;
use crate::error::{OptimizeError, Result};
use crate::model::condition::{Score, Weights};
use crate::model::entity::Id;
use crate::model::team::Table;
use crate::roster::Roster;
use crate::score::score_assignment;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub table: Table,
    pub score: Score,
}

struct State {
    table: Table,
    score: Score,
    n_iterations: usize,
    n_improvements: usize,
}

/// Shuffles `ids` and deals them round-robin from the back of the shuffled
/// list, so team sizes differ by at most one. `team_count` must be between
/// one and the number of ids.
pub fn random_partition<R: Rng + ?Sized>(ids: impl IntoIterator<Item = Id>, team_count: usize, rng: &mut R) -> Result<Table> {
    let mut shuffled = ids.into_iter().collect::<Vec<_>>();
    if team_count == 0 || team_count > shuffled.len() {
        return Err(OptimizeError::InvalidConfiguration(format!(
            "team count {} must be between 1 and the number of members {}", team_count, shuffled.len()
        )));
    }
    shuffled.shuffle(rng);
    let mut table = Table::with_team_count(team_count);
    let mut i = 0;
    while let Some(id) = shuffled.pop() {
        table.teams[i % team_count].members.push(id);
        i += 1;
    }
    Ok(table)
}

/// Draws swaps between two distinct non-empty teams. Swaps never change
/// team sizes, so the sizes seen at construction stay valid for the whole search.
pub struct SwapGenerator {
    sizes: Vec<Index>,
    n_swappable: usize,
}

impl SwapGenerator {
    pub fn new(table: &Table) -> SwapGenerator {
        let sizes = table.sizes();
        let n_swappable = sizes.iter().filter(|size| **size > 0).count();
        SwapGenerator { sizes, n_swappable }
    }

    /// `None` when fewer than two teams have members to swap.
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Action> {
        if self.n_swappable < 2 {
            return None;
        }
        let n_teams = self.sizes.len();
        let (t1, t2) = loop {
            let t1 = rng.gen_range(0..n_teams);
            let t2 = rng.gen_range(0..n_teams);
            if t1 != t2 && self.sizes[t1] > 0 && self.sizes[t2] > 0 {
                break (t1, t2);
            }
        };
        Some(Action::Swap(
            Position { team_index: t1, member_index: rng.gen_range(0..self.sizes[t1]) },
            Position { team_index: t2, member_index: rng.gen_range(0..self.sizes[t2]) },
        ))
    }
}

/// A random single-swap neighbor of `table`.
pub fn random_neighbor<R: Rng + ?Sized>(table: &Table, rng: &mut R) -> Option<Table> {
    let action = SwapGenerator::new(table).next(rng)?;
    let mut neighbor = table.clone();
    neighbor.act(&action).ok()?;
    Some(neighbor)
}

/// Strict-improvement hill climbing over random swaps.
///
/// Runs exactly `max_iterations` trials. Each swap is applied in place and
/// undone unless it strictly raises the score, so equal or worse candidates
/// are never accepted and the search can stall in a local optimum. A table
/// with fewer than two non-empty teams has no neighbors and is returned as is.
pub fn local_search<R: Rng + ?Sized>(
    table: Table,
    roster: &Roster,
    weights: &Weights,
    max_iterations: usize,
    rng: &mut R,
) -> Result<SearchResult> {
    let score = score_assignment(&table, roster, weights)?;
    let generator = SwapGenerator::new(&table);
    let mut state = State { table, score, n_iterations: 0, n_improvements: 0 };

    while state.n_iterations < max_iterations {
        let Some(action) = generator.next(rng) else { break };
        state.n_iterations += 1;
        state.table.act(&action)?;
        let candidate = score_assignment(&state.table, roster, weights)?;
        if candidate > state.score {
            trace!(iteration = state.n_iterations, from = state.score, to = candidate, "accepted swap");
            state.score = candidate;
            state.n_improvements += 1;
        } else {
            state.table.act(&action)?;
        }
    }

    debug!(
        iterations = state.n_iterations,
        improvements = state.n_improvements,
        score = state.score,
        "local search finished"
    );
    Ok(SearchResult { table: state.table, score: state.score })
}

/// Local search from a fresh random partition of the whole roster.
pub fn optimize_teams<R: Rng + ?Sized>(
    roster: &Roster,
    weights: &Weights,
    config: &OptimizerConfig,
    rng: &mut R,
) -> Result<SearchResult> {
    config.validate_team_count(roster.len())?;
    if !weights.is_valid() {
        return Err(OptimizeError::InvalidConfiguration(format!(
            "weights {:?} must be finite and non-negative", weights
        )));
    }
    let table = random_partition(roster.ids(), config.team_count, rng)?;
    local_search(table, roster, weights, config.max_iterations, rng)
}
