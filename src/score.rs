use serde::Serialize;

use crate::error::{OptimizeError, Result};
use crate::model::condition::{Score, Weights};
use crate::model::entity::Member;
use crate::model::team::{Table, Team};
use crate::roster::Roster;

/// Population variance (divides by N).
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

impl Team {
    pub(crate) fn resolve<'a>(&self, roster: &'a Roster) -> Result<Vec<&'a Member>> {
        self.members.iter().map(|&id| {
            roster.get(id).ok_or_else(|| {
                OptimizeError::InvalidRoster(format!("member {} is not in the roster", id))
            })
        }).collect()
    }

    /// Mean `avg_grade` and mean `max_grade` of the resolved members.
    pub fn mean_grades(members: &[&Member]) -> (f64, f64) {
        let size = members.len() as f64;
        (
            members.iter().map(|m| m.climber.avg_grade).sum::<f64>() / size,
            members.iter().map(|m| m.climber.max_grade).sum::<f64>() / size,
        )
    }

    /// Net satisfied preferences of this team: +1 per wanted teammate,
    /// -1 per avoided teammate, counted per member.
    pub fn satisfaction(&self, members: &[&Member], team_of: &[Option<usize>], team_index: usize) -> i64 {
        let same_team = |id: usize| team_of.get(id).copied().flatten() == Some(team_index);
        members.iter().map(|member| {
            member.want_with.iter().filter(|&&id| same_team(id)).count() as i64
                - member.avoid_with.iter().filter(|&&id| same_team(id)).count() as i64
        }).sum()
    }
}

/// The raw objective terms of one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub satisfaction: i64,
    pub avg_grade_variance: f64,
    pub max_grade_variance: f64,
    pub size_variance: f64,
}

impl ScoreBreakdown {
    pub fn compute(table: &Table, roster: &Roster) -> Result<ScoreBreakdown> {
        if table.teams.is_empty() {
            return Err(OptimizeError::InvalidConfiguration("table has no teams".into()));
        }
        let team_of = table.team_of(roster.len());
        let mut satisfaction = 0;
        let mut avg_grades = Vec::with_capacity(table.teams.len());
        let mut max_grades = Vec::with_capacity(table.teams.len());

        for (team_index, team) in table.teams.iter().enumerate() {
            if team.is_empty() {
                return Err(OptimizeError::InvalidPartition { team: team_index });
            }
            let members = team.resolve(roster)?;
            let (avg_grade, max_grade) = Team::mean_grades(&members);
            avg_grades.push(avg_grade);
            max_grades.push(max_grade);
            satisfaction += team.satisfaction(&members, &team_of, team_index);
        }

        let sizes = table.teams.iter().map(|team| team.len() as f64).collect::<Vec<_>>();
        Ok(ScoreBreakdown {
            satisfaction,
            avg_grade_variance: variance(&avg_grades),
            max_grade_variance: variance(&max_grades),
            size_variance: variance(&sizes),
        })
    }

    pub fn total(&self, weights: &Weights) -> Score {
        self.satisfaction as f64 * weights.satisfaction
            - (self.avg_grade_variance + self.max_grade_variance) * weights.grade_balance
            - self.size_variance * weights.size_balance
    }
}

/// Weighted objective of an assignment. Higher is better; only comparable
/// between assignments of the same roster.
pub fn score_assignment(table: &Table, roster: &Roster, weights: &Weights) -> Result<Score> {
    Ok(ScoreBreakdown::compute(table, roster)?.total(weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Climber;

    fn table(teams: Vec<Vec<usize>>) -> Table {
        Table { teams: teams.into_iter().map(|members| Team { members }).collect() }
    }

    #[test]
    fn variance_divides_by_n() {
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
        assert_eq!(variance(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn one_sided_preference_counts_once() {
        let roster = Roster::new(vec![
            Climber::new("a", 1.0, 1.0).wants(["b"]),
            Climber::new("b", 1.0, 1.0),
            Climber::new("c", 1.0, 1.0),
            Climber::new("d", 1.0, 1.0),
        ]).unwrap();
        let together = ScoreBreakdown::compute(&table(vec![vec![0, 1], vec![2, 3]]), &roster).unwrap();
        let apart = ScoreBreakdown::compute(&table(vec![vec![0, 2], vec![1, 3]]), &roster).unwrap();
        assert_eq!(together.satisfaction, 1);
        assert_eq!(apart.satisfaction, 0);
    }

    #[test]
    fn avoided_teammates_subtract() {
        let roster = Roster::new(vec![
            Climber::new("a", 1.0, 1.0).avoids(["b"]).wants(["ghost"]),
            Climber::new("b", 1.0, 1.0).avoids(["a"]),
            Climber::new("c", 1.0, 1.0),
        ]).unwrap();
        let breakdown = ScoreBreakdown::compute(&table(vec![vec![0, 1], vec![2]]), &roster).unwrap();
        assert_eq!(breakdown.satisfaction, -2);
    }

    #[test]
    fn empty_preferences_give_zero_satisfaction() {
        let roster = Roster::new((0..6).map(|i| Climber::new(format!("c{}", i), i as f64, 2.0 * i as f64)).collect()).unwrap();
        for teams in [vec![vec![0, 1, 2], vec![3, 4, 5]], vec![vec![5], vec![0, 2], vec![1, 3, 4]]] {
            let breakdown = ScoreBreakdown::compute(&table(teams), &roster).unwrap();
            assert_eq!(breakdown.satisfaction, 0);
        }
    }

    #[test]
    fn weighted_total_combines_terms() {
        let roster = Roster::new(vec![
            Climber::new("a", 2.0, 4.0).wants(["b"]),
            Climber::new("b", 4.0, 4.0),
            Climber::new("c", 6.0, 8.0),
        ]).unwrap();
        let table = table(vec![vec![0, 1], vec![2]]);
        let breakdown = ScoreBreakdown::compute(&table, &roster).unwrap();
        // team means: avg 3 vs 6, max 4 vs 8, sizes 2 vs 1
        assert_eq!(breakdown.avg_grade_variance, 2.25);
        assert_eq!(breakdown.max_grade_variance, 4.0);
        assert_eq!(breakdown.size_variance, 0.25);

        let weights = Weights::new(2.0, 0.5, 4.0);
        let score = score_assignment(&table, &roster, &weights).unwrap();
        assert!((score - (2.0 - 6.25 * 0.5 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn scoring_is_deterministic() {
        let roster = Roster::new((0..9).map(|i| Climber::new(format!("c{}", i), (i % 4) as f64 + 0.3, i as f64 / 7.0).wants([format!("c{}", (i + 1) % 9)])).collect()).unwrap();
        let table = table(vec![vec![0, 4, 8], vec![1, 3, 5], vec![2, 6, 7]]);
        let weights = Weights::new(0.3, 0.3, 0.4);
        let first = score_assignment(&table, &roster, &weights).unwrap();
        let second = score_assignment(&table, &roster, &weights).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn table_without_teams_is_rejected() {
        let roster = Roster::new(vec![Climber::new("a", 1.0, 1.0)]).unwrap();
        assert!(matches!(
            score_assignment(&Table { teams: vec![] }, &roster, &Weights::default()),
            Err(OptimizeError::InvalidConfiguration(_)),
        ));
    }

    #[test]
    fn mean_grades_average_members() {
        let roster = Roster::new(vec![Climber::new("a", 2.0, 5.0), Climber::new("b", 4.0, 6.0)]).unwrap();
        let members = table(vec![vec![0, 1]]).teams[0].resolve(&roster).unwrap();
        assert_eq!(Team::mean_grades(&members), (3.0, 5.5));
    }

    #[test]
    fn empty_team_is_an_invalid_partition() {
        let roster = Roster::new(vec![Climber::new("a", 1.0, 1.0), Climber::new("b", 1.0, 1.0)]).unwrap();
        assert_eq!(
            score_assignment(&table(vec![vec![0, 1], vec![]]), &roster, &Weights::default()),
            Err(OptimizeError::InvalidPartition { team: 1 }),
        );
    }
}
