use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use team_shuffle::{
    score_assignment, OptimizeError, OptimizerConfig, RankedResult, Roster, ScoreBreakdown, TeamOptimizer, WeightRange, Weights,
};

const ROSTER: &str = r#"[
    {"email": "ana@gym.test", "avg_grade": 5.0, "max_grade": 6.5, "want_with": ["ben@gym.test"]},
    {"email": "ben@gym.test", "avg_grade": 4.5, "max_grade": 6.0, "want_with": ["ana@gym.test"]},
    {"email": "cat@gym.test", "avg_grade": 2.0, "max_grade": 3.0, "avoid_with": ["dan@gym.test"]},
    {"email": "dan@gym.test", "avg_grade": 6.0, "max_grade": 7.5},
    {"email": "eve@gym.test", "avg_grade": 3.0, "max_grade": 4.0, "want_with": ["nobody@gym.test"]},
    {"email": "fay@gym.test", "avg_grade": 1.5, "max_grade": 2.5},
    {"email": "gus@gym.test", "avg_grade": 5.5, "max_grade": 6.0},
    {"email": "hal@gym.test", "avg_grade": 3.5, "max_grade": 5.0},
    {"email": "ivy@gym.test", "avg_grade": 2.5, "max_grade": 4.5},
    {"email": "jon@gym.test", "avg_grade": 4.0, "max_grade": 5.5}
]"#;

#[test]
fn uploaded_roster_runs_through_grid_search() {
    let roster = Roster::from_json_str(ROSTER).unwrap();
    let config = OptimizerConfig::default().with_max_iterations(2_000);
    let mut optimizer = TeamOptimizer::with_rng(roster, config, SmallRng::seed_from_u64(2024)).unwrap();

    let mut last_progress = None;
    let results = optimizer.grid_search_with_progress(|p| last_progress = Some(p)).unwrap();
    assert_eq!(last_progress.map(|p| (p.current, p.total)), Some((28, 28)));

    assert_eq!(RankedResult::top(&results, 3).len(), 3);
    let best = &results[0];
    let roster = optimizer.roster();
    assert_eq!(best.table.teams.len(), 4);
    assert!(best.table.teams.iter().all(|team| !team.is_empty()));
    assert_eq!(best.score, score_assignment(&best.table, roster, &best.weights).unwrap());

    let named = best.table.named(roster);
    let everyone = named.iter().flatten().cloned().collect::<HashSet<_>>();
    assert_eq!(everyone.len(), 10);

    // a preference for someone outside the roster can never be met
    let unmet = best.table.unmet_preferences(roster).unwrap();
    assert!(unmet.iter().any(|u| u.to_string() == "eve@gym.test wanted to be with nobody@gym.test but isn't."));

    let stats = best.table.stats(roster).unwrap();
    assert_eq!(stats.iter().map(|s| s.size).sum::<usize>(), 10);
    let breakdown = ScoreBreakdown::compute(&best.table, roster).unwrap();
    assert_eq!(stats.iter().map(|s| s.satisfaction).sum::<i64>(), breakdown.satisfaction);
}

#[test]
fn two_grade_clusters_balance_out() {
    let json = (0..8)
        .map(|i| {
            let grade = if i < 4 { 1.0 } else { 5.0 };
            format!(r#"{{"id": "c{}", "avg_grade": {}, "max_grade": {}}}"#, i, grade, grade)
        })
        .collect::<Vec<_>>()
        .join(",");
    let roster = Roster::from_json_str(&format!("[{}]", json)).unwrap();
    let config = OptimizerConfig::default().with_team_count(2);
    let mut optimizer = TeamOptimizer::with_rng(roster, config, SmallRng::seed_from_u64(17)).unwrap();

    let result = optimizer.optimize(&Weights::new(0.0, 1.0, 0.0)).unwrap();
    assert!(result.score.abs() < 1e-9);
    for stats in result.table.stats(optimizer.roster()).unwrap() {
        assert_eq!(stats.size, 4);
        assert!((stats.avg_grade - 3.0).abs() < 1e-9);
    }
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(matches!(Roster::from_json_str("[]"), Err(OptimizeError::InvalidRoster(_))));
    assert!(matches!(
        Roster::from_json_str(r#"[{"id": "a", "max_grade": 3}]"#),
        Err(OptimizeError::InvalidRoster(_)),
    ));

    let roster = Roster::from_json_str(ROSTER).unwrap();
    let config = OptimizerConfig::default().with_weight_range(WeightRange { min: 0.3, max: 0.2, step: 0.1 });
    assert!(matches!(
        TeamOptimizer::new(roster.clone(), config),
        Err(OptimizeError::InvalidConfiguration(_)),
    ));
    assert!(matches!(
        TeamOptimizer::new(roster, OptimizerConfig::default().with_team_count(11)),
        Err(OptimizeError::InvalidConfiguration(_)),
    ));
}
