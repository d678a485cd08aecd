pub mod entity {
    use std::collections::HashSet;
    use serde::{Deserialize, Serialize};

    /// Index of a member inside its roster.
    pub type Id = usize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Climber {
        #[serde(alias = "email")]
        pub id: String,
        pub avg_grade: f64,
        pub max_grade: f64,
        #[serde(default)]
        pub want_with: Vec<String>,
        #[serde(default)]
        pub avoid_with: Vec<String>,
    }

    impl Climber {
        pub fn new(id: impl Into<String>, avg_grade: f64, max_grade: f64) -> Climber {
            Climber {
                id: id.into(),
                avg_grade,
                max_grade,
                want_with: Vec::new(),
                avoid_with: Vec::new(),
            }
        }

        pub fn wants<I, S>(mut self, ids: I) -> Climber
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.want_with.extend(ids.into_iter().map(Into::into));
            self
        }

        pub fn avoids<I, S>(mut self, ids: I) -> Climber
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.avoid_with.extend(ids.into_iter().map(Into::into));
            self
        }
    }

    /// A climber with preferences resolved against the roster.
    /// Ids that are not in the roster are dropped from the resolved sets.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Member {
        pub id: Id,
        pub climber: Climber,
        pub want_with: HashSet<Id>,
        pub avoid_with: HashSet<Id>,
    }
}


pub mod team {
    use serde::{Deserialize, Serialize};
    use super::entity::Id;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Team {
        pub members: Vec<Id>,
    }

    impl Team {
        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }
    }

    /// A partition of the roster into teams.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Table {
        pub teams: Vec<Team>,
    }

    impl Table {
        pub fn with_team_count(team_count: usize) -> Table {
            Table { teams: vec![Team::default(); team_count] }
        }

        pub fn sizes(&self) -> Vec<usize> {
            self.teams.iter().map(Team::len).collect()
        }

        pub fn n_members(&self) -> usize {
            self.teams.iter().map(Team::len).sum()
        }

        /// Team index of every member, indexed by member id.
        pub(crate) fn team_of(&self, n_members: usize) -> Vec<Option<usize>> {
            let mut team_of = vec![None; n_members];
            for (team_index, team) in self.teams.iter().enumerate() {
                for &id in &team.members {
                    if let Some(slot) = team_of.get_mut(id) {
                        *slot = Some(team_index);
                    }
                }
            }
            team_of
        }
    }
}

pub mod condition {
    use serde::{Deserialize, Serialize};

    pub type Score = f64;

    /// Relative importance of the three objective terms.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Weights {
        pub satisfaction: f64,
        pub grade_balance: f64,
        pub size_balance: f64,
    }

    impl Weights {
        pub fn new(satisfaction: f64, grade_balance: f64, size_balance: f64) -> Weights {
            Weights { satisfaction, grade_balance, size_balance }
        }

        pub fn sum(&self) -> f64 {
            self.satisfaction + self.grade_balance + self.size_balance
        }

        pub(crate) fn is_valid(&self) -> bool {
            [self.satisfaction, self.grade_balance, self.size_balance]
                .iter()
                .all(|w| w.is_finite() && *w >= 0.0)
        }
    }

    impl Default for Weights {
        /// Manual weights the team builder starts from before any grid search.
        fn default() -> Self {
            Weights { satisfaction: 1.0, grade_balance: 5.0, size_balance: 20.0 }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::entity::Climber;
    use super::team::{Table, Team};
    use super::condition::Weights;

    #[test]
    fn climber_deserializes_with_email_key_and_missing_preferences() {
        let climber: Climber = serde_json::from_str(
            r#"{"email": "a@gym.test", "avg_grade": 4.5, "max_grade": 6}"#,
        ).unwrap();
        assert_eq!(climber, Climber::new("a@gym.test", 4.5, 6.0));
    }

    #[test]
    fn team_of_maps_members_to_their_team() {
        let table = Table {
            teams: vec![Team { members: vec![2, 0] }, Team { members: vec![1] }],
        };
        assert_eq!(table.team_of(3), vec![Some(0), Some(1), Some(0)]);
        assert_eq!(table.sizes(), vec![2, 1]);
        assert_eq!(table.n_members(), 3);
    }

    #[test]
    fn negative_weights_are_invalid() {
        assert!(Weights::default().is_valid());
        assert!(!Weights::new(-0.1, 0.5, 0.6).is_valid());
        assert!(!Weights::new(f64::NAN, 0.5, 0.5).is_valid());
    }
}
