use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::error::{OptimizeError, Result};
use crate::model::team::{Table, Team};
use crate::roster::Roster;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamStats {
    pub size: usize,
    pub avg_grade: f64,
    pub max_grade: f64,
    pub satisfaction: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKind {
    WantWith,
    AvoidWith,
}

/// A preference the final assignment does not honor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetPreference {
    pub climber: String,
    pub other: String,
    pub kind: PreferenceKind,
}

impl fmt::Display for UnmetPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PreferenceKind::WantWith => write!(f, "{} wanted to be with {} but isn't.", self.climber, self.other),
            PreferenceKind::AvoidWith => write!(f, "{} wanted to avoid {} but is with them.", self.climber, self.other),
        }
    }
}

impl Team {
    pub fn stats(&self, roster: &Roster, team_of: &[Option<usize>], team_index: usize) -> Result<TeamStats> {
        if self.is_empty() {
            return Err(OptimizeError::InvalidPartition { team: team_index });
        }
        let members = self.resolve(roster)?;
        let (avg_grade, max_grade) = Team::mean_grades(&members);
        Ok(TeamStats {
            size: members.len(),
            avg_grade,
            max_grade,
            satisfaction: self.satisfaction(&members, team_of, team_index),
        })
    }
}

impl Table {
    /// Member ids replaced by climber ids, team by team.
    pub fn named(&self, roster: &Roster) -> Vec<Vec<String>> {
        self.teams.iter().map(|team| {
            team.members.iter()
                .filter_map(|&id| roster.get(id))
                .map(|member| member.climber.id.clone())
                .collect()
        }).collect()
    }

    pub fn stats(&self, roster: &Roster) -> Result<Vec<TeamStats>> {
        let team_of = self.team_of(roster.len());
        self.teams.iter().enumerate()
            .map(|(team_index, team)| team.stats(roster, &team_of, team_index))
            .collect()
    }

    /// One entry per wanted climber not on the same team (including ids that
    /// are not in the roster) and per avoided climber who is.
    pub fn unmet_preferences(&self, roster: &Roster) -> Result<Vec<UnmetPreference>> {
        let team_of = self.team_of(roster.len());
        let mut unmet = Vec::new();
        for (team_index, team) in self.teams.iter().enumerate() {
            for member in team.resolve(roster)? {
                let same_team = |other: &str| {
                    roster.id_of(other).and_then(|id| team_of[id]) == Some(team_index)
                };
                let climber = &member.climber;
                unmet.extend(climber.want_with.iter().unique().filter(|other| !same_team(other.as_str())).map(|other| {
                    UnmetPreference { climber: climber.id.clone(), other: other.clone(), kind: PreferenceKind::WantWith }
                }));
                unmet.extend(climber.avoid_with.iter().unique().filter(|other| same_team(other.as_str())).map(|other| {
                    UnmetPreference { climber: climber.id.clone(), other: other.clone(), kind: PreferenceKind::AvoidWith }
                }));
            }
        }
        Ok(unmet)
    }
}
