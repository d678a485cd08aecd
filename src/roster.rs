use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::error::{OptimizeError, Result};
use crate::model::entity::{Climber, Id, Member};

/// Immutable set of members for one optimization run.
#[derive(Debug, Clone)]
pub struct Roster {
    members: Vec<Member>,
    index: HashMap<String, Id>,
}

impl Roster {
    pub fn new(climbers: Vec<Climber>) -> Result<Roster> {
        if climbers.is_empty() {
            return Err(OptimizeError::InvalidRoster("roster is empty".into()));
        }

        let mut index = HashMap::with_capacity(climbers.len());
        for (id, climber) in climbers.iter().enumerate() {
            if !climber.avg_grade.is_finite() || !climber.max_grade.is_finite() {
                return Err(OptimizeError::InvalidRoster(format!(
                    "climber {} has a non-finite grade (avg {}, max {})",
                    climber.id, climber.avg_grade, climber.max_grade
                )));
            }
            if index.insert(climber.id.clone(), id).is_some() {
                return Err(OptimizeError::InvalidRoster(format!("duplicate climber id {}", climber.id)));
            }
        }

        let resolve = |ids: &[String]| -> HashSet<Id> {
            ids.iter().filter_map(|id| index.get(id).copied()).collect()
        };
        let members = climbers
            .into_iter()
            .enumerate()
            .map(|(id, climber)| Member {
                id,
                want_with: resolve(&climber.want_with),
                avoid_with: resolve(&climber.avoid_with),
                climber,
            })
            .collect();

        Ok(Roster { members, index })
    }

    /// Parses a JSON array of climber records.
    pub fn from_json_str(json: &str) -> Result<Roster> {
        let climbers: Vec<Climber> = serde_json::from_str(json)
            .map_err(|err| OptimizeError::InvalidRoster(err.to_string()))?;
        Roster::new(climbers)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster> {
        let climbers: Vec<Climber> = serde_json::from_reader(reader)
            .map_err(|err| OptimizeError::InvalidRoster(err.to_string()))?;
        Roster::new(climbers)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn get(&self, id: Id) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn id_of(&self, climber_id: &str) -> Option<Id> {
        self.index.get(climber_id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> {
        0..self.members.len()
    }
}
