use thiserror::Error;
use crate::model::{entity::Id, team::Table};

pub type Index = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub team_index: Index,
    pub member_index: Index,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Swap(Position, Position),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Invalid position: team {team_index}, member {member_index}")]
    InvalidPosition { team_index: Index, member_index: Index },
    #[error("Cannot swap two members of the same team ({0})")]
    SameTeam(Index),
}

impl From<&Position> for ActionError {
    fn from(position: &Position) -> Self {
        ActionError::InvalidPosition {
            team_index: position.team_index,
            member_index: position.member_index,
        }
    }
}

impl Table {
    pub fn get_member(&self, position: &Position) -> Option<Id> {
        self.teams.get(position.team_index)?.members.get(position.member_index).copied()
    }

    /// Applies `action` in place. A swap is its own inverse, so applying the
    /// same action twice restores the table.
    pub fn act(&mut self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::Swap(position1, position2) => {
                if position1.team_index == position2.team_index {
                    return Err(ActionError::SameTeam(position1.team_index));
                }
                let member1 = self.get_member(position1).ok_or_else(|| ActionError::from(position1))?;
                let member2 = self.get_member(position2).ok_or_else(|| ActionError::from(position2))?;
                self.teams[position1.team_index].members[position1.member_index] = member2;
                self.teams[position2.team_index].members[position2.member_index] = member1;
                Ok(())
            }
        }
    }
}
