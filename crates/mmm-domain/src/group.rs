//! Domain model for shared budget groups.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Default icon applied when a group is created without one.
pub const DEFAULT_GROUP_ICON: &str = "🏢";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A shared budget with a period spending ceiling.
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub budget: f64,
    /// Participant count, informational only.
    #[serde(default = "Group::default_members")]
    pub members: u32,
    #[serde(default = "Group::default_icon")]
    pub icon: String,
}

impl Group {
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            budget,
            members: Self::default_members(),
            icon: Self::default_icon(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_members(mut self, members: u32) -> Self {
        self.members = members;
        self
    }

    /// Rejects groups that cannot drive a budget ratio: a later division by
    /// `budget` must never see zero or a negative ceiling.
    pub fn validate(&self) -> Result<(), GroupError> {
        if self.name.trim().is_empty() {
            return Err(GroupError::EmptyName);
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(GroupError::NonPositiveBudget(self.budget));
        }
        Ok(())
    }

    fn default_members() -> u32 {
        1
    }

    fn default_icon() -> String {
        DEFAULT_GROUP_ICON.into()
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Group {
    fn display_label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validity failures for [`Group`] values.
pub enum GroupError {
    EmptyName,
    NonPositiveBudget(f64),
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::EmptyName => f.write_str("group name must not be empty"),
            GroupError::NonPositiveBudget(budget) => {
                write!(f, "group budget must be positive, got {budget}")
            }
        }
    }
}

impl std::error::Error for GroupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_name_and_bad_budget() {
        assert_eq!(Group::new(" ", 100.0).validate(), Err(GroupError::EmptyName));
        assert_eq!(
            Group::new("Marketing", 0.0).validate(),
            Err(GroupError::NonPositiveBudget(0.0))
        );
        assert_eq!(
            Group::new("Marketing", -5.0).validate(),
            Err(GroupError::NonPositiveBudget(-5.0))
        );
        assert!(Group::new("Marketing", 15000.0).validate().is_ok());
    }

    #[test]
    fn new_group_defaults_members_and_icon() {
        let group = Group::new("Lunch", 5000.0);
        assert_eq!(group.members, 1);
        assert_eq!(group.icon, DEFAULT_GROUP_ICON);
    }
}
