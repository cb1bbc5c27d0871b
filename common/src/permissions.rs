//! Roles and the capability set the calendar is parameterised by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Administrator | Role::Teacher => Capabilities::FULL,
            Role::Student => Capabilities::READ_ONLY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" | "school" => Ok(Role::Administrator),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// What the current user may do to schedule entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub const FULL: Capabilities = Capabilities {
        can_create: true,
        can_edit: true,
        can_delete: true,
    };
    pub const READ_ONLY: Capabilities = Capabilities {
        can_create: false,
        can_edit: false,
        can_delete: false,
    };

    pub fn is_read_only(&self) -> bool {
        !(self.can_create || self.can_edit || self.can_delete)
    }

    /// What activating an event on the grid opens.
    pub fn on_select(&self) -> SelectAction {
        if self.can_edit {
            SelectAction::EditDialog
        } else {
            SelectAction::DetailView
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    EditDialog,
    DetailView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Student.capabilities().is_read_only());
        assert_eq!(Role::Student.capabilities().on_select(), SelectAction::DetailView);
        assert_eq!(Role::Teacher.capabilities().on_select(), SelectAction::EditDialog);
        assert!(Role::Administrator.capabilities().can_delete);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Administrator));
        assert_eq!(" teacher ".parse::<Role>(), Ok(Role::Teacher));
        assert!("principal".parse::<Role>().is_err());
    }
}
