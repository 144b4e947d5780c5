//! Staff Role Model

use serde::{Deserialize, Serialize};

/// Role of the authenticated user on whose behalf the agent runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Employee,
    Admin,
    Customer,
}

impl StaffRole {
    /// Whether this role may run the order polling session at all
    pub fn can_watch(&self) -> bool {
        matches!(self, StaffRole::Employee | StaffRole::Admin)
    }

    /// Whether this role receives new-order notifications and prints.
    /// Admins get the live order feed but no toasts or print jobs.
    pub fn receives_notifications(&self) -> bool {
        matches!(self, StaffRole::Employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_gating() {
        assert!(StaffRole::Employee.can_watch());
        assert!(StaffRole::Admin.can_watch());
        assert!(!StaffRole::Customer.can_watch());

        assert!(StaffRole::Employee.receives_notifications());
        assert!(!StaffRole::Admin.receives_notifications());
    }
}
