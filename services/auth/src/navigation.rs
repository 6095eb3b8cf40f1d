//! Navigation targets
//!
//! The client never navigates on its own; guards and the gateway return a
//! [`Page`] and the view layer decides how to get there.

use std::fmt;

use crate::models::Role;

/// Pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Register,
    EmployeeDashboard,
    AdminDashboard,
}

impl Page {
    /// Dashboard a role lands on after login
    pub fn landing_for(role: Role) -> Self {
        match role {
            Role::Employee => Page::EmployeeDashboard,
            Role::Admin | Role::Manager => Page::AdminDashboard,
        }
    }

    /// Document the page is served from
    pub fn path(&self) -> &'static str {
        match self {
            Page::Login => "index.html",
            Page::Register => "register.html",
            Page::EmployeeDashboard => "employee-dashboard.html",
            Page::AdminDashboard => "admin-dashboard.html",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
