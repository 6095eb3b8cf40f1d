//! Command-line definitions for `leave-client`

use auth::Role;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use api::models::{HalfDayType, LeaveStatus, YearEndAction};
use api::views::ManagerFilter;

/// Leave management client
///
/// The session is kept between invocations in the configured storage area
/// (`LEAVE_STORAGE`, `LEAVE_STORAGE_PATH`).
#[derive(Debug, Parser)]
#[command(name = "leave-client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "LEAVE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// End the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Employee dashboard
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Admin and manager dashboard
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Keep running and report when the session expires
    Watch,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "LEAVE_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, env = "LEAVE_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub department: String,
    /// EMPLOYEE, MANAGER or ADMIN
    #[arg(long)]
    pub role: Role,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Apply for leave
    Apply {
        #[arg(long)]
        start: NaiveDate,
        /// Defaults to the start date
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        reason: String,
        /// Take half a day instead of full days
        #[arg(long, value_enum)]
        half: Option<HalfArg>,
    },
    /// List my leave requests
    Leaves {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "createdAt")]
        sort_by: String,
    },
    /// Cancel a leave request
    Cancel { id: i64 },
    /// Show my leave balance
    Balance {
        #[arg(long)]
        year: Option<i32>,
    },
    /// List festival holidays
    Holidays {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Carry forward or encash unused leave
    YearEnd {
        #[arg(value_enum)]
        action: YearEndArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Leave counts per status
    Summary,
    /// Leave requests awaiting a decision
    Pending {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        sort_by: Option<String>,
    },
    /// All leave requests
    Leaves {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    Approve { id: i64 },
    Reject { id: i64 },
    Holidays {
        #[arg(long)]
        year: Option<i32>,
    },
    AddHoliday {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: NaiveDate,
    },
    DeleteHoliday { id: i64 },
    /// Manager accounts (admin only)
    Managers {
        /// Include already processed accounts
        #[arg(long)]
        all: bool,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    ApproveManager { id: i64 },
    RejectManager { id: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HalfArg {
    First,
    Second,
}

impl From<HalfArg> for HalfDayType {
    fn from(value: HalfArg) -> Self {
        match value {
            HalfArg::First => HalfDayType::FirstHalf,
            HalfArg::Second => HalfDayType::SecondHalf,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum YearEndArg {
    CarryForward,
    Encashment,
}

impl From<YearEndArg> for YearEndAction {
    fn from(value: YearEndArg) -> Self {
        match value {
            YearEndArg::CarryForward => YearEndAction::CarryForward,
            YearEndArg::Encashment => YearEndAction::Encashment,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl From<StatusArg> for LeaveStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => LeaveStatus::Pending,
            StatusArg::Approved => LeaveStatus::Approved,
            StatusArg::Rejected => LeaveStatus::Rejected,
            StatusArg::Cancelled => LeaveStatus::Cancelled,
        }
    }
}

pub fn manager_filter(all: bool) -> ManagerFilter {
    if all {
        ManagerFilter::All
    } else {
        ManagerFilter::Pending
    }
}

/// Pages are numbered from 1 on the command line and from 0 on the wire
pub fn page_index(page: u32) -> u32 {
    page.saturating_sub(1)
}
