use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use api::error::ApiError;
use api::models::{LeaveApplication, YearEndAction};
use api::render;
use api::state::AppState;
use api::views::{AdminDashboard, EmployeeDashboard, enter_any};
use auth::models::RegistrationForm;
use auth::{ClientConfig, Page, SessionEvent};

use crate::cli::{
    AdminCommand, Cli, Command, EmployeeCommand, RegisterArgs, manager_filter, page_index,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    info!("Using backend {}", config.api_base_url);

    let state = AppState::from_config(config).await?;

    match run(&state, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{}", e.user_message());
            if let Some(page) = e.redirect_target() {
                eprintln!("-> {}", page);
            }
            std::process::exit(1);
        }
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), ApiError> {
    match command {
        Command::Login { username, password } => {
            if let Some(page) = state.auth.resume().await? {
                println!("Already logged in -> {}", page);
                return Ok(());
            }
            let page = state.auth.login(&username, &password).await?;
            println!("Login successful! -> {}", page);
        }
        Command::Register(args) => {
            let message = state.auth.register(&registration_form(args)).await?;
            println!("{}", message);
            println!("-> {}", Page::Login);
        }
        Command::Logout => {
            let page = state.auth.logout().await?;
            println!("Logged out -> {}", page);
        }
        Command::Whoami => {
            let session = enter_any(state).await?;
            state.auth.record_activity().await?;
            let user = state.auth.current_user().await?;
            println!(
                "{} ({})",
                session.display_name().unwrap_or("User"),
                user.role.map(|r| r.as_str()).unwrap_or("UNKNOWN")
            );
            if let Some(id) = user.employee_id {
                println!("Employee #{}", id);
            }
        }
        Command::Employee(command) => employee(state, command).await?,
        Command::Admin(command) => admin(state, command).await?,
        Command::Watch => watch(state).await?,
    }
    Ok(())
}

fn registration_form(args: RegisterArgs) -> RegistrationForm {
    RegistrationForm {
        username: args.username,
        password: args.password,
        confirm_password: args.confirm_password,
        name: args.name,
        email: args.email,
        department: args.department,
        role: Some(args.role),
    }
}

async fn employee(state: &AppState, command: EmployeeCommand) -> Result<(), ApiError> {
    let dashboard = EmployeeDashboard::open(state).await?;
    println!("{}", dashboard.greeting());

    match command {
        EmployeeCommand::Apply {
            start,
            end,
            reason,
            half,
        } => {
            let application = match half {
                Some(half) => LeaveApplication::half_day(start, half.into(), reason),
                None => LeaveApplication::full_days(start, end.unwrap_or(start), reason),
            };
            let leave = dashboard.apply_leave(&application).await?;
            println!("Leave applied successfully!");
            print!("{}", render::leave(&leave, false));
        }
        EmployeeCommand::Leaves { page, sort_by } => {
            let leaves = dashboard.my_leaves(page_index(page), &sort_by).await?;
            print!("{}", render::leave_page(&leaves, false, "No leave requests found"));
        }
        EmployeeCommand::Cancel { id } => {
            println!("{}", dashboard.cancel_leave(id).await?);
        }
        EmployeeCommand::Balance { year } => {
            print!("{}", render::balance(&dashboard.balance(year).await?));
        }
        EmployeeCommand::Holidays { year } => {
            print!("{}", render::holidays(&dashboard.holidays(year).await?));
        }
        EmployeeCommand::YearEnd { action } => {
            let action: YearEndAction = action.into();
            println!("{}", action.confirmation());
            println!("{}", dashboard.process_year_end(action).await?);
        }
    }
    Ok(())
}

async fn admin(state: &AppState, command: AdminCommand) -> Result<(), ApiError> {
    let dashboard = AdminDashboard::open(state).await?;
    println!("{}", dashboard.greeting());

    match command {
        AdminCommand::Summary => {
            let summary = dashboard.summary().await?;
            println!("Pending: {}", summary.pending);
            println!("Approved: {}", summary.approved);
            println!("Rejected: {}", summary.rejected);
            if let Some(managers) = summary.pending_managers {
                println!("Pending managers: {}", managers);
            }
        }
        AdminCommand::Pending { page, sort_by } => {
            let leaves = dashboard
                .pending_leaves(page_index(page), sort_by.as_deref())
                .await?;
            print!("{}", render::leave_page(&leaves, true, "No pending leave requests"));
        }
        AdminCommand::Leaves {
            page,
            sort_by,
            status,
        } => {
            let leaves = dashboard
                .all_leaves(page_index(page), sort_by.as_deref(), status.map(Into::into))
                .await?;
            print!("{}", render::leave_page(&leaves, true, "No leave requests found"));
        }
        AdminCommand::Approve { id } => println!("{}", dashboard.approve_leave(id).await?),
        AdminCommand::Reject { id } => println!("{}", dashboard.reject_leave(id).await?),
        AdminCommand::Holidays { year } => {
            print!("{}", render::holidays(&dashboard.holidays(year).await?));
        }
        AdminCommand::AddHoliday { name, date } => {
            println!("{}", dashboard.add_holiday(&name, date).await?);
        }
        AdminCommand::DeleteHoliday { id } => {
            println!("{}", dashboard.delete_holiday(id).await?);
        }
        AdminCommand::Managers { all, page } => {
            let managers = dashboard
                .managers(manager_filter(all), page_index(page))
                .await?;
            print!("{}", render::manager_page(&managers));
        }
        AdminCommand::ApproveManager { id } => {
            println!("{}", dashboard.approve_manager(id).await?);
        }
        AdminCommand::RejectManager { id } => {
            println!("{}", dashboard.reject_manager(id).await?);
        }
    }
    Ok(())
}

/// Run the background sweep until the session expires or the user interrupts
async fn watch(state: &AppState) -> Result<(), ApiError> {
    enter_any(state).await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = state.sweeper().start(tx).await?;
    println!("Watching session (Ctrl+C to stop)");

    tokio::select! {
        event = rx.recv() => {
            if let Some(SessionEvent::Expired) = event {
                println!("{}", auth::error::SESSION_EXPIRED_MESSAGE);
                println!("-> {}", Page::Login);
            }
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    }

    if let Err(e) = scheduler.shutdown().await {
        error!("Failed to stop session sweep: {}", e);
    }
    Ok(())
}
