use clap::{Parser, Subcommand};

/// Command-line interface definition for checkrota
/// CLI application to schedule recurring task checklists with SQLite
#[derive(Parser)]
#[command(
    name = "checkrota",
    version = env!("CARGO_PKG_VERSION"),
    about = "Schedule recurring task checklists: per-day assignments, backup reassignment on leave, completion tracking",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the organization the command operates on
    #[arg(global = true, long = "org")]
    pub org: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the employee directory
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Manage checklist definitions
    Checklist {
        #[command(subcommand)]
        action: ChecklistCmd,
    },

    /// Record a check-in and generate the employee's assignments for the day
    Checkin {
        /// Employee id
        employee: String,

        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },

    /// Declare leave for an employee and reassign their tasks to backups
    Leave {
        /// Employee id
        employee: String,

        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,
    },

    /// Cancel a declared leave, restoring uncompleted reassignments
    LeaveCancel {
        /// Employee id
        employee: String,

        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,

        /// Mark the employee as checked in for the date (enables restoration
        /// of their primary assignments)
        #[arg(long = "present")]
        present: bool,
    },

    /// Manually generate assignments for every checked-in employee (admin only)
    Generate {
        /// Date (YYYY-MM-DD), defaults to today
        date: Option<String>,

        /// Role of the invoking actor
        #[arg(long = "role")]
        role: Option<String>,
    },

    /// Record completion state for one assignment
    Complete {
        /// Checklist id
        checklist: i64,

        /// Employee id
        employee: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Mark the task as NOT completed (requires --reason)
        #[arg(long = "not-done")]
        not_done: bool,

        /// Reason the task was not completed
        #[arg(long = "reason")]
        reason: Option<String>,
    },

    /// Print the month view (per-employee grids plus stats) as JSON
    Month {
        /// Year (e.g. 2026)
        year: i32,

        /// Month (1-12)
        month: u32,
    },

    /// List assignment records, newest first
    List {
        #[arg(long = "employee", help = "Filter by employee id")]
        employee: Option<String>,

        #[arg(long = "checklist", help = "Filter by checklist id")]
        checklist: Option<i64>,

        #[arg(long = "date", help = "Filter by exact date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "from", help = "Filter from date (YYYY-MM-DD), inclusive")]
        from: Option<String>,

        #[arg(long = "to", help = "Filter to date (YYYY-MM-DD), inclusive")]
        to: Option<String>,

        #[arg(long = "completed", help = "Only completed assignments")]
        completed: bool,

        #[arg(long = "pending", help = "Only pending assignments", conflicts_with = "completed")]
        pending: bool,

        #[arg(long = "json", help = "Print as JSON instead of a table")]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add or update a directory entry
    Add {
        /// Employee id (e.g. E1)
        id: String,

        /// Display name
        name: String,

        #[arg(long = "dept", default_value = "", help = "Department")]
        department: String,
    },

    /// List active directory entries
    List,
}

#[derive(Subcommand)]
pub enum ChecklistCmd {
    /// Create a checklist definition (triggers same-day generation)
    Add {
        /// Title of the checklist
        title: String,

        #[arg(long = "desc", default_value = "", help = "Description")]
        description: String,

        /// Recurrence type: daily, weekly, monthly or once
        #[arg(long = "recur")]
        recur: String,

        #[arg(long = "dow", help = "Day of week for weekly rules (0=Sunday..6)")]
        day_of_week: Option<u32>,

        #[arg(long = "dom", help = "Day of month for monthly rules (1..31)")]
        day_of_month: Option<u32>,

        #[arg(long = "on", help = "Date for 'once' rules (YYYY-MM-DD)")]
        specific_date: Option<String>,

        /// Primary owners, priority order
        #[arg(long = "assign", value_delimiter = ',')]
        assigned: Vec<String>,

        /// Backup candidates, priority order
        #[arg(long = "backup", value_delimiter = ',')]
        backups: Vec<String>,

        #[arg(long = "by", default_value = "cli", help = "Actor recorded as creator")]
        actor: String,
    },

    /// List checklist definitions
    List,

    /// Delete a definition and all of its assignment records
    Del {
        /// Checklist id
        id: i64,

        #[arg(long = "yes", help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Toggle a definition between active and inactive
    Toggle {
        /// Checklist id
        id: i64,
    },
}
