use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rbooking
/// CLI application to manage reservations with SQLite
#[derive(Parser)]
#[command(
    name = "rbooking",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small reservation manager: store bookings, track their status and compute dashboard counts using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
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

    /// Add a new reservation
    Add {
        /// Reservation id (generated when omitted)
        #[arg(long = "id")]
        id: Option<String>,

        #[arg(long = "datetime", help = "Date and time (YYYY-MM-DDTHH:MM or 'YYYY-MM-DD HH:MM')")]
        datetime: String,

        #[arg(long = "business", help = "Business or location name")]
        business: String,

        #[arg(long = "party-size", help = "Number of guests")]
        party_size: u32,

        #[arg(long = "name", help = "Customer name")]
        name: Option<String>,

        #[arg(long = "email", help = "Customer e-mail")]
        email: Option<String>,

        #[arg(long = "phone", help = "Contact phone")]
        phone: Option<String>,

        #[arg(long = "table", help = "Assigned table")]
        table: Option<String>,

        #[arg(long = "notes", help = "Free-text notes")]
        notes: Option<String>,

        #[arg(long = "status", help = "Initial status (default: confirmed)")]
        status: Option<String>,
    },

    /// List all reservations, newest first
    List {
        #[arg(long = "status", help = "Only show reservations with this status")]
        status: Option<String>,

        #[arg(long = "json", help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Set the status of a reservation (confirmed, cancelled, updated)
    Status {
        /// Reservation id
        id: String,

        /// New status
        status: String,
    },

    /// Update fields of a reservation (status becomes 'updated')
    Update {
        /// Reservation id
        id: String,

        #[arg(long = "datetime")]
        datetime: Option<String>,

        #[arg(long = "business")]
        business: Option<String>,

        #[arg(long = "party-size")]
        party_size: Option<u32>,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "email")]
        email: Option<String>,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "table")]
        table: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(
            long = "set",
            value_name = "FIELD=VALUE",
            help = "Set a field by column name (repeatable)"
        )]
        set: Vec<String>,
    },

    /// Show dashboard counts
    Insights {
        #[arg(long = "date", help = "Day counted as 'today' (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "json", help = "Print JSON")]
        json: bool,
    },

    /// Assign identifiers to legacy reservations stored without one
    Backfill,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export reservations
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "status", help = "Only export reservations with this status")]
        status: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
