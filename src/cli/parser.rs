use crate::core::export::{ExportFormat, ExportTarget};
use crate::models::filter::Filter;
use clap::{Parser, Subcommand};

/// Command-line interface definition for tramreport
/// Client for the Poznań transit report service
#[derive(Parser)]
#[command(
    name = "tramreport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Poznań transit reports: stop map, incident reports, likes and dislikes",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the backend base URL
    #[arg(global = true, long = "api", value_name = "URL")]
    pub api: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the local store and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

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

    /// Create an account on the backend
    Register {
        username: String,

        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in with a username or e-mail and store the session
    Login {
        /// Username or e-mail
        user: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the account the stored session belongs to
    Me,

    /// Refresh the local stop/report snapshot from the backend
    Sync,

    /// List cached stops
    Stops {
        #[arg(long, short, value_enum, help = "Vehicle filter: none, tram or bus")]
        filter: Option<Filter>,

        #[arg(long, short, help = "Only stops whose name contains TEXT")]
        search: Option<String>,
    },

    /// Show the map annotations for the current snapshot
    Map {
        #[arg(long, short, value_enum, help = "Vehicle filter: none, tram or bus")]
        filter: Option<Filter>,

        #[arg(long, short, help = "Sync with the backend before rendering")]
        refresh: bool,

        #[arg(long, help = "Print annotations as JSON")]
        json: bool,
    },

    /// List reports, newest first
    Reports {
        #[arg(long, help = "Only reports for this stop id")]
        stop: Option<String>,

        #[arg(long = "type", help = "Only reports of this type (e.g. Awaria, accident)")]
        kind: Option<String>,

        #[arg(long, help = "Only reports since epoch millis or YYYY-MM-DD")]
        since: Option<String>,

        #[arg(long, help = "Query the backend instead of the local snapshot")]
        remote: bool,
    },

    /// Show one report from the backend
    Show {
        id: String,
    },

    /// Submit a report for a stop
    Report {
        stop_id: String,

        #[arg(
            long = "type",
            help = "Report type: breakdown (Awaria), accident (Wypadek), ticket-control (Kontrola biletów)"
        )]
        kind: String,

        #[arg(long, short, default_value = "")]
        description: String,
    },

    /// Like a report
    Like {
        id: String,
    },

    /// Dislike a report
    Dislike {
        id: String,
    },

    /// Show pins from the public GeoJSON stop feed
    Feed {
        #[arg(long, value_name = "URL", help = "Feed URL (defaults to the configured one)")]
        url: Option<String>,
    },

    /// Export annotations or reports
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "annotations")]
        what: ExportTarget,

        #[arg(long, value_enum, help = "Vehicle filter for annotations")]
        filter: Option<Filter>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the local store (migrations, integrity checks, etc.)
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
}
