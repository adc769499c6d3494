use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use jobtrack_utils::{JobId, JobStatus, Priority, StatusFilter};

#[derive(Parser, Debug)]
#[clap(name = "jobtrack", version, about = "Keep track of your job applications")]
pub struct CliArgs {
    /// File holding the job collection and reminder flags
    #[clap(long, env = "JOBTRACK_DATA_FILE", value_parser, global = true)]
    pub data_file: Option<PathBuf>,

    /// Directory exports are written to [default: current directory]
    #[clap(long, env = "JOBTRACK_EXPORT_DIR", value_parser, global = true)]
    pub export_dir: Option<PathBuf>,

    /// How long a notification stays up, e.g. "3s" or "500ms"
    #[clap(
        long,
        env = "JOBTRACK_NOTIFICATION_TTL",
        value_parser = humantime::parse_duration,
        global = true
    )]
    pub notification_ttl: Option<Duration>,

    /// Log at info level (RUST_LOG overrides)
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List applications, optionally filtered
    List {
        /// Applied, Interviewing, Offer, Rejected or all
        #[clap(long, value_parser, default_value = "all")]
        status: StatusFilter,

        /// Case-insensitive match on company or title
        #[clap(long, default_value = "")]
        search: String,
    },
    /// Show one application in full
    Show {
        #[clap(value_parser)]
        id: JobId,
    },
    /// Record a new application
    Add(AddArgs),
    /// Change fields of an existing application
    Edit(EditArgs),
    /// Delete an application
    Delete {
        #[clap(value_parser)]
        id: JobId,

        /// Skip the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
    /// Delete every application
    Clear {
        /// Skip the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
    /// Export applications as JSON to the export directory
    Export {
        /// Only export these ids (repeatable)
        #[clap(long = "id", value_parser)]
        ids: Vec<JobId>,
    },
    /// Replace all applications with the contents of a JSON export
    Import {
        #[clap(value_parser)]
        file: PathBuf,
    },
    /// Counts per status
    Stats,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub company: String,

    pub title: String,

    #[clap(long, value_parser)]
    pub status: Option<JobStatus>,

    /// YYYY-MM-DD [default: today]
    #[clap(long)]
    pub applied_date: Option<String>,

    /// YYYY-MM-DD
    #[clap(long)]
    pub deadline: Option<String>,

    #[clap(long, value_parser)]
    pub priority: Option<Priority>,

    #[clap(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    #[clap(value_parser)]
    pub id: JobId,

    #[clap(long)]
    pub company: Option<String>,

    #[clap(long)]
    pub title: Option<String>,

    #[clap(long, value_parser)]
    pub status: Option<JobStatus>,

    #[clap(long)]
    pub applied_date: Option<String>,

    #[clap(long)]
    pub deadline: Option<String>,

    #[clap(long, value_parser)]
    pub priority: Option<Priority>,

    #[clap(long)]
    pub notes: Option<String>,
}
