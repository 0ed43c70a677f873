use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::analytics::{
    DEFAULT_TOP_LOCATIONS, DEFAULT_TOP_SKILLS, DEFAULT_TOP_TITLES, ReportLimits,
};
use crate::snapshot::Snapshot;

#[derive(Parser, Debug, Clone)]
#[command(name = "remote-job-trends", about = "Remote job posting scraper and trend analyzer")]
pub struct Config {
    /// Listing site root; category paths are appended to it
    #[arg(long, env = "BASE_URL", default_value = crate::collectors::remoteok::BASE_URL)]
    pub base_url: String,

    /// Category pages to scrape, in order
    #[arg(
        long,
        env = "CATEGORIES",
        value_delimiter = ',',
        default_values_t = crate::collectors::remoteok::DEFAULT_CATEGORIES.map(String::from)
    )]
    pub categories: Vec<String>,

    /// Client identifier sent with every request
    #[arg(long, env = "USER_AGENT", default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Directory holding the CSV snapshots
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Scrape all categories and overwrite the snapshot
    Scrape {
        /// Snapshot name, stored as <data-dir>/<name>_jobs.csv
        #[arg(long, default_value = "remoteok")]
        snapshot: String,

        /// Scrape only this category and fail if it cannot be fetched
        #[arg(long)]
        category: Option<String>,
    },
    /// Merge snapshots and print rankings (default when no subcommand given)
    Analyze {
        /// Snapshot names to merge, in order
        #[arg(long, value_delimiter = ',', default_value = "remoteok,indeed")]
        sources: Vec<String>,

        #[arg(long, default_value_t = DEFAULT_TOP_TITLES)]
        top_titles: usize,

        #[arg(long, default_value_t = DEFAULT_TOP_LOCATIONS)]
        top_locations: usize,

        #[arg(long, default_value_t = DEFAULT_TOP_SKILLS)]
        top_skills: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Scrape into the first source before analyzing
        #[arg(long)]
        refresh: bool,
    },
}

impl Config {
    /// Resolve the command, defaulting to Analyze if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Analyze {
            sources: vec!["remoteok".to_string(), "indeed".to_string()],
            top_titles: DEFAULT_TOP_TITLES,
            top_locations: DEFAULT_TOP_LOCATIONS,
            top_skills: DEFAULT_TOP_SKILLS,
            json: false,
            refresh: false,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn snapshot(&self, name: &str) -> Snapshot {
        Snapshot::in_dir(&self.data_dir, name)
    }
}

impl Command {
    /// Report limits for Analyze; defaults otherwise.
    pub fn limits(&self) -> ReportLimits {
        match self {
            Command::Analyze {
                top_titles,
                top_locations,
                top_skills,
                ..
            } => ReportLimits {
                titles: *top_titles,
                locations: *top_locations,
                skills: *top_skills,
            },
            Command::Scrape { .. } => ReportLimits::default(),
        }
    }
}
