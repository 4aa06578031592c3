use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tfilter", version)]
#[command(about = "Filter torrent snapshots by state, hash, category and tag", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Snapshot file (JSON array of torrents), `-` for stdin
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Criteria shared by `list` and `counts`
#[derive(Args, Debug, Clone, Default)]
pub struct Criteria {
    /// Only these torrents: hashes separated by `|`, or `all`
    #[arg(long)]
    pub hashes: Option<String>,

    /// Category name (empty for uncategorized)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Tag name (empty for untagged)
    #[arg(short, long)]
    pub tag: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List matching torrents
    #[command(alias = "ls")]
    List {
        /// State filter: downloading, seeding, completed, paused, resumed,
        /// active, inactive, stalled, stalled_uploading, stalled_downloading,
        /// checking, errored (anything else means all)
        #[arg(short, long)]
        filter: Option<String>,

        #[command(flatten)]
        criteria: Criteria,

        /// Print matching torrents as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count matching torrents for every state filter
    Counts {
        #[command(flatten)]
        criteria: Criteria,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (nested-categories, default-filter, snapshot)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
