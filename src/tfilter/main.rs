use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use tfilter::api::{
    CmdMessage, ConfigAction, FilterQuery, MessageLevel, TfilterApi, TfilterPaths,
};
use tfilter::config::TfilterConfig;
use tfilter::error::{Result, TfilterError};
use tfilter::filter::StateKind;
use tfilter::model::TorrentState;
use tfilter::store::fs::FileSource;
use tfilter::store::memory::InMemorySource;
use tfilter::torrent::TorrentInfo;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, Criteria};

const HOME_ENV: &str = "TFILTER_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    paths: TfilterPaths,
    config: TfilterConfig,
    input: Option<PathBuf>,
}

impl AppContext {
    fn api(&self) -> Result<TfilterApi<FileSource>> {
        let path = self
            .input
            .clone()
            .or_else(|| self.config.snapshot.clone())
            .ok_or_else(|| {
                TfilterError::Api(
                    "No snapshot given: pass --input or set `snapshot` in config".to_string(),
                )
            })?;

        let source = FileSource::new(path).with_nested_categories(self.config.nested_categories);
        Ok(TfilterApi::new(source, self.paths.clone()))
    }

    /// Config-only commands must work without a snapshot.
    fn config_api(&self) -> TfilterApi<InMemorySource> {
        TfilterApi::new(InMemorySource::default(), self.paths.clone())
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            filter,
            criteria,
            json,
        }) => handle_list(&ctx, filter, criteria, json),
        Some(Commands::Counts { criteria }) => handle_counts(&ctx, criteria),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, Criteria::default(), false),
    }
}

fn setup_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = match std::env::var_os(HOME_ENV) {
        Some(home) => PathBuf::from(home),
        None => ProjectDirs::from("com", "tfilter", "tfilter")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| TfilterError::Api("Could not determine config dir".to_string()))?,
    };
    tracing::debug!("config dir: {}", config_dir.display());

    let config = TfilterConfig::load(&config_dir)?;

    Ok(AppContext {
        paths: TfilterPaths { config_dir },
        config,
        input: cli.input.clone(),
    })
}

fn to_query(filter: Option<String>, criteria: Criteria) -> FilterQuery {
    FilterQuery {
        filter,
        hashes: criteria.hashes,
        category: criteria.category,
        tag: criteria.tag,
    }
}

fn handle_list(
    ctx: &AppContext,
    filter: Option<String>,
    criteria: Criteria,
    json: bool,
) -> Result<()> {
    let filter = filter.or_else(|| Some(ctx.config.default_filter.clone()));
    let query = to_query(filter, criteria);
    let result = ctx.api()?.list_torrents(&query)?;

    if json {
        let out = serde_json::to_string_pretty(&result.listed_torrents)
            .map_err(TfilterError::Serialization)?;
        println!("{}", out);
        return Ok(());
    }

    print_torrents(&result.listed_torrents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_counts(ctx: &AppContext, criteria: Criteria) -> Result<()> {
    let query = to_query(None, criteria);
    let result = ctx.api()?.state_counts(&query)?;
    print_counts(&result.state_counts);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.config_api().config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in TfilterConfig::keys() {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Warnings go to stderr so piped listings stay clean.
fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        let text = &message.content;
        match message.level {
            MessageLevel::Info => println!("{}", text.dimmed()),
            MessageLevel::Success => println!("{}", text.green()),
            MessageLevel::Warning => eprintln!("{} {}", "warning:".yellow().bold(), text),
        }
    }
}

const LINE_WIDTH: usize = 100;
const HASH_WIDTH: usize = 8;
const STATE_WIDTH: usize = 20;
const TIME_WIDTH: usize = 14;
const MIN_NAME_WIDTH: usize = 12;

fn print_torrents(torrents: &[TorrentInfo]) {
    for t in torrents {
        let hash = t.hash.to_string();
        let hash_short = &hash[..HASH_WIDTH];

        let state = format!("{:<width$}", state_label(t.state), width = STATE_WIDTH);
        let time_ago = t.added_on.map(format_time_ago).unwrap_or_default();

        let fixed_width = HASH_WIDTH + 1 + STATE_WIDTH + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = torrent_label(t, available);
        let padding = available.saturating_sub(label_display.width());

        println!(
            "{} {} {}{}{}",
            hash_short.dimmed(),
            color_state(t.state, &state),
            label_display,
            " ".repeat(padding),
            format!("{:>width$}", time_ago, width = TIME_WIDTH).dimmed()
        );
    }
}

fn print_counts(counts: &[(StateKind, usize)]) {
    for (kind, count) in counts {
        let line = format!("{:<22}{:>6}", kind.as_str(), count);
        if *count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
}

fn state_label(state: TorrentState) -> &'static str {
    match state {
        TorrentState::Unknown => "Unknown",
        TorrentState::ForcedDownloading => "[F] Downloading",
        TorrentState::Downloading => "Downloading",
        TorrentState::ForcedDownloadingMetadata => "[F] Metadata",
        TorrentState::DownloadingMetadata => "Fetching metadata",
        TorrentState::StalledDownloading => "Stalled",
        TorrentState::ForcedUploading => "[F] Seeding",
        TorrentState::Uploading => "Seeding",
        TorrentState::StalledUploading => "Seeding (stalled)",
        TorrentState::CheckingResumeData => "Checking resume data",
        TorrentState::QueuedDownloading => "Queued",
        TorrentState::QueuedUploading => "Queued (seed)",
        TorrentState::CheckingUploading => "Checking",
        TorrentState::CheckingDownloading => "Checking",
        TorrentState::PausedDownloading => "Paused",
        TorrentState::PausedUploading => "Completed",
        TorrentState::Moving => "Moving",
        TorrentState::MissingFiles => "Missing files",
        TorrentState::Error => "Errored",
    }
}

fn color_state(state: TorrentState, text: &str) -> ColoredString {
    use TorrentState::*;
    match state {
        Error | MissingFiles => text.red(),
        PausedDownloading | PausedUploading => text.dimmed(),
        StalledDownloading | StalledUploading => text.yellow(),
        CheckingResumeData | CheckingUploading | CheckingDownloading | Moving => text.cyan(),
        Downloading | ForcedDownloading | DownloadingMetadata | ForcedDownloadingMetadata => {
            text.green()
        }
        Uploading | ForcedUploading => text.blue(),
        Unknown | QueuedDownloading | QueuedUploading => text.normal(),
    }
}

/// Name, ` [category]` and ` #tag` suffixes fitted into `max_width`.
///
/// The name is shortened first; category and tags are only cut when the
/// suffix alone does not fit next to a minimal name.
fn torrent_label(t: &TorrentInfo, max_width: usize) -> String {
    let mut suffix = String::new();
    if !t.category.is_empty() {
        suffix.push_str(&format!(" [{}]", t.category));
    }
    for tag in &t.tags {
        suffix.push_str(&format!(" #{}", tag));
    }

    let name_room = max_width.saturating_sub(suffix.width());
    if name_room >= MIN_NAME_WIDTH.min(t.name.width()) {
        return format!("{}{}", truncate_to_width(&t.name, name_room), suffix);
    }

    let name = truncate_to_width(&t.name, MIN_NAME_WIDTH);
    let rest = max_width.saturating_sub(name.width());
    format!("{}{}", name, truncate_to_width(&suffix, rest))
}

/// Cut `s` to at most `max_width` columns, marking the cut with `…`.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
