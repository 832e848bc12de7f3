// tendgen entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (log to file, mirrored to stderr with --verbose)
// 3. Load config
// 4. Build the roster cache
// 5. Dispatch the subcommand

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use tendency_app::config::{self, ExportFormat};
use tendency_app::export::{export_all, export_player};
use tendency_app::generate::{bulk_generate, generate_for_player, BulkSelection};
use tendency_app::roster::{self, CsvRosterSource, RosterCache, RosterEntry, DEFAULT_SEARCH_LIMIT};

#[derive(Debug, Parser)]
#[command(name = "tendgen", version, about = "Generate basketball player tendency ratings")]
struct Cli {
    /// Mirror log output to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate and export tendencies for one player.
    Generate {
        /// Name to search for, or the player id with --id.
        query: String,
        /// Treat QUERY as an exact player id.
        #[arg(long)]
        id: bool,
        /// Override the configured export format.
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
    /// Generate and export tendencies for a team or the whole roster.
    Bulk {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Override the configured player limit.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
    /// Search the roster by name.
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Drop the cached roster and reload it from the source.
    RefreshRoster,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Team abbreviation, e.g. BOS.
    #[arg(long)]
    team: Option<String>,
    /// Every rostered player.
    #[arg(long)]
    all: bool,
}

impl SelectionArgs {
    fn into_selection(self) -> BulkSelection {
        match self.team {
            Some(team) => BulkSelection::Team(team),
            None => BulkSelection::All,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;
    info!("tendgen starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: bundles={}, roster={}",
        config.data.bundles_dir.display(),
        config.data.roster_csv.display()
    );

    let mut cache = RosterCache::new(
        CsvRosterSource::new(&config.data.roster_csv),
        &config.cache_dir(),
        config.cache.max_age_hours,
    );

    match cli.command {
        Command::Generate { query, id, format } => {
            let players = cache.get().context("failed to load roster")?;
            let entry = find_player(players, &query, id)?;
            let result = generate_for_player(entry, &config.data.bundles_dir)
                .with_context(|| format!("failed to generate tendencies for {}", entry.name))?;
            let format = format.unwrap_or(config.export.format);
            let path = export_player(&result, &config.export.output_dir, format)
                .context("failed to export tendencies")?;
            println!("{} ({}, {}) -> {}", result.name, result.position, result.team, path.display());
        }
        Command::Bulk { selection, limit, format } => {
            let players = cache.get().context("failed to load roster")?;
            let selection = selection.into_selection();
            let results = bulk_generate(
                players,
                &selection,
                limit.unwrap_or(config.bulk.limit),
                &config.data.bundles_dir,
            );
            let format = format.unwrap_or(config.export.format);
            let written = export_all(&results, &config.export.output_dir, format);
            for (name, path) in &written {
                println!("{name} -> {}", path.display());
            }
            println!("{} of {} players exported", written.len(), results.len());
        }
        Command::Search { query, limit } => {
            let players = cache.get().context("failed to load roster")?;
            for entry in roster::search(players, &query, limit) {
                println!("{:<10} {:<28} {:<4} {}", entry.player_id, entry.name, entry.team, entry.position);
            }
        }
        Command::RefreshRoster => {
            let count = cache.refresh().context("failed to refresh roster")?;
            println!("roster refreshed: {count} players");
        }
    }

    info!("tendgen finished");
    Ok(())
}

/// Resolve a CLI query to one roster entry: an exact id with `--id`,
/// otherwise the best name match.
fn find_player<'a>(
    players: &'a [RosterEntry],
    query: &str,
    by_id: bool,
) -> anyhow::Result<&'a RosterEntry> {
    if by_id {
        return players
            .iter()
            .find(|p| p.player_id == query)
            .with_context(|| format!("no player with id `{query}`"));
    }
    let matches = roster::search(players, query, DEFAULT_SEARCH_LIMIT);
    let Some(best) = matches.first().copied() else {
        bail!("no player matches `{query}`");
    };
    if matches.len() > 1 {
        info!(chosen = %best.name, others = matches.len() - 1, "multiple matches, using best");
    }
    Ok(best)
}

/// Initialize tracing to log to a file, optionally mirrored to stderr.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("tendgen.log"))?;
    let stderr = std::io::stderr.with_filter(move |_| verbose);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tendency_app=info,tendency_core=warn")),
        )
        .with_writer(log_file.and(stderr))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
