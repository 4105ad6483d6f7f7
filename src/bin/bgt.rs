//! `bgt`: command-line front end for the board game tracker.
//!
//! # Usage
//!
//! ```bash
//! # What can be tracked
//! bgt games
//!
//! # One-off escalation lookup
//! bgt escalate --count 3 --schedule 4,6,8,10,12,15 --step 5
//!
//! # Track a game (state is saved under --state-dir)
//! bgt show risk --players 4
//! bgt act risk global:setsTurnedIn:+1 next phase+
//!
//! # Ad-hoc escalating trackers
//! bgt trackers add --name "Bribes" --schedule 2,4,6 --step 3
//! bgt trackers inc <id>
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use bgt_tracker::store::{self, FileStore};
use bgt_tracker::trackers::parse_schedule_input;
use bgt_tracker::view::Row;
use bgt_tracker::{compute_escalation, Action, Catalog, Session, TrackerBoard, TrackerIds};

/// Board game companion tracker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding saved state
    #[arg(long, env = "BGT_STATE_DIR", default_value = ".bgt", global = true)]
    state_dir: PathBuf,

    /// Extra game definitions (*.json); these replace built-ins with the same key
    #[arg(long, env = "BGT_GAMES_DIR", global = true)]
    games_dir: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known games
    Games,
    /// Compute last/next reward of a schedule
    Escalate {
        /// Occurrences so far
        #[arg(long, allow_negative_numbers = true)]
        count: i64,
        /// Comma-separated schedule, e.g. 4,6,8
        #[arg(long, default_value = "")]
        schedule: String,
        /// Increment past the end of the schedule
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        step: i64,
    },
    /// Show a game's current state
    Show {
        game: String,
        /// Seat count (clamped to the game's range)
        #[arg(long)]
        players: Option<usize>,
    },
    /// Apply actions to a game and show the result
    Act {
        game: String,
        /// Actions: next, prev, select:N, phase+, phase-, turn+, turn-,
        /// global:KEY:+D, player:N:KEY:+D, set:KEY:V, name:N:TEXT,
        /// color:N:#hex, players:N, restart
        #[arg(required = true, allow_hyphen_values = true)]
        actions: Vec<String>,
        #[arg(long)]
        players: Option<usize>,
    },
    /// Forget a game's saved state
    Reset { game: String },
    /// Manage ad-hoc escalating trackers
    #[command(subcommand)]
    Trackers(TrackerCommand),
}

#[derive(Subcommand, Debug)]
enum TrackerCommand {
    /// List trackers
    List,
    /// Add a tracker
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        schedule: String,
        #[arg(long, default_value = "")]
        step: String,
    },
    /// Record one occurrence
    Inc { id: String },
    /// Undo one occurrence
    Dec { id: String },
    /// Remove a tracker
    Rm { id: String },
    /// Remove every tracker
    Clear,
}

/// Runtime options gathered from flags and environment.
#[derive(Debug)]
struct AppConfig {
    state_dir: PathBuf,
    games_dir: Option<PathBuf>,
}

impl AppConfig {
    fn from_args(args: &Args) -> Self {
        Self {
            state_dir: args.state_dir.clone(),
            games_dir: args.games_dir.clone(),
        }
    }

    fn catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::builtin().context("built-in game definitions")?;
        if let Some(dir) = &self.games_dir {
            let extra = Catalog::from_dir(dir).with_context(|| format!("loading games from {}", dir.display()))?;
            catalog.merge(extra);
        }
        Ok(catalog)
    }

    fn store(&self) -> FileStore {
        FileStore::new(&self.state_dir)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_args(&args);
    debug!(?config, "starting");

    match args.command {
        Command::Games => {
            for def in config.catalog()?.iter() {
                println!("{:<24} {} ({}-{} players)", def.key, def.name, def.min_players, def.max_players);
            }
        }
        Command::Escalate { count, schedule, step } => {
            let schedule = parse_schedule_input(&schedule);
            let esc = compute_escalation(count, schedule.as_slice(), step);
            println!("Count: {}", count.max(0));
            println!("Last:  {}", esc.last.map_or_else(|| "None".to_string(), |v| v.to_string()));
            println!("Next:  {}", esc.next);
        }
        Command::Show { game, players } => {
            let session = open(&config, &game, players)?;
            print!("{}", session.view());
        }
        Command::Act { game, actions, players } => {
            let actions = actions
                .iter()
                .map(|raw| raw.parse::<Action>())
                .collect::<Result<Vec<_>, _>>()?;
            let mut session = open(&config, &game, players)?;
            session.act_all(&actions)?;
            print!("{}", session.view());
        }
        Command::Reset { game } => {
            let mut session = open(&config, &game, None)?;
            session.reset()?;
            print!("{}", session.view());
        }
        Command::Trackers(cmd) => trackers(&config, cmd)?,
    }

    Ok(())
}

fn open(config: &AppConfig, game: &str, players: Option<usize>) -> Result<Session<FileStore>> {
    let catalog = config.catalog()?;
    let def = catalog.require(game).cloned().with_context(|| {
        let known: Vec<_> = catalog.keys().collect();
        format!("known games: {}", known.join(", "))
    })?;
    Ok(Session::open(def, config.store(), players)?)
}

fn trackers(config: &AppConfig, cmd: TrackerCommand) -> Result<()> {
    let mut store = config.store();
    let mut board = TrackerBoard::with_trackers(store::load_trackers(&store)?, TrackerIds::from_entropy());

    let changed = match cmd {
        TrackerCommand::List => false,
        TrackerCommand::Add { name, schedule, step } => {
            let id = board.add(&name, &schedule, &step);
            println!("added {}", id);
            true
        }
        TrackerCommand::Inc { id } => {
            board.increment(&id)?;
            true
        }
        TrackerCommand::Dec { id } => {
            board.decrement(&id)?;
            true
        }
        TrackerCommand::Rm { id } => {
            let removed = board.remove(&id)?;
            println!("removed {}", removed.name);
            true
        }
        TrackerCommand::Clear => {
            board.clear();
            true
        }
    };

    if changed {
        store::save_trackers(&mut store, board.trackers())?;
    }
    if board.is_empty() {
        println!("no trackers");
    }
    for tracker in board.trackers() {
        println!("{}", Row::for_tracker(tracker));
    }
    Ok(())
}
