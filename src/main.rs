//! Binary entrypoint for the game corner CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and create the save database
//! - `status [--json]` - coin balance and per-game records
//! - `menu` - print the game corner menu
//! - `unlock <game> | --all` - unlock one or every minigame
//! - `deposit <amount>` - credit coins (the reward multiplier applies)
//! - `play <game> [--score N] [--coins N] [--frames N] [--quit-after N] [--no-coin-case]` -
//!   run one session against a scripted minigame
//!
//! `<game>` accepts a menu number (`3`, `G3`), a display name or a slug.
//! See the library crate docs for module-level details: `gamecorner::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rand::Rng;

use gamecorner::arcade::host::{ArcadeHost, ArcadeMessage, AudioCue};
use gamecorner::arcade::menu::{format_menu, resolve_selection};
use gamecorner::arcade::minigame::{FrameInput, MinigameId, ScriptedGame};
use gamecorner::arcade::{ArcadeSettings, GateOutcome, PlayOutcome, Registry, SessionController};
use gamecorner::config::Config;
use gamecorner::metrics;
use gamecorner::storage::SaveStore;

#[derive(Parser)]
#[command(name = "gamecorner")]
#[command(about = "Game corner arcade controller")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and create the save database
    Init,
    /// Show coin balance and per-game records
    Status {
        /// Print the raw save snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List minigames with cost and lock state
    Menu,
    /// Unlock a minigame
    Unlock {
        /// Menu number, name or slug
        #[arg(required_unless_present = "all")]
        game: Option<String>,
        /// Unlock every minigame
        #[arg(long, conflicts_with = "game")]
        all: bool,
    },
    /// Credit coins through the ledger
    Deposit { amount: u32 },
    /// Play one session with a scripted minigame
    Play {
        /// Menu number, name or slug
        game: String,
        /// Final score (random when omitted)
        #[arg(long)]
        score: Option<u32>,
        /// Coins the minigame pays out (random when omitted)
        #[arg(long)]
        coins: Option<u32>,
        /// Frames until the minigame finishes
        #[arg(long, default_value_t = 60)]
        frames: u32,
        /// Press quit on this frame
        #[arg(long)]
        quit_after: Option<u32>,
        /// Play without the coin case
        #[arg(long)]
        no_coin_case: bool,
    },
}

/// Host that prints message boxes to stdout and logs everything else.
struct ConsoleHost {
    coin_case: bool,
}

impl ArcadeHost for ConsoleHost {
    fn has_coin_case(&self) -> bool {
        self.coin_case
    }

    fn reset_common_state(&mut self) {
        debug!("reset sprites, palettes and tasks");
    }

    fn return_to_overworld(&mut self) {
        debug!("returning to overworld");
    }

    fn show_message(&mut self, message: &ArcadeMessage) {
        println!("{}", message);
        println!();
    }

    fn play_audio(&mut self, cue: AudioCue) {
        debug!("audio: {:?}", cue);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            return init(&cli.config).await;
        }
        _ => Config::load(&cli.config).await?,
    };
    init_logging(&Some(config.clone()), cli.verbose);
    let settings = ArcadeSettings::from_config(&config)?;

    match cli.command {
        // Written before any config existed.
        Commands::Init => {}
        Commands::Status { json } => {
            let store = SaveStore::open(config.storage.save_path())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&store.snapshot()?)?);
                return Ok(());
            }
            let registry = Registry::standard(settings.costs());
            let mut arcade = SessionController::new(registry, store, settings);
            println!("Coins: {:04}", arcade.balance()?);
            for id in MinigameId::ALL {
                let name = arcade.registry().lookup(id).name;
                let lock = if arcade.is_unlocked(id)? { "" } else { " (locked)" };
                println!(
                    "{:<14} high {:>6}  plays {:>4}{}",
                    name,
                    arcade.high_score(id)?,
                    arcade.play_count(id)?,
                    lock
                );
            }
        }
        Commands::Menu => {
            let mut arcade = open_arcade(&config, settings, Registry::standard(&config.costs))?;
            print!("{}", format_menu(&arcade.menu()?));
        }
        Commands::Unlock { game, all } => {
            let mut arcade = open_arcade(&config, settings, Registry::standard(&config.costs))?;
            if all {
                arcade.unlock_all()?;
                println!("All minigames unlocked.");
            } else {
                let selection = game.unwrap_or_default();
                let id = select_game(&mut arcade, &selection)?;
                arcade.unlock(id)?;
                println!("{} unlocked.", arcade.registry().lookup(id).name);
            }
        }
        Commands::Deposit { amount } => {
            let mut arcade = open_arcade(&config, settings, Registry::standard(&config.costs))?;
            let balance = arcade.deposit(amount)?;
            info!("deposited {} coins", amount);
            println!("Coins: {:04}", balance);
        }
        Commands::Play {
            game,
            score,
            coins,
            frames,
            quit_after,
            no_coin_case,
        } => {
            let mut rng = rand::thread_rng();
            let score = score.unwrap_or_else(|| rng.gen_range(0..=500));
            let coins = coins.unwrap_or_else(|| rng.gen_range(0..=20));
            let frames = frames.max(1);
            let registry = Registry::with_games(&config.costs, |_| {
                Box::new(ScriptedGame::new(frames, score, coins))
            });
            let mut arcade = open_arcade(&config, settings, registry)?;
            let id = select_game(&mut arcade, &game)?;
            let mut host = ConsoleHost {
                coin_case: !no_coin_case,
            };
            let inputs = (1u32..).map(move |frame| FrameInput {
                quit_requested: quit_after.is_some_and(|q| frame >= q),
            });

            match arcade.play(id, &mut host, inputs)? {
                PlayOutcome::Declined(GateOutcome::Locked(id)) => {
                    println!("{} is locked.", arcade.registry().lookup(id).name);
                }
                PlayOutcome::Declined(GateOutcome::Disabled(id)) => {
                    println!("{} is not available.", arcade.registry().lookup(id).name);
                }
                PlayOutcome::Declined(other) => {
                    debug!("play declined: {:?}", other);
                }
                PlayOutcome::Completed(report) => {
                    println!(
                        "{}: {} frames, high score {}, played {} times, coins {:04}",
                        arcade.registry().lookup(report.id).name,
                        report.frames,
                        report.high_score,
                        report.play_count,
                        report.balance
                    );
                }
            }
            let snap = metrics::snapshot();
            debug!(
                "metrics: started={} settled={} declined={} repairs={} taken={} paid={}",
                snap.sessions_started,
                snap.sessions_settled,
                snap.sessions_declined,
                snap.high_score_repairs,
                snap.coins_taken,
                snap.coins_paid
            );
        }
    }

    Ok(())
}

async fn init(path: &str) -> Result<()> {
    info!("Initializing game corner configuration");
    if tokio::fs::try_exists(path).await? {
        warn!("{} already exists; leaving it unchanged", path);
    } else {
        Config::create_default(path).await?;
        info!("Configuration file created at {}", path);
    }
    let config = Config::load(path).await?;
    let store = SaveStore::open(config.storage.save_path())?;
    info!("Save database ready at {}", store.path().display());
    Ok(())
}

fn open_arcade(
    config: &Config,
    settings: ArcadeSettings,
    registry: Registry,
) -> Result<SessionController<SaveStore>> {
    let store = SaveStore::open(config.storage.save_path())?;
    Ok(SessionController::new(registry, store, settings))
}

fn select_game(arcade: &mut SessionController<SaveStore>, input: &str) -> Result<MinigameId> {
    let entries = arcade.menu()?;
    resolve_selection(input, &entries)
        .map(|entry| entry.id)
        .ok_or_else(|| anyhow!("Unknown game '{}'. Try the `menu` command.", input))
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|cfg| cfg.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Mutex::new(f);
        // Stdout redirected (service, pipe): the file is the only sink.
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
