use clap::Parser;
use delve::build_info;
use delve::core::config::GameConfig;
use delve::core::{Game, GameResult};
use delve::save_manager::SaveManager;
use delve::ui::{ConsoleInterface, ScriptedInterface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based text dungeon crawler")]
#[command(disable_version_flag = true)]
struct Args {
    /// Random seed for a reproducible dungeon and fights
    #[arg(short, long)]
    seed: Option<u64>,

    /// Save file location (default: platform data directory)
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Config file location (default: platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides it
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Play the input lines of a file instead of the keyboard and print
    /// the transcript
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Print build date and commit, then exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        println!("{}", build_info::version_line());
        return ExitCode::SUCCESS;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let mut config = GameConfig::load(args.config.as_deref());
    if args.no_color {
        config.color = false;
    }

    let saves = match args.save_file.or(config.save_file.clone()) {
        Some(path) => SaveManager::with_path(path),
        None => SaveManager::new().unwrap_or_else(|e| {
            log::warn!("{}, saving to the working directory", e);
            SaveManager::with_path("savegame.txt")
        }),
    };
    log::debug!("save file: {}", saves.path().display());

    let rng = match args.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let result = match args.replay {
        Some(path) => replay(&path, rng, saves),
        None => {
            let ui = ConsoleInterface::new(config.color, config.message_delay_ms);
            Game::new(ui, rng, saves).run()
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("game aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn replay(path: &Path, rng: StdRng, saves: SaveManager) -> GameResult<()> {
    let script = fs::read_to_string(path)?;
    log::info!("replaying {} input lines from {}", script.lines().count(), path.display());
    let mut game = Game::new(ScriptedInterface::new(script.lines()), rng, saves);
    let result = game.run();
    println!("{}", game.ui().transcript());
    let unused = game.ui().remaining_input();
    if unused > 0 {
        log::warn!("replay ended with {} input lines unread", unused);
    }
    result
}
