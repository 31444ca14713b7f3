use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use twenty48_engine::Move;
use twenty48_host::config::Config;
use twenty48_host::session::{GameSession, SessionEvent, SessionStatus};
use twenty48_host::store::{MemoryScoreStore, ScoreStore, SqliteScoreStore};

#[derive(Parser, Debug)]
#[command(name = "twenty48", about = "Play 2048 in the terminal")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Fixed RNG seed for reproducible games (overrides the config).
    #[arg(long)]
    seed: Option<u64>,
    /// Path to the SQLite best-score database (overrides the config).
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,
    /// Skip best-score persistence entirely.
    #[arg(long)]
    no_store: bool,
}

enum Command {
    Event(SessionEvent),
    Quit,
}

/// Key-to-direction mapping lives here, not in the engine or the reducer.
fn parse_command(input: &str) -> Option<Command> {
    let event = match input.to_ascii_lowercase().as_str() {
        "a" | "left" => SessionEvent::Shift(Move::Left),
        "d" | "right" => SessionEvent::Shift(Move::Right),
        "w" | "up" => SessionEvent::Shift(Move::Up),
        "s" | "down" => SessionEvent::Shift(Move::Down),
        "new" => SessionEvent::NewGame,
        "q" | "quit" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Event(event))
}

fn render(session: &GameSession) {
    println!("{}", session.board);
    println!("score: {}   best: {}", session.score, session.best);
    if session.status == SessionStatus::GameOver {
        println!("game over. type `new` to restart.");
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_toml(path)
            .map_err(|err| anyhow!("failed to load config {}: {err}", path.display()))?,
        None => Config::default(),
    };

    let seed = args.seed.or(config.game.seed);
    let store_path = if args.no_store {
        None
    } else {
        args.store.clone().or(config.store.path.clone())
    };

    let mut store: Box<dyn ScoreStore> = match &store_path {
        Some(path) => Box::new(
            SqliteScoreStore::open(path)
                .with_context(|| format!("failed to open score store {}", path.display()))?,
        ),
        None => Box::new(MemoryScoreStore::default()),
    };

    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let best = store.load_best()?;
    info!("starting game, best so far: {best}");
    let mut session = GameSession::new(best, &mut rng);
    render(&session);
    println!("moves: w/a/s/d or up/down/left/right, `new`, `quit`");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        let event = match parse_command(line.trim()) {
            Some(Command::Quit) => break,
            Some(Command::Event(event)) => event,
            None => {
                println!("moves: w/a/s/d or up/down/left/right, `new`, `quit`");
                continue;
            }
        };

        let next = session.apply(event, &mut rng);
        if next.best > session.best {
            store.save_best(next.best)?;
        }
        if next.status == SessionStatus::GameOver && session.status == SessionStatus::Active {
            info!(
                "game over: score {}, highest tile {}",
                next.score,
                next.board.highest_tile()
            );
        }
        session = next;
        render(&session);
    }

    info!("bye. best score: {}", session.best);
    Ok(())
}
