//! Reverse-TTT: reverse tic-tac-toe against a minimax opponent.
//!
//! ## Usage
//!
//! - `reverse-ttt` - Play a game in the terminal
//! - `reverse-ttt protocol` - Start the text protocol on stdin/stdout
//! - `reverse-ttt demo` - Pit the engine against a random mover

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reverse_ttt::board::{Coord, Side, parse_coord, str_coord};
use reverse_ttt::game::{Difficulty, Game, Outcome};
use reverse_ttt::protocol::{ProtocolEngine, RULES};

/// Reverse-TTT: completing three in a row loses
#[derive(Parser)]
#[command(name = "reverse-ttt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Computer strength
    #[arg(short, long, global = true, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,

    /// Search depth in plies, overrides --difficulty
    #[arg(long, global = true)]
    depth: Option<usize>,

    /// Who moves first
    #[arg(short, long, global = true, default_value_t = Side::Human)]
    first: Side,

    /// Log search and game events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play,
    /// Run the text protocol for use by other programs
    Protocol,
    /// Play the computer against a random mover and print the tally
    Demo {
        /// Number of games to play
        #[arg(short, long, default_value_t = 100)]
        games: usize,
        /// Seed for the random mover
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

impl Cli {
    fn new_game(&self) -> Game {
        match self.depth {
            Some(depth) => Game::with_depth(depth, self.first),
            None => Game::new(self.difficulty, self.first),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let game = cli.new_game();
    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::from_game(game);
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("protocol loop failed")
        }
        Some(Commands::Demo { games, seed }) => run_demo(game, games, seed),
        Some(Commands::Play) | None => run_play(game),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_play(mut game: Game) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    for rule in RULES {
        println!("{rule}");
    }
    println!("\nYou are X, the computer is O. Enter moves like b2, q to quit.\n");

    while !game.outcome().is_over() {
        match game.to_move() {
            Side::Computer => {
                let (coord, _) = game.computer_move()?;
                println!("AI plays {}", str_coord(coord));
            }
            Side::Human => {
                print!("{}Your move: ", game.board());
                stdout.flush()?;

                let Some(line) = lines.next() else {
                    return Ok(());
                };
                let line = line.context("failed to read move")?;
                let input = line.trim();
                if input.eq_ignore_ascii_case("q") {
                    return Ok(());
                }

                let Some((row, col)) = parse_coord(input) else {
                    println!("Invalid vertex '{input}'");
                    continue;
                };
                if let Err(e) = game.play(row, col) {
                    println!("{e}");
                }
            }
        }
    }

    println!("\n{}\n{}", game.board(), game.outcome());
    Ok(())
}

fn run_demo(mut game: Game, games: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seed.map(fastrand::Rng::with_seed).unwrap_or_default();
    let first = game.first();
    let (mut ai_losses, mut random_losses, mut draws) = (0, 0, 0);

    for i in 0..games {
        // Alternate who starts
        game.restart_with(if i % 2 == 0 { first } else { first.opponent() });

        while !game.outcome().is_over() {
            match game.to_move() {
                Side::Computer => {
                    game.computer_move()?;
                }
                Side::Human => {
                    let cells: Vec<Coord> = game.board().empty_cells().collect();
                    let (row, col) = cells[rng.usize(..cells.len())];
                    game.play(row, col)?;
                }
            }
        }

        match game.outcome() {
            Outcome::Lost(Side::Computer) => ai_losses += 1,
            Outcome::Lost(Side::Human) => random_losses += 1,
            _ => draws += 1,
        }
    }

    info!(games, ai_losses, random_losses, draws, "demo finished");
    println!("Games: {games}");
    println!("AI losses: {ai_losses}");
    println!("Random mover losses: {random_losses}");
    println!("Draws: {draws}");
    Ok(())
}
