//! Checkers-Rust: an 8x8 draughts engine.
//!
//! ## Usage
//!
//! - `checkers-rust` - Show a demo
//! - `checkers-rust protocol` - Start the text protocol server
//! - `checkers-rust selfplay` - Let the computer play both sides
//! - `checkers-rust replay <file>` - Replay a move log and show the result
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_rust::constants::MAX_GAME_PLIES;
use checkers_rust::game::Game;
use checkers_rust::protocol::TextEngine;
use checkers_rust::replay::MoveLog;
use checkers_rust::save::GameStyle;

/// Checkers-Rust: an 8x8 draughts engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the computer player's tie-breaking
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Forbid capturing more than once per turn
    #[arg(long, global = true)]
    no_multi_capture: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server on stdin/stdout
    Protocol {
        /// Game style label, e.g. "Player-vs-Computer"
        #[arg(long, default_value = "Player-vs-Computer")]
        style: GameStyle,
    },
    /// Let the computer play both sides
    Selfplay {
        /// Stop and call a draw after this many turns
        #[arg(long, default_value_t = MAX_GAME_PLIES)]
        max_plies: usize,
    },
    /// Replay a move log and print the final position
    Replay {
        file: PathBuf,
    },
    /// Run a short demo
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let allow_multi_capture = !cli.no_multi_capture;

    match cli.command {
        Some(Commands::Protocol { style }) => {
            let mut game = new_game(cli.seed, style);
            game.set_allow_multi_capture(allow_multi_capture);
            TextEngine::with_game(game).run()?;
        }
        Some(Commands::Selfplay { max_plies }) => {
            let mut game = new_game(cli.seed, GameStyle::ComputerVsComputer);
            game.set_allow_multi_capture(allow_multi_capture);
            run_selfplay(&mut game, max_plies)?;
        }
        Some(Commands::Replay { file }) => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let log: MoveLog = text.parse()?;
            let game = Game::replay(&log, allow_multi_capture)?;
            println!("{}", game.position());
            println!("{} moves replayed", log.len());
        }
        Some(Commands::Demo) | None => {
            run_demo(cli.seed)?;
        }
    }
    Ok(())
}

fn new_game(seed: Option<u64>, style: GameStyle) -> Game {
    match seed {
        Some(seed) => Game::with_seed(style, seed),
        None => Game::new(style),
    }
}

fn run_selfplay(game: &mut Game, max_plies: usize) -> Result<()> {
    let mut plies = 0;
    while !game.position().is_game_over() && plies < max_plies {
        let player = game.position().current_player();
        let legs = game.computer_move()?;
        let text: Vec<String> = legs.iter().map(|m| m.to_string()).collect();
        println!("{:>3}. {player}: {}", plies + 1, text.join(" "));
        plies += 1;
    }

    println!("\n{}", game.position());
    match game.position().winner() {
        Some(winner) => println!("{winner} has won the game!"),
        None => println!("Draw after {plies} turns"),
    }
    println!("Log: {}", game.log());
    Ok(())
}

fn run_demo(seed: Option<u64>) -> Result<()> {
    println!("Checkers-Rust: 8x8 draughts engine\n");

    let mut game = new_game(seed, GameStyle::PlayerVsComputer);
    println!("{}", game.position());
    println!("Legal moves for {}:", game.position().current_player());
    for mv in game.position().legal_moves() {
        println!("  {mv}");
    }

    println!("\nBlack plays 22-18");
    game.play_notation("22-18")?;
    let legs = game.computer_move()?;
    for mv in &legs {
        println!("Red replies {mv}");
    }
    println!("\n{}", game.position());
    let pos = game.position();
    println!("Evaluation for {}: {}", pos.current_player(), pos.value2(pos.current_player()));
    Ok(())
}
