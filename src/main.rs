//! Gomoku command-line front end
//!
//! Play against the engine in the terminal, ask it for a single move, or
//! run the benchmark table.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{info, Level};

use gomoku::bench::{CONFIGS, SCENARIOS};
use gomoku::engine::Evaluators;
use gomoku::{AIEngine, EngineConfig, Mode, MoveResult, Pos, Stone};

#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about = "Gomoku search engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "gomoku.toml")]
    config: PathBuf,

    /// Seed for the engine's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game against the engine
    Play {
        /// Engine mode: easy, medium, hard, or any auxiliary mode
        #[arg(long, default_value = "medium")]
        mode: Mode,

        /// Let the engine play Black and move first
        #[arg(long)]
        ai_first: bool,
    },
    /// Print the engine's move for a position
    Suggest {
        #[arg(long, default_value = "hard")]
        mode: Mode,

        /// Moves played so far from an empty board, e.g. "7,7 6,6 7,8"
        #[arg(long, default_value = "")]
        moves: String,
    },
    /// Run every benchmark configuration on every benchmark position
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("initializing logger")?;

    let config = EngineConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    info!("config: {config:?}");

    let mut engine = match cli.seed {
        Some(seed) => AIEngine::with_seed(config.clone(), seed),
        None => AIEngine::new(config.clone()),
    };

    match cli.command {
        Command::Play { mode, ai_first } => play(&config, &mut engine, mode, ai_first),
        Command::Suggest { mode, moves } => suggest(&config, &mut engine, mode, &moves),
        Command::Bench => bench(&config),
    }
}

fn play(config: &EngineConfig, engine: &mut AIEngine, mode: Mode, ai_first: bool) -> Result<()> {
    let mut board = config.new_board();
    let ai = if ai_first { Stone::Black } else { Stone::White };
    let mut lines = io::stdin().lock().lines();

    println!("Playing {mode}. Enter moves as 'row col'; 'undo' takes back a turn, 'quit' exits.");

    loop {
        println!("{board}");
        if let Some(winner) = board.winner() {
            println!("{winner} wins!");
            return Ok(());
        }
        if board.is_full() {
            println!("Draw.");
            return Ok(());
        }

        if board.current_player() == ai {
            let result = engine.get_move_with_stats(&mut board, mode);
            let Some(pos) = result.best_move else {
                bail!("engine found no move on a non-terminal board");
            };
            board
                .make_move(pos)
                .with_context(|| format!("engine chose illegal move {pos}"))?;
            println!("Engine plays {pos}  {}", stats_line(&result));
            continue;
        }

        print!("{} to move> ", board.current_player());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading move")?;

        match line.trim() {
            "" => {}
            "quit" | "q" => return Ok(()),
            "undo" | "u" => {
                for _ in 0..2 {
                    if let Some(pos) = board.last_move() {
                        board.undo_move(pos)?;
                    }
                }
            }
            input => match parse_pos(input).and_then(|pos| Ok(board.make_move(pos)?)) {
                Ok(()) => {}
                Err(err) => println!("{err}"),
            },
        }
    }
}

fn suggest(config: &EngineConfig, engine: &mut AIEngine, mode: Mode, moves: &str) -> Result<()> {
    let mut board = config.new_board();
    for token in moves.split_whitespace() {
        let pos = parse_pos(token)?;
        board
            .make_move(pos)
            .with_context(|| format!("replaying move {token}"))?;
    }
    println!("{board}");

    if let Some(winner) = board.winner() {
        println!("Game over: {winner} has won.");
        return Ok(());
    }

    let result = engine.get_move_with_stats(&mut board, mode);
    match result.best_move {
        Some(pos) => println!(
            "{} ({mode}) plays {pos}  {}",
            board.current_player(),
            stats_line(&result)
        ),
        None => println!("No move available."),
    }
    Ok(())
}

fn bench(config: &EngineConfig) -> Result<()> {
    let evaluators = Evaluators::from_config(config);

    println!(
        "{:<20} | {:<20} | {:<8} | {:<8} | {:<8} | MOVE",
        "SCENARIO", "VARIANT", "TIME", "NODES", "PRUNED"
    );
    println!("{}", "=".repeat(95));

    for scenario in &SCENARIOS {
        for bench_config in &CONFIGS {
            let mut board = scenario
                .board(config)
                .with_context(|| format!("replaying scenario {}", scenario.name))?;
            let result = bench_config.run(&mut board, &evaluators);
            let mov = result
                .best_move
                .map_or_else(|| "-".to_string(), |pos| pos.to_string());
            println!(
                "{:<20} | {:<20} | {:<7.4}s | {:<8} | {:<8} | {}",
                scenario.name,
                bench_config.name,
                result.elapsed.as_secs_f64(),
                result.nodes,
                result.pruned,
                mov
            );
        }
    }

    println!("{}", "=".repeat(95));
    Ok(())
}

/// Parse "row col" or "row,col".
fn parse_pos(text: &str) -> Result<Pos> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected 'row col', got '{text}'");
    };
    let row = row.parse().with_context(|| format!("bad row '{row}'"))?;
    let col = col.parse().with_context(|| format!("bad column '{col}'"))?;
    Ok(Pos::new(row, col))
}

fn stats_line(result: &MoveResult) -> String {
    format!(
        "[{:?}, score {}, {} nodes, {} pruned, {:.3}s]",
        result.search_type,
        result.score,
        result.nodes,
        result.pruned,
        result.elapsed.as_secs_f64()
    )
}
