//! Connect-4 solver command line
//!
//! Reads a move sequence, prints the board and the solver's answer.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use connect4::{Engine, MoveKind, Position, SolverConfig, WIDTH};

#[derive(Parser)]
#[command(name = "connect4")]
#[command(about = "Solve a Connect-4 position and print the best column")]
struct Args {
    /// Moves played so far as 1-indexed columns, e.g. "4453"
    #[arg(default_value = "")]
    moves: String,

    /// Transposition table size in entries
    #[arg(long, default_value_t = connect4::search::DEFAULT_CAPACITY)]
    tt_entries: usize,

    /// Time limit in milliseconds (0 = solve to completion)
    #[arg(short, long, default_value_t = 0)]
    time_ms: u64,

    /// Print the value of every column
    #[arg(short, long)]
    scores: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let mut position = Position::from_moves(&args.moves)
        .with_context(|| format!("invalid move sequence {:?}", args.moves))?;

    let mut config = SolverConfig::default().with_tt_capacity(args.tt_entries);
    if args.time_ms > 0 {
        config = config.with_time_limit(Duration::from_millis(args.time_ms));
    }
    let mut engine = Engine::with_config(config).context("invalid solver configuration")?;

    print!("{position}");
    println!("1 2 3 4 5 6 7");
    println!();

    if let Some(winner) = position.winner() {
        println!("{winner} has won");
        return Ok(());
    }
    if position.is_full() {
        println!("Draw: the board is full");
        return Ok(());
    }

    let analysis = engine.analyze(&mut position);
    let Some(column) = analysis.best_move else {
        return Ok(());
    };

    println!(
        "{} to move: best column {}",
        position.current_player(),
        column + 1
    );
    match (analysis.kind, analysis.score) {
        (MoveKind::Opening, _) => println!("Opening move, not searched"),
        (MoveKind::ImmediateWin, _) => println!("Wins immediately"),
        (MoveKind::Search, Some(score)) => println!("Score: {score}"),
        (MoveKind::Search, None) => println!("Score: unknown"),
    }
    if analysis.timed_out {
        println!("Time limit reached; result is the best fully searched column");
    }

    if args.scores {
        let line: Vec<String> = (0..WIDTH)
            .map(|c| analysis.scores[c].map_or_else(|| "-".to_string(), |s| s.to_string()))
            .collect();
        println!("Column scores: {}", line.join(" "));
    }
    println!(
        "Nodes: {}, time: {:.3}s",
        analysis.nodes,
        analysis.elapsed.as_secs_f64()
    );

    Ok(())
}
