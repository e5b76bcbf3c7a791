// gridsim_cli/src/main.rs
#![forbid(unsafe_code)]

mod cadence;
mod pilot;
mod run;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use gridsim_engine::{AutomatonConfig, ShapeSequence, StackingConfig};

use crate::pilot::RandomPilot;
use crate::run::{LifeRunConfig, LifeRunner, Seeding, StackRunConfig, StackRunner};

#[derive(Parser, Debug)]
#[command(name = "gridsim", about = "Headless driver for the stacking game and the life automaton")]
struct Cli {
    /// Base RNG seed. If omitted, a fixed default is used.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Verbosity: 0=silent (final summary only), 1=progress bar.
    #[arg(long, global = true, default_value_t = 1)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Autoplay the falling-block stacking game with a random pilot.
    Stack(StackArgs),
    /// Run the two-state life automaton.
    Life(LifeArgs),
}

/// Order in which shapes are dealt.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SequenceArg {
    Uniform,
    #[value(alias = "7bag", alias = "bag")]
    Bag7,
}

impl From<SequenceArg> for ShapeSequence {
    fn from(arg: SequenceArg) -> Self {
        match arg {
            SequenceArg::Uniform => ShapeSequence::Uniform,
            SequenceArg::Bag7 => ShapeSequence::Bag7,
        }
    }
}

#[derive(Args, Debug)]
struct StackArgs {
    // ---------------- board ----------------
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Total rows, hidden margin included.
    #[arg(long, default_value_t = 22)]
    height: usize,

    /// Hidden rows above the visible playfield; a settled cell there is a loss.
    #[arg(long, default_value_t = 2)]
    upper_border: usize,

    #[arg(long, value_enum, default_value_t = SequenceArg::Uniform)]
    sequence: SequenceArg,

    // ---------------- rollout sizing ----------------
    /// Total pieces to lock across episodes.
    #[arg(long, default_value_t = 200)]
    pieces: u64,

    /// Gravity interval in ms (0 = one gravity tick per frame).
    #[arg(long, default_value_t = 0)]
    gravity_ms: u64,

    /// Probability that the pilot hard-drops on a given frame.
    #[arg(long, default_value_t = 0.05)]
    drop_rate: f64,

    // ---------------- output ----------------
    /**
     * Render board as ASCII every frame; value is sleep in ms (e.g. 30). Omit to disable.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,
}

#[derive(Args, Debug)]
struct LifeArgs {
    #[arg(long, default_value_t = 40)]
    width: usize,

    #[arg(long, default_value_t = 40)]
    height: usize,

    /// Generations to compute before exiting.
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Minimum wall-clock time between generations in ms.
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Seed pattern: block | blinker | toad | beacon | glider | r-pentomino
    #[arg(long, conflicts_with = "density")]
    pattern: Option<String>,

    /// Top-left corner of the seed pattern as "x,y".
    #[arg(long, value_parser = parse_origin, default_value = "1,1")]
    origin: (usize, usize),

    /// Random soup density in [0, 1] (used when no --pattern is given).
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Render the grid as ASCII after every generation.
    #[arg(long)]
    render: bool,
}

fn parse_origin(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok((x, y))
}

fn run_stack(args: StackArgs, base_seed: u64, verbosity: u8) -> Result<()> {
    let cfg = StackRunConfig {
        board: StackingConfig {
            width: args.width,
            height: args.height,
            upper_border: args.upper_border,
        },
        pieces: args.pieces,
        base_seed,
        sequence: args.sequence.into(),
        gravity_ms: args.gravity_ms,
        render_ms: args.render,
        verbosity,
    };

    let mut pilot = RandomPilot::new(base_seed.wrapping_add(999), args.drop_rate);
    let mut runner = StackRunner::new(cfg);
    let report = runner
        .run(&mut pilot)
        .context("stacking rollout failed")?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: mode=stack sequence={:?} pieces={} frames={} elapsed={:.3}s pieces/s={:.1} episodes_finished={} avg_ep_len={:.2} max_ep_len={} lines/piece={:.3} total_score={} total_lines={} (last_ep_len={} last_game_over={})",
        report.sequence,
        report.pieces_done,
        report.frames,
        report.elapsed_s,
        report.pieces_per_s,
        report.episodes_finished,
        report.avg_ep_len,
        report.max_ep_len,
        report.lines_per_piece,
        report.total_score,
        report.total_lines,
        report.last_ep_len,
        report.last_game_over,
    );
    Ok(())
}

fn run_life(args: LifeArgs, base_seed: u64, verbosity: u8) -> Result<()> {
    let seeding = match args.pattern {
        Some(name) => Seeding::Pattern {
            name,
            origin: args.origin,
        },
        None => Seeding::Random {
            density: args.density,
            seed: base_seed,
        },
    };

    let cfg = LifeRunConfig {
        grid: AutomatonConfig {
            width: args.width,
            height: args.height,
        },
        generations: args.generations,
        interval_ms: args.interval_ms,
        seeding,
        render: args.render,
        verbosity,
    };

    let report = LifeRunner::new(cfg).run().context("life run failed")?;

    println!(
        "DONE: mode=life generations={} elapsed={:.3}s gens/s={:.1} initial_pop={} final_pop={} peak_pop={} extinct={}",
        report.generations,
        report.elapsed_s,
        report.generations_per_s,
        report.initial_population,
        report.final_population,
        report.peak_population,
        report.extinct,
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Episode seeds are derived from this base seed.
    let base_seed = cli.seed.unwrap_or(12345);

    match cli.command {
        Command::Stack(args) => run_stack(args, base_seed, cli.verbosity),
        Command::Life(args) => run_life(args, base_seed, cli.verbosity),
    }
}
