// gridsim_cli/src/run/life.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use anyhow::{anyhow, Result};
use log::info;

use gridsim_engine::{AutomatonConfig, AutomatonGrid, LifeCommand, LifeSession, Pattern};

use super::progress_bar;
use crate::cadence::Cadence;

/// How the grid is populated before the first generation.
#[derive(Clone, Debug)]
pub enum Seeding {
    Pattern { name: String, origin: (usize, usize) },
    Random { density: f64, seed: u64 },
}

#[derive(Clone, Debug)]
pub struct LifeRunConfig {
    pub grid: AutomatonConfig,
    pub generations: u64,
    /// Minimum wall-clock time between generations.
    pub interval_ms: u64,
    pub seeding: Seeding,
    pub render: bool,
    pub verbosity: u8,
}

#[derive(Clone, Debug)]
pub struct LifeReport {
    pub generations: u64,
    pub elapsed_s: f64,
    pub generations_per_s: f64,
    pub initial_population: usize,
    pub final_population: usize,
    pub peak_population: usize,
    pub extinct: bool,
}

pub struct LifeRunner {
    cfg: LifeRunConfig,
}

impl LifeRunner {
    pub fn new(cfg: LifeRunConfig) -> Self {
        Self { cfg }
    }

    fn seeded_grid(&self) -> Result<AutomatonGrid> {
        let mut grid = AutomatonGrid::new(self.cfg.grid)?;
        match &self.cfg.seeding {
            Seeding::Pattern { name, origin } => {
                let pattern = Pattern::by_name(name)
                    .ok_or_else(|| anyhow!("unknown pattern {name:?}"))?;
                grid.place(pattern, *origin)?;
            }
            Seeding::Random { density, seed } => grid.randomize(*density, *seed),
        }
        Ok(grid)
    }

    /// Runs the session until `generations` have been computed. The session is
    /// stepped only when the interval cadence fires; the loop sleeps otherwise.
    pub fn run(&mut self) -> Result<LifeReport> {
        let cfg = self.cfg.clone();
        let pb = progress_bar(cfg.generations, cfg.verbosity);

        let mut session = LifeSession::from_grid(self.seeded_grid()?);
        let initial_population = session.grid.population();
        let mut peak_population = initial_population;
        info!(
            "life {}x{} seeded with {} live cells",
            cfg.grid.width, cfg.grid.height, initial_population
        );

        if cfg.render {
            print!("{}", session.grid.render_ascii());
        }

        let t0 = Instant::now();
        let mut cadence = Cadence::from_millis(cfg.interval_ms);
        session.apply(LifeCommand::Run)?;

        while session.generation() < cfg.generations {
            let now = Instant::now();
            if !cadence.ready(now) {
                std::thread::sleep(cadence.remaining(now));
                continue;
            }
            if !session.tick() {
                break;
            }

            let pop = session.grid.population();
            peak_population = peak_population.max(pop);

            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(format!("pop={pop}"));
            }
            if cfg.render {
                println!("generation={} population={}", session.generation(), pop);
                print!("{}", session.grid.render_ascii());
            }
        }
        session.apply(LifeCommand::Stop)?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let elapsed_s = t0.elapsed().as_secs_f64();
        let generations = session.generation();
        let final_population = session.grid.population();
        Ok(LifeReport {
            generations,
            elapsed_s,
            generations_per_s: if elapsed_s > 0.0 {
                generations as f64 / elapsed_s
            } else {
                0.0
            },
            initial_population,
            final_population,
            peak_population,
            extinct: final_population == 0,
        })
    }
}
