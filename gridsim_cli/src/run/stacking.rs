// gridsim_cli/src/run/stacking.rs
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use log::debug;

use gridsim_engine::{GridError, ShapeSequence, StackingConfig, StackingGame};

use super::progress_bar;
use super::stats::{FinalReport, RolloutStats};
use crate::cadence::Cadence;
use crate::pilot::Pilot;

/// Fixed internal cadence (in locked pieces) for progress-bar live message updates.
const LIVE_EVERY: u64 = 20;

#[derive(Clone, Debug)]
pub struct StackRunConfig {
    // ---------------- core rollout ----------------
    pub board: StackingConfig,
    /// Total pieces to lock across episodes.
    pub pieces: u64,
    /// Base seed; each episode uses base_seed + episode_id.
    pub base_seed: u64,
    pub sequence: ShapeSequence,

    // ---------------- timing ----------------
    /// Minimum wall-clock time between gravity ticks (0 = every frame).
    pub gravity_ms: u64,

    // ---------------- output ----------------
    /// 0 = final summary only, 1+ = progress bar
    pub verbosity: u8,
    /// If Some(ms): render every frame; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct StackRunner {
    cfg: StackRunConfig,
}

impl StackRunner {
    pub fn new(cfg: StackRunConfig) -> Self {
        Self { cfg }
    }

    fn new_episode(&self, episode_id: u64) -> Result<StackingGame, GridError> {
        StackingGame::with_sequence(
            self.cfg.board,
            self.cfg.base_seed.wrapping_add(episode_id),
            self.cfg.sequence,
        )
    }

    /// Frame loop: pilot input, then gravity when the cadence fires, then render.
    /// At most one piece locks per frame. Without rendering, a frame whose
    /// gravity was not due sleeps until it is.
    pub fn run(&mut self, pilot: &mut dyn Pilot) -> Result<FinalReport, GridError> {
        let cfg = self.cfg.clone();
        let pb = progress_bar(cfg.pieces, cfg.verbosity);

        let mut stats = RolloutStats::new();
        let mut gravity = Cadence::from_millis(cfg.gravity_ms);

        let mut episode_id: u64 = 0;
        let mut game = self.new_episode(episode_id)?;

        // Totals across completed episodes (live totals include current episode too).
        let mut total_lines_finished: u64 = 0;
        let mut total_score_finished: u64 = 0;

        if cfg.render_ms.is_some() {
            print!("{}", game.render_ascii());
        }

        while stats.pieces_done < cfg.pieces {
            // ------------------------------------------------------------
            // Episode boundary: finalize counters, then reset.
            // ------------------------------------------------------------
            if game.game_over {
                stats.on_episode_end();
                total_lines_finished += game.lines_cleared;
                total_score_finished += game.score;

                episode_id += 1;
                game = self.new_episode(episode_id)?;
                debug!("episode {episode_id} started");

                if cfg.render_ms.is_some() {
                    println!(
                        "=== reset: episodes_finished={} avg_ep_len={:.2} max_ep_len={} ===",
                        stats.episodes_finished,
                        stats.avg_ep_len(),
                        stats.episode_len_max
                    );
                }
                continue;
            }

            // ------------------------------------------------------------
            // One frame: optional command, then gravity if due.
            // ------------------------------------------------------------
            stats.frames += 1;
            let mut locked = false;
            let mut ticked = false;

            if let Some(cmd) = pilot.choose_command(&game) {
                locked |= game.apply(cmd)?.locked;
            }
            // A piece locked by the command is replaced; gravity resumes next frame.
            if !locked && !game.game_over && gravity.ready(Instant::now()) {
                ticked = true;
                locked |= game.tick()?.locked;
            }

            if locked {
                stats.on_lock();
                if let Some(ref pb) = pb {
                    pb.inc(1);
                    if stats.pieces_done % LIVE_EVERY == 0 {
                        let lpp = stats.lines_per_piece(total_lines_finished + game.lines_cleared);
                        pb.set_message(stats.live_msg(cfg.sequence, lpp));
                    }
                }
            }

            if let Some(ms) = cfg.render_ms {
                println!(
                    "frame={} pieces={} lines={}",
                    stats.frames, stats.pieces_done, game.lines_cleared
                );
                print!("{}", game.render_ascii());
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            } else if !ticked {
                let wait = gravity.remaining(Instant::now());
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
            }
        }

        let total_lines = total_lines_finished + game.lines_cleared;
        let total_score = total_score_finished + game.score;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(
            cfg.sequence,
            total_lines,
            total_score,
            stats.ep_len,
            game.game_over,
        ))
    }
}
