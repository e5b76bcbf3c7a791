// gridsim_cli/src/run/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use gridsim_engine::ShapeSequence;

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub episodes_finished: u64,
    /// Pieces locked in the current episode.
    pub ep_len: u64,
    pub episode_len_sum: u64,
    pub episode_len_max: u64,

    pub pieces_done: u64,
    pub frames: u64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            episodes_finished: 0,
            ep_len: 0,
            episode_len_sum: 0,
            episode_len_max: 0,
            pieces_done: 0,
            frames: 0,
            t0: Instant::now(),
        }
    }

    pub fn on_lock(&mut self) {
        self.pieces_done += 1;
        self.ep_len += 1;
    }

    /// Call when an episode terminates (game_over), before resetting the game.
    pub fn on_episode_end(&mut self) {
        self.episodes_finished += 1;
        self.episode_len_sum += self.ep_len;
        self.episode_len_max = self.episode_len_max.max(self.ep_len);
        self.ep_len = 0;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn pieces_per_sec(&self) -> f64 {
        per(self.pieces_done as f64, self.elapsed_secs())
    }

    pub fn avg_ep_len(&self) -> f64 {
        per(self.episode_len_sum as f64, self.episodes_finished as f64)
    }

    pub fn lines_per_piece(&self, total_lines: u64) -> f64 {
        per(total_lines as f64, self.pieces_done as f64)
    }

    pub fn live_msg(&self, sequence: ShapeSequence, lines_per_piece: f64) -> String {
        format!(
            "seq={:?} pps={:.0} eps={} avg_ep={:.1} l/p={:.3}",
            sequence,
            self.pieces_per_sec(),
            self.episodes_finished,
            self.avg_ep_len(),
            lines_per_piece,
        )
    }

    pub fn final_report(
        &self,
        sequence: ShapeSequence,
        total_lines: u64,
        total_score: u64,
        last_ep_len: u64,
        last_game_over: bool,
    ) -> FinalReport {
        FinalReport {
            sequence,
            pieces_done: self.pieces_done,
            frames: self.frames,
            elapsed_s: self.elapsed_secs(),
            pieces_per_s: self.pieces_per_sec(),
            episodes_finished: self.episodes_finished,
            avg_ep_len: self.avg_ep_len(),
            max_ep_len: self.episode_len_max,
            lines_per_piece: self.lines_per_piece(total_lines),
            total_lines,
            total_score,
            last_ep_len,
            last_game_over,
        }
    }
}

#[inline]
fn per(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Stable end-of-run struct for the stacking rollout.
#[derive(Clone, Debug)]
pub struct FinalReport {
    pub sequence: ShapeSequence,
    pub pieces_done: u64,
    pub frames: u64,
    pub elapsed_s: f64,
    pub pieces_per_s: f64,
    pub episodes_finished: u64,
    pub avg_ep_len: f64,
    pub max_ep_len: u64,
    pub lines_per_piece: f64,
    pub total_lines: u64,
    pub total_score: u64,
    pub last_ep_len: u64,
    pub last_game_over: bool,
}
