// gridsim_cli/src/run/mod.rs
#![forbid(unsafe_code)]

pub mod life;
pub mod stacking;
pub mod stats;

pub use life::{LifeRunConfig, LifeRunner, Seeding};
pub use stacking::{StackRunConfig, StackRunner};

use indicatif::{ProgressBar, ProgressStyle};

/// Shared progress bar look for both runners. Hidden below verbosity 1.
pub(crate) fn progress_bar(len: u64, verbosity: u8) -> Option<ProgressBar> {
    if verbosity == 0 {
        return None;
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    Some(pb)
}
