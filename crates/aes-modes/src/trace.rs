//! Stage observer that writes the state matrix to the `log` facade.

use core::fmt::Write;

use aes_core::{to_rows, Block, Direction, Stage, StageObserver};

/// Logs the 4x4 state after every stage at `trace` level.
///
/// Each stage becomes a single record holding the header line and all four
/// rows, so records from blocks processed on different threads never split.
/// Output is skipped entirely unless trace logging is enabled for this
/// module.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

fn render(direction: Direction, round: usize, stage: Stage, state: &Block) -> String {
    let mut out = format!("{direction:?} round {round}: {stage}");
    for row in to_rows(state) {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "\n  {:02x} {:02x} {:02x} {:02x}",
            row[0], row[1], row[2], row[3]
        );
    }
    out
}

impl StageObserver for LogObserver {
    fn observe(&self, direction: Direction, round: usize, stage: Stage, state: &Block) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("{}", render(direction, round, stage, state));
    }
}
