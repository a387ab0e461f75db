//! Training-time records.
//!
//! After a model trains, the elapsed wall-clock time is written to a small
//! text file so later runs can report how long each network took. The format
//! is a one-line header followed by the whole number of minutes:
//!
//! ```text
//! # mins
//! 12
//! ```

use std::io;
use std::path::Path;
use std::time::Duration;

/// Whole minutes in `elapsed`, rounded down.
pub fn whole_minutes(elapsed: Duration) -> u64 {
    elapsed.as_secs() / 60
}

/// The exact file contents for a record of `minutes`.
pub fn render_record(minutes: u64) -> String {
    format!("# mins\n{minutes}\n")
}

/// Write a record of `minutes` to `path`, replacing any existing record.
pub fn write_record(path: &Path, minutes: u64) -> io::Result<()> {
    std::fs::write(path, render_record(minutes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
