//! GPX Distance - Command line front end
//!
//! Parses Go-style flags (`-gpxfile=... -lat=... -lon=...`), measures the shortest and
//! longest distance from the given point to the track points of a GPX file, and prints
//! the result as a single CSV line.

pub mod cli;
mod metadata;
mod run;

pub use metadata::{ProgramInfo, log_version_info};
pub use run::{CliError, run};
