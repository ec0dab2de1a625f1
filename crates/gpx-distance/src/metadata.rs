use clap::CommandFactory;
use shadow_rs::shadow;
use std::io::{self, Write};

use crate::cli::Settings;

shadow!(build);

/// Program description shown by the usage text
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    /// Invocation name, as passed in `argv[0]`
    pub name: String,
    pub version: &'static str,
    pub release_date: &'static str,
    pub purpose: &'static str,
    pub info: &'static str,
}

impl ProgramInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: build::PKG_VERSION,
            release_date: build::BUILD_TIME,
            purpose: "GPX (GPS Exchange Format) Distance Calculator (distances in meters)",
            info: "Shortest, longest distance between a given point and the GPX points.",
        }
    }

    /// Write the full usage text
    pub fn write_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let name = &self.name;

        writeln!(out, "\nProgram:")?;
        writeln!(out, "  Name    : {name}")?;
        writeln!(out, "  Release : {} - {}", self.version, self.release_date)?;
        writeln!(out, "  Purpose : {}", self.purpose)?;
        writeln!(out, "  Info    : {}", self.info)?;

        writeln!(out, "\nUsage:")?;
        writeln!(out, "  {name} -gpxfile=filename -lat=latitude -lon=longitude")?;

        writeln!(out, "\nExample:")?;
        writeln!(out, "  {name} -gpxfile=ellenbogen.gpx -lat=55.05 -lon=8.41")?;

        writeln!(out, "\nOptions:")?;
        let command = Settings::command();
        for arg in command.get_arguments() {
            let (Some(long), Some(help)) = (arg.get_long(), arg.get_help()) else {
                continue;
            };
            if long == "help" {
                continue;
            }
            writeln!(out, "  -{long} string")?;
            writeln!(out, "    \t{help}")?;
        }

        writeln!(out, "\nOutput:")?;
        writeln!(out, "  gpxfile,lat,lon,shortest,longest")?;

        writeln!(out, "\nExample:")?;
        writeln!(out, "  \"ellenbogen.gpx\",55.05,8.41,1066,3425")?;

        writeln!(out)
    }
}

/// Log version info at debug level
pub fn log_version_info() {
    tracing::debug!("{}", short_version_info());
    tracing::debug!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

pub fn short_version_info() -> String {
    format!(
        "{} {} ({}@{}{})",
        build::PROJECT_NAME,
        build::PKG_VERSION,
        build::BRANCH,
        build::SHORT_COMMIT,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}
