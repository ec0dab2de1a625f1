use gpx_distance_lib::{DistanceError, DistanceRange, GeoPoint, TrackLog};
use std::ffi::OsString;
use std::io::{self, Write};
use std::num::ParseFloatError;

use crate::cli::{self, Request, Settings};
use crate::metadata::ProgramInfo;

const DEFAULT_PROGRAM_NAME: &str = "gpx-distance";

/// Exit status after printing the usage text
pub const EXIT_USAGE: u8 = 1;
/// Exit status after a fatal error (bad coordinate, unreadable or malformed file)
pub const EXIT_FATAL: u8 = 1;

/// Everything that ends a run without a result line
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Usage text was printed; the caller re-invokes with the mandatory flags
    #[error("usage requested")]
    Usage,

    #[error("invalid arguments: {0}")]
    Arguments(#[from] clap::Error),

    #[error("invalid -{flag} value {value:?}: {source}")]
    InvalidCoordinate {
        flag: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("invalid -{flag} value {value:?}: not a finite number")]
    NonFiniteCoordinate { flag: &'static str, value: String },

    #[error(transparent)]
    Data(#[from] DistanceError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error; a run that prints its line exits with 0
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage | CliError::Arguments(_) => EXIT_USAGE,
            CliError::InvalidCoordinate { .. }
            | CliError::NonFiniteCoordinate { .. }
            | CliError::Data(_)
            | CliError::Output(_) => EXIT_FATAL,
        }
    }

    /// Usage errors have already explained themselves on stdout
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage)
    }
}

/// Parse the arguments, measure the track log and write one CSV line to `out`
///
/// On any error nothing but (possibly) the usage text has been written to `out`.
pub fn run<I, T, W>(args: I, out: &mut W) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program_name = args
        .first()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_string());
    let info = ProgramInfo::new(program_name);

    let settings = match Settings::try_parse_go_style(args) {
        Ok(settings) => settings,
        Err(e) => {
            info.write_usage(out)?;
            return Err(e.into());
        }
    };
    let Some(request) = settings.request() else {
        info.write_usage(out)?;
        return Err(CliError::Usage);
    };

    let line = measure(request)?;
    out.write_all(line.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Compute the result line for a complete request
fn measure(request: Request<'_>) -> Result<String, CliError> {
    let reference = GeoPoint::new(
        parse_coordinate("lat", request.lat)?,
        parse_coordinate("lon", request.lon)?,
    );
    if !reference.is_in_range() {
        tracing::warn!(
            "Reference point ({}, {}) is outside the WGS84 coordinate range",
            reference.latitude,
            reference.longitude
        );
    }

    let config = cli::library_config();
    let track_log = TrackLog::from_path(request.gpxfile)?;
    let range = track_log.distance_range(reference, &config);
    if range.is_none() {
        tracing::warn!(
            "No track points found in {}, printing placeholder distances",
            request.gpxfile
        );
    }

    Ok(format_line(request, range))
}

fn parse_coordinate(flag: &'static str, value: &str) -> Result<f64, CliError> {
    let coordinate = value
        .parse::<f64>()
        .map_err(|source| CliError::InvalidCoordinate {
            flag,
            value: value.to_string(),
            source,
        })?;
    // Out-of-range literals such as 1e400 parse to infinity
    if !coordinate.is_finite() {
        return Err(CliError::NonFiniteCoordinate {
            flag,
            value: value.to_string(),
        });
    }
    Ok(coordinate)
}

/// `"<gpxfile>",<lat>,<lon>,<shortest>,<longest>` with the coordinates echoed verbatim
fn format_line(request: Request<'_>, range: Option<DistanceRange>) -> String {
    let (shortest, longest) = DistanceRange::or_sentinels(range);
    format!(
        "\"{}\",{},{},{},{}\n",
        request.gpxfile, request.lat, request.lon, shortest, longest
    )
}
