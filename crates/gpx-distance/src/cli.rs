use clap::{ArgAction, Parser};
use gpx_distance_lib::Config;
use std::ffi::OsString;

/// Long flag names that may be written with a single dash
const LONG_FLAGS: [&str; 4] = ["gpxfile", "lat", "lon", "help"];

/// Environment variable overriding [`Config::parallel_min_points`]
pub const PARALLEL_MIN_POINTS_ENV: &str = "GPX_DISTANCE_PARALLEL_MIN_POINTS";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
#[clap(args_override_self = true)]
/// GPX (GPS Exchange Format) Distance Calculator (distances in meters)
pub struct Settings {
    /// GPX file to parse
    #[clap(long, value_name = "FILE", default_value = "", allow_hyphen_values = true)]
    pub gpxfile: String,

    /// latitude (decimal degrees) of given point
    #[clap(long, default_value = "", allow_hyphen_values = true)]
    pub lat: String,

    /// longitude (decimal degrees) of given point
    #[clap(long, default_value = "", allow_hyphen_values = true)]
    pub lon: String,

    /// Print usage
    #[clap(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Arguments after the first non-flag argument, ignored
    #[clap(hide = true, num_args = 0.., trailing_var_arg = true)]
    pub positional: Vec<String>,
}

/// The three mandatory values, all present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub gpxfile: &'a str,
    pub lat: &'a str,
    pub lon: &'a str,
}

impl Settings {
    /// Parse Go-style arguments (`-gpxfile=x`, `-lat 1.0`, ...)
    pub fn try_parse_go_style<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// `None` when help was requested or any mandatory value is empty
    pub fn request(&self) -> Option<Request<'_>> {
        if self.help || self.gpxfile.is_empty() || self.lat.is_empty() || self.lon.is_empty() {
            return None;
        }
        Some(Request {
            gpxfile: &self.gpxfile,
            lat: &self.lat,
            lon: &self.lon,
        })
    }
}

/// Rewrite single-dash long flags to the double-dash form clap expects.
///
/// The program name and anything that is not a known flag (values such as `-33.86`)
/// are passed through unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_single_dash_long_flag(s) => format!("-{s}").into(),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

/// Generic function to get environment variable, parsing it to the desired type.
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Library configuration, with environment overrides applied
pub fn library_config() -> Config {
    let mut config = Config::default();
    if let Some(parallel_min_points) = get_env::<usize>(PARALLEL_MIN_POINTS_ENV) {
        tracing::debug!("Parallel reduction threshold set to {parallel_min_points} points");
        config.parallel_min_points = parallel_min_points;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Settings {
        Settings::try_parse_go_style(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_normalize_rewrites_known_flags_only() {
        let args = normalize_args([
            "prog",
            "-gpxfile=a.gpx",
            "-lat",
            "-33.86",
            "--lon=151.2",
            "-h",
            "-help",
            "-latitude=1",
        ]);
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            [
                "prog",
                "--gpxfile=a.gpx",
                "--lat",
                "-33.86",
                "--lon=151.2",
                "-h",
                "--help",
                "-latitude=1"
            ]
        );
    }

    #[test]
    fn test_program_name_is_untouched() {
        let args = normalize_args(["-lat"]);
        assert_eq!(args, [OsString::from("-lat")]);
    }

    #[test]
    fn test_parse_equals_form() {
        let settings = parse(&["prog", "-gpxfile=ellenbogen.gpx", "-lat=55.05", "-lon=8.41"]);
        assert_eq!(
            settings.request(),
            Some(Request {
                gpxfile: "ellenbogen.gpx",
                lat: "55.05",
                lon: "8.41"
            })
        );
    }

    #[test]
    fn test_parse_separate_values_and_negative_coordinates() {
        let settings = parse(&["prog", "-gpxfile", "sydney.gpx", "-lat", "-33.86", "--lon", "151.2"]);
        let request = settings.request().unwrap();
        assert_eq!(request.lat, "-33.86");
        assert_eq!(request.lon, "151.2");
    }

    #[test]
    fn test_missing_values_yield_no_request() {
        assert_eq!(parse(&["prog"]).request(), None);
        assert_eq!(parse(&["prog", "-gpxfile=a.gpx", "-lat=1"]).request(), None);
        assert_eq!(parse(&["prog", "-gpxfile=", "-lat=1", "-lon=2"]).request(), None);
    }

    #[test]
    fn test_help_yields_no_request() {
        for flag in ["-h", "-help", "--help"] {
            let settings = parse(&["prog", flag, "-gpxfile=a.gpx", "-lat=1", "-lon=2"]);
            assert!(settings.help, "{flag} should set help");
            assert_eq!(settings.request(), None);
        }
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let result = Settings::try_parse_go_style(["prog", "-radius=5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repeated_flag_keeps_last_value() {
        let settings = parse(&["prog", "-lat=1", "-gpxfile", "a.gpx", "-lat", "55.05", "-lon=8.41"]);
        assert_eq!(settings.request().unwrap().lat, "55.05");
    }

    #[test]
    fn test_arguments_after_first_positional_are_ignored() {
        let settings = parse(&["prog", "-gpxfile=a.gpx", "-lat=1", "-lon=2", "extra", "-lat=9"]);
        assert_eq!(settings.positional.len(), 2);
        assert_eq!(settings.positional[0], "extra");
        let request = settings.request().unwrap();
        assert_eq!(request.lat, "1");
        assert_eq!(request.lon, "2");
    }

    #[test]
    fn test_gpxfile_may_start_with_dash() {
        let settings = parse(&["prog", "-gpxfile", "-track.gpx", "-lat=1", "-lon=2"]);
        assert_eq!(settings.request().unwrap().gpxfile, "-track.gpx");
    }

    #[test]
    fn test_get_env_unset() {
        assert_eq!(get_env::<usize>("GPX_DISTANCE_TEST_UNSET_VARIABLE"), None);
    }
}
