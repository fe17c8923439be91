use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, command, crate_authors, crate_description, crate_name, crate_version};

use crate::config::{Config, expand_path};
use crate::constants::{
    CONFIG_HELP, DEFAULT_CONFIG_PATH, INPUT_HELP, LOG_FILE_DEFAULT, LOG_FILE_HELP, VERBOSE_HELP,
};
use crate::errors::{Result, generic_error};
use crate::logging::LogLevel;
use crate::platform::Platform;

/// Builds the command-line interface
///
/// Defines the following arguments:
/// - `input`: Source media file handed over by the archive
/// - `config`: Path to the configuration file
/// - `log_file`: Log file overriding the configured one
/// - `verbose`: Increase verbosity level
pub fn build_command() -> Command {
    // define arg for the source media file, checked by `get_input` once
    // logging is up
    let arg_input = Arg::new("input").help(INPUT_HELP);

    // define arg for reading from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .default_value(DEFAULT_CONFIG_PATH);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(clap::ArgAction::Count);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP);

    command!()
        .author(crate_authors!())
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .arg(arg_input)
        .arg(arg_config)
        .arg(log_file)
        .arg(arg_verbose)
}

/// Parses the process arguments
///
/// Exits with a usage message when they are invalid.
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the source media file
///
/// # Errors
/// Returns an error if no input was given
pub fn get_input(matches: &ArgMatches) -> Result<PathBuf> {
    matches
        .get_one::<String>("input")
        .filter(|input| !input.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| generic_error("No input file specified"))
}

/// Gets the configuration file path
pub fn get_config_path(matches: &ArgMatches) -> PathBuf {
    let path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(expand_path(path))
}

/// Gets the verbosity level from the command-line arguments
///
/// Counts the occurrences of the "verbose" flag and converts them to a
/// `LogLevel`.
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

/// Gets the log file for the run
///
/// The command-line option wins over the configuration; without either the
/// default name in the archive temp directory is used.
pub fn get_log_file(
    matches: &ArgMatches,
    config: Option<&Config>,
    platform: &Platform,
) -> Option<PathBuf> {
    if let Some(file) = matches.get_one::<String>("log_file") {
        return Some(platform.temp_file(expand_path(file)));
    }
    match config {
        Some(config) => config.log_file(&platform.temp_dir),
        None => Some(platform.temp_file(LOG_FILE_DEFAULT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> Platform {
        Platform {
            install_dir: PathBuf::from("/usr/local/aw"),
            temp_dir: PathBuf::from("/usr/local/aw/temp"),
            bin_dir: PathBuf::from("/usr/local/aw/bin"),
        }
    }

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let matches = build_command()
            .try_get_matches_from(["proxy-gen", "/media/A001.mov"])
            .unwrap();
        assert_eq!(get_input(&matches).unwrap(), PathBuf::from("/media/A001.mov"));
        assert_eq!(get_config_path(&matches), PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(get_verbosity(&matches), LogLevel::Info);
        assert_eq!(
            get_log_file(&matches, None, &platform()),
            Some(PathBuf::from("/usr/local/aw/temp/proxy_generator.log"))
        );
    }

    #[test]
    fn test_missing_input_is_reported_by_get_input() {
        let matches = build_command()
            .try_get_matches_from(["proxy-gen"])
            .unwrap();
        let error = get_input(&matches).unwrap_err();
        assert_eq!(error.to_string(), "No input file specified");

        let matches = build_command()
            .try_get_matches_from(["proxy-gen", " "])
            .unwrap();
        assert!(get_input(&matches).is_err());
    }

    #[test]
    fn test_options() {
        let matches = build_command()
            .try_get_matches_from([
                "proxy-gen",
                "-vv",
                "--config",
                "/etc/proxy.yaml",
                "--log-file",
                "/var/log/proxy.log",
                "/media/A001.mov",
            ])
            .unwrap();
        assert_eq!(get_verbosity(&matches), LogLevel::Trace);
        assert_eq!(get_config_path(&matches), PathBuf::from("/etc/proxy.yaml"));
        assert_eq!(
            get_log_file(&matches, Some(&Config::default()), &platform()),
            Some(PathBuf::from("/var/log/proxy.log"))
        );
    }

    #[test]
    fn test_log_file_from_config() {
        let matches = build_command()
            .try_get_matches_from(["proxy-gen", "/media/A001.mov"])
            .unwrap();
        let mut config = Config::default();
        config.logging.file = "hook.log".to_string();
        assert_eq!(
            get_log_file(&matches, Some(&config), &platform()),
            Some(PathBuf::from("/usr/local/aw/temp/hook.log"))
        );

        config.logging.file = String::new();
        assert_eq!(get_log_file(&matches, Some(&config), &platform()), None);
    }
}
