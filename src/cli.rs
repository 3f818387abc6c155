//! Command-line overrides.
//!
//! # Responsibilities
//! - Split each argument into `--name` and optional `=value`
//! - Recognize `--config=PATH`, `--help` and `--version`
//! - Stop at the first argument that ends the process
//!
//! # Design Decisions
//! - Arguments are processed strictly left to right; nothing after a terminal
//!   argument is inspected
//! - Usage text comes from a clap `Command`, parsing does not: clap would reject
//!   a later bad argument before honoring an earlier `--help`

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use thiserror::Error;

use crate::config::DEFAULT_CONFIG_PATH;

/// Exit status for help, version and usage errors.
pub const USAGE_EXIT_CODE: i32 = 255;

/// Settings the bootstrap runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Where the XML configuration is read from.
    pub config_path: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Options),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("--config requires valid PATH")]
    MissingPath,

    #[error("'{0}' not valid as command argument")]
    Unrecognized(String),

    #[error("empty command argument")]
    Empty,
}

/// Split `arg` into name and value on the first `=`.
///
/// A leading `=` does not count as a separator.
pub fn split_argument(arg: &str) -> (&str, Option<&str>) {
    match arg.find('=') {
        Some(index) if index > 0 => (&arg[..index], Some(&arg[index + 1..])),
        _ => (arg, None),
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = Options::default();

    for arg in args {
        let arg = arg.as_ref();
        if arg.is_empty() {
            return Err(UsageError::Empty);
        }

        let (name, value) = split_argument(arg);
        if name.eq_ignore_ascii_case("--config") {
            match value {
                Some(path) if !path.is_empty() => options.config_path = PathBuf::from(path),
                _ => return Err(UsageError::MissingPath),
            }
        } else if name.eq_ignore_ascii_case("--help") {
            return Ok(Invocation::Help);
        } else if name.eq_ignore_ascii_case("--version") {
            return Ok(Invocation::Version);
        } else {
            return Err(UsageError::Unrecognized(name.to_string()));
        }
    }

    Ok(Invocation::Run(options))
}

fn command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .override_usage(format!("{} [OPTION]", env!("CARGO_PKG_NAME")))
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("override the default path to the config.xml file"),
        )
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::SetTrue)
                .help("display this help and exit"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .action(ArgAction::SetTrue)
                .help("output version information and exit"),
        )
}

/// Usage text printed for `--help` and usage errors.
pub fn usage() -> String {
    command().render_help().to_string()
}

/// `MAJOR.MINOR.MICRO`.
pub fn version() -> String {
    format!(
        "{}.{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH")
    )
}

/// Startup banner, printed before the command line is read.
pub fn banner() -> String {
    format!(
        "*******************************************************************\n\
         media-relay {}\n\
         'quit' to quit the application.\n\
         *******************************************************************\n",
        version()
    )
}
