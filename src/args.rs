use crate::connection::{DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT};
use crate::tui::{DEFAULT_PER_PAGE, SessionConfig};
use clap::{Arg, ArgMatches, Command, value_parser};
use std::{ffi::OsString, path::PathBuf};

#[derive(Debug, Clone)]
pub struct MainArgs {
    pub debug: bool,
    pub host: String,
    pub port: String,
    pub user: String,
    pub database: String,
    pub output_dir: Option<PathBuf>,
    pub per_page: usize,
}

impl MainArgs {
    /// Values that prefill the interactive connection form.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            host: self.host.clone(),
            port: self.port.clone(),
            user: self.user.clone(),
            database: self.database.clone(),
            per_page: self.per_page,
        }
    }
}

pub fn build_cli_command() -> Command {
    Command::new("snaptui")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pick PostgreSQL databases from the server catalog and back them up with pg_dump.")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging to ~/.snaptui/logs/snaptui.log")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .env("PGHOST")
                .default_value(DEFAULT_HOST)
                .help("Server host used to prefill the connection form"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .env("PGPORT")
                .default_value(DEFAULT_PORT)
                .help("Server port used to prefill the connection form"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .env("PGUSER")
                .default_value("")
                .hide_default_value(true)
                .help("User name used to prefill the connection form"),
        )
        .arg(
            Arg::new("dbname")
                .long("dbname")
                .env("PGDATABASE")
                .default_value(DEFAULT_DATABASE)
                .help("Database used to read the catalog"),
        )
        .arg(
            Arg::new("output_dir")
                .long("output-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for backup files (default: the directory of this executable)"),
        )
        .arg(
            Arg::new("per_page")
                .long("per-page")
                .value_name("N")
                .value_parser(value_parser!(u16).range(1..))
                .default_value("10")
                .help("Number of databases shown per page"),
        )
}

fn string_arg(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn from_matches(matches: &ArgMatches) -> MainArgs {
    MainArgs {
        debug: matches.get_flag("debug"),
        host: string_arg(matches, "host"),
        port: string_arg(matches, "port"),
        user: string_arg(matches, "user"),
        database: string_arg(matches, "dbname"),
        output_dir: matches.get_one::<PathBuf>("output_dir").cloned(),
        per_page: matches.get_one::<u16>("per_page").map(|value| usize::from(*value)).unwrap_or(DEFAULT_PER_PAGE),
    }
}

/// Parse an explicit argument list without exiting the process.
pub fn parse_main_args_from<I, T>(cmd: &Command, args: I) -> Result<MainArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cmd.clone().try_get_matches_from(args)?;
    Ok(from_matches(&matches))
}

/// Parses command-line arguments using clap, exiting on `--help` or bad input.
pub fn main_args() -> MainArgs {
    let matches = build_cli_command().get_matches();
    from_matches(&matches)
}

#[cfg(test)]
#[path = "test/args.rs"]
mod tests;
