//! Export executor: produces one `pg_dump` artifact per database.

use crate::command_path::{self, PG_DUMP_INSTALL_HINT};
use crate::connection::ConnectionDescriptor;
use crate::{log_debug, log_error, log_info, log_warn};
use chrono::{DateTime, Local};
use secrecy::ExposeSecret;
use std::{
    error::Error,
    fmt,
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    process::Command,
};
use zeroize::Zeroizing;

const ARTIFACT_EXTENSION: &str = "backup";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const MAX_NAME_ATTEMPTS: usize = 100;

/// Failure to export a single target. Always recovered by the batch runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    ToolNotFound(String),
    /// The artifact file could not be created in the output directory.
    Output(String),
    Spawn(String),
    Failed { status: Option<i32>, output: String },
}

impl ExportError {
    /// Text shown next to the target on the report screen.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::ToolNotFound(msg) => write!(f, "pg_dump not found ({}). {}", msg, PG_DUMP_INSTALL_HINT),
            ExportError::Output(msg) => write!(f, "cannot create backup file: {}", msg),
            ExportError::Spawn(msg) => write!(f, "failed to start pg_dump: {}", msg),
            ExportError::Failed { status, output } => {
                match status {
                    Some(code) => write!(f, "pg_dump exited with status {}", code)?,
                    None => write!(f, "pg_dump was terminated by a signal")?,
                }
                if !output.is_empty() {
                    write!(f, ": {}", output)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ExportError {}

/// Produces one artifact for one target, returning the artifact name.
pub trait Exporter: Send + Sync {
    fn export(&self, connection: &ConnectionDescriptor, target: &str) -> Result<String, ExportError>;
}

/// `<target>_<YYYYMMDD_HHMMSS>.backup`, with path separators replaced.
pub fn artifact_name(target: &str, at: DateTime<Local>) -> String {
    numbered_artifact_name(target, at, 0)
}

/// Attempt `n > 0` appends `_<n>` after the timestamp.
fn numbered_artifact_name(target: &str, at: DateTime<Local>, attempt: usize) -> String {
    let stem: String = target.chars().map(|ch| if matches!(ch, '/' | '\\' | '\0') { '_' } else { ch }).collect();
    let stamp = at.format(TIMESTAMP_FORMAT);
    match attempt {
        0 => format!("{}_{}.{}", stem, stamp, ARTIFACT_EXTENSION),
        n => format!("{}_{}_{}.{}", stem, stamp, n, ARTIFACT_EXTENSION),
    }
}

/// Claim a file name nobody else holds by creating the file empty.
///
/// Sanitizing maps `a/b` and `a_b` onto one name, and two runs can land in
/// the same second, so the plain name is only the first candidate.
fn reserve_artifact(dir: &Path, target: &str, at: DateTime<Local>) -> Result<(String, PathBuf), ExportError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = numbered_artifact_name(target, at, attempt);
        let path = dir.join(&name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => return Ok((name, path)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(ExportError::Output(format!("{}: {}", path.display(), err))),
        }
    }
    Err(ExportError::Output(format!(
        "every name for '{}' at {} is taken in {}",
        target,
        at.format(TIMESTAMP_FORMAT),
        dir.display()
    )))
}

fn discard_artifact(file: &Path) {
    if let Err(err) = fs::remove_file(file)
        && err.kind() != io::ErrorKind::NotFound
    {
        log_warn!("Could not remove partial backup {}: {}", file.display(), err);
    }
}

#[derive(Clone, PartialEq, Eq)]
struct PreparedDumpCommand {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, Zeroizing<String>)>,
}

fn build_dump_command(pg_dump: &Path, connection: &ConnectionDescriptor, target: &str, file: &Path) -> PreparedDumpCommand {
    let mut args = vec![
        "--host".to_string(),
        connection.host.trim().to_string(),
        "--port".to_string(),
        connection.port.trim().to_string(),
    ];
    let user = connection.user.trim();
    if !user.is_empty() {
        args.push("--username".to_string());
        args.push(user.to_string());
    }
    args.extend([
        "--no-password".to_string(),
        "--format".to_string(),
        "custom".to_string(),
        "--file".to_string(),
        file.to_string_lossy().to_string(),
        // A database named like an option must still be read as the target.
        "--".to_string(),
        target.to_string(),
    ]);

    let mut env = Vec::new();
    let password = connection.password.expose_secret();
    if !password.is_empty() {
        env.push(("PGPASSWORD".to_string(), Zeroizing::new(password.to_string())));
    }

    PreparedDumpCommand {
        program: pg_dump.to_path_buf(),
        args,
        env,
    }
}

fn dump_command(prepared: &PreparedDumpCommand) -> Command {
    let mut command = Command::new(&prepared.program);
    command.args(&prepared.args);
    for (key, value) in &prepared.env {
        command.env(key, value.as_str());
    }
    command
}

fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(stdout);
    }
    text
}

/// Runs `pg_dump --format custom` into an output directory.
#[derive(Debug, Clone)]
pub struct PgDumpExporter {
    output_dir: PathBuf,
    pg_dump_override: Option<PathBuf>,
}

impl PgDumpExporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            pg_dump_override: None,
        }
    }

    /// Use a specific `pg_dump` binary instead of searching for one.
    pub fn with_pg_dump(mut self, path: PathBuf) -> Self {
        self.pg_dump_override = Some(path);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn pg_dump(&self) -> Result<PathBuf, ExportError> {
        match &self.pg_dump_override {
            Some(path) => Ok(path.clone()),
            None => command_path::pg_dump_path().map_err(|err| ExportError::ToolNotFound(err.to_string())),
        }
    }
}

impl Exporter for PgDumpExporter {
    fn export(&self, connection: &ConnectionDescriptor, target: &str) -> Result<String, ExportError> {
        let pg_dump = self.pg_dump()?;
        let (artifact, file) = reserve_artifact(&self.output_dir, target, Local::now()).inspect_err(|err| {
            log_error!("Export of '{}' failed: {}", target, err);
        })?;

        let prepared = build_dump_command(&pg_dump, connection, target, &file);
        log_info!("Exporting '{}' from {} to {}", target, connection.label(), file.display());

        let output = dump_command(&prepared).output().map_err(|err| {
            log_error!("Failed to spawn {}: {}", pg_dump.display(), err);
            discard_artifact(&file);
            ExportError::Spawn(err.to_string())
        })?;

        if !output.status.success() {
            // pg_dump may leave a truncated archive behind.
            discard_artifact(&file);
            let err = ExportError::Failed {
                status: output.status.code(),
                output: combined_output(&output.stdout, &output.stderr),
            };
            log_error!("Export of '{}' failed: {}", target, err);
            return Err(err);
        }

        log_debug!("Export of '{}' wrote {}", target, artifact);
        Ok(artifact)
    }
}

#[cfg(test)]
#[path = "test/export.rs"]
mod tests;
