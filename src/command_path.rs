//! Resolution of external tool paths.

use once_cell::sync::OnceCell;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::{MetadataExt, PermissionsExt};

#[cfg(unix)]
const EXECUTE_BITS: u32 = 0o111;
#[cfg(unix)]
const WORLD_WRITABLE_BIT: u32 = 0o002;

/// Install locations checked when `pg_dump` is not on PATH.
const PG_DUMP_FALLBACK_PATHS: &[&str] = &[
    "/usr/bin/pg_dump",
    "/usr/local/bin/pg_dump",
    "/usr/pgsql-17/bin/pg_dump",
    "/usr/pgsql-16/bin/pg_dump",
    "/usr/pgsql-15/bin/pg_dump",
    "/usr/pgsql-14/bin/pg_dump",
    "/usr/pgsql-13/bin/pg_dump",
    "/usr/pgsql-12/bin/pg_dump",
    "/opt/postgresql/bin/pg_dump",
    "/opt/homebrew/bin/pg_dump",
    "/snap/bin/pg_dump",
];

pub(crate) const PG_DUMP_INSTALL_HINT: &str = "Install the PostgreSQL client tools (e.g. `apt install postgresql-client` or `dnf install postgresql`) or add pg_dump to PATH";

#[derive(Debug, Clone)]
struct CachedPathError {
    kind: io::ErrorKind,
    message: String,
}

impl CachedPathError {
    fn from_io(err: io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

static PG_DUMP_PATH: OnceCell<Result<PathBuf, CachedPathError>> = OnceCell::new();

fn resolve_cached(
    cell: &OnceCell<Result<PathBuf, CachedPathError>>,
    label: &'static str,
    resolver: impl FnOnce() -> io::Result<PathBuf>,
) -> io::Result<PathBuf> {
    let cached = cell.get_or_init(|| resolver().map_err(CachedPathError::from_io));
    match cached {
        Ok(path) => Ok(path.clone()),
        Err(err) => Err(io::Error::new(err.kind, format!("{label}: {}", err.message))),
    }
}

/// Locate `pg_dump`, checking PATH first and then common install directories.
pub(crate) fn pg_dump_path() -> io::Result<PathBuf> {
    resolve_cached(&PG_DUMP_PATH, "pg_dump", || resolve_with_fallbacks("pg_dump", PG_DUMP_FALLBACK_PATHS))
}

/// Directory holding the running executable.
pub fn current_exe_dir() -> io::Result<PathBuf> {
    let current =
        std::env::current_exe().map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("unable to resolve current executable path: {err}")))?;
    current
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("executable path '{}' has no parent directory", current.display())))
}

fn resolve_with_fallbacks(binary: &str, fallbacks: &[&str]) -> io::Result<PathBuf> {
    match resolve_path_from_env(binary) {
        Ok(path) => Ok(path),
        Err(env_err) => {
            for candidate in fallbacks {
                let candidate = Path::new(candidate);
                if candidate.exists() {
                    return validate_executable_path(candidate, binary);
                }
            }
            Err(env_err)
        }
    }
}

fn resolve_path_from_env(binary: &str) -> io::Result<PathBuf> {
    let located = which::which(binary).map_err(|err| io::Error::new(io::ErrorKind::NotFound, format!("{binary} not found in PATH: {err}")))?;
    validate_executable_path(&located, binary)
}

fn validate_executable_path(path: &Path, label: &str) -> io::Result<PathBuf> {
    let canonical = fs::canonicalize(path).map_err(|err| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("unable to canonicalize {label} path '{}': {err}", path.display()),
        )
    })?;

    let metadata = fs::metadata(&canonical).map_err(|err| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("unable to inspect {label} path '{}': {err}", canonical.display()),
        )
    })?;

    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{label} path '{}' is not a regular file", canonical.display()),
        ));
    }

    #[cfg(unix)]
    {
        validate_unix_executable_security(&canonical, &metadata, label)?;
    }

    Ok(canonical)
}

#[cfg(unix)]
fn validate_unix_executable_security(path: &Path, metadata: &fs::Metadata, label: &str) -> io::Result<()> {
    let mode = metadata.permissions().mode();
    if mode & WORLD_WRITABLE_BIT != 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' is world-writable", path.display()),
        ));
    }

    if mode & EXECUTE_BITS == 0 {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' is not executable", path.display()),
        ));
    }

    let owner_uid = metadata.uid();
    let effective_uid = nix::unistd::Uid::effective().as_raw();
    if owner_uid != 0 && owner_uid != effective_uid {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{label} path '{}' must be owned by root or the current user", path.display()),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "test/command_path.rs"]
mod tests;
