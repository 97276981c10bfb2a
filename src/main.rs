use snaptui::{Error, Result, args, catalog::PostgresCatalog, command_path, export::PgDumpExporter, log, log_debug, log_error, log_info, tui};

use std::{fs, io, path::PathBuf, process::ExitCode, sync::Arc};

/// Backup files go to `--output-dir`, else next to the executable.
fn resolve_output_dir(explicit: Option<PathBuf>) -> io::Result<PathBuf> {
    match explicit {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            Ok(dir)
        }
        None => command_path::current_exe_dir(),
    }
}

fn main() -> Result<ExitCode> {
    let args = args::main_args();

    // Initialize logging
    if args.debug {
        log::LOGGER.enable_debug();
        if let Err(err) = log::LOGGER.log_debug("Debug mode enabled") {
            eprintln!("Failed to initialize debug logging: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    }

    let output_dir = match resolve_output_dir(args.output_dir.clone()) {
        Ok(dir) => dir,
        Err(err) => {
            log_error!("Unable to prepare output directory: {}", err);
            eprintln!("Unable to prepare output directory: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };
    log_info!("Writing backups to {}", output_dir.display());

    let catalog = Arc::new(PostgresCatalog::new());
    let exporter = Arc::new(PgDumpExporter::new(output_dir));

    let result = tui::run_session(args.session_config(), catalog, exporter).map_err(Error::from);
    if let Err(err) = log::LOGGER.flush() {
        eprintln!("{}", Error::from(err));
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Ok(ExitCode::FAILURE);
    }

    log_debug!("Exiting");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "test/main.rs"]
mod tests;
