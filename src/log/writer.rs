//! Background log file writer.
//!
//! Lines are queued on a bounded channel and appended by one thread so the
//! UI loop and the backup worker never wait on disk. Warnings and errors are
//! flushed as soon as they are written, which keeps backup failures on disk
//! even if the terminal is killed mid-batch. Everything else is flushed when
//! the queue goes idle or on request.

use super::{LogError, LogLevel, formatter::format_entry};
use chrono::Local;
use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        Mutex,
        mpsc::{self, Receiver, RecvTimeoutError, SyncSender},
    },
    thread,
    time::Duration,
};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

const QUEUE_CAPACITY: usize = 1024;
const IDLE_FLUSH_INTERVAL: Duration = Duration::from_millis(200);
const LOG_DIR_NAME: &str = ".snaptui";
const LOG_FILE_NAME: &str = "snaptui.log";
#[cfg(unix)]
const PRIVATE_DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const PRIVATE_FILE_MODE: u32 = 0o600;

enum WriterCommand {
    Line { urgent: bool, text: String },
    Flush(SyncSender<Result<(), String>>),
}

pub(super) struct LogWriter {
    /// Fixed destination; `None` means `~/.snaptui/logs/snaptui.log`.
    path: Option<PathBuf>,
    sender: Mutex<Option<SyncSender<WriterCommand>>>,
}

impl LogWriter {
    pub(super) fn new() -> Self {
        Self {
            path: None,
            sender: Mutex::new(None),
        }
    }

    pub(super) fn to_file(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            sender: Mutex::new(None),
        }
    }

    pub(super) fn write(&self, level: LogLevel, message: &str) -> Result<(), LogError> {
        let sender = self.sender_or_start()?;
        let command = WriterCommand::Line {
            urgent: level.is_urgent(),
            text: format_entry(level, message, Local::now()),
        };
        sender.send(command).map_err(|_| LogError::Writer("writer thread has stopped".to_string()))
    }

    /// Block until every queued line is on disk. A no-op before the first write.
    pub(super) fn flush(&self) -> Result<(), LogError> {
        let sender = match self.sender.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let Some(sender) = sender else {
            return Ok(());
        };

        let (ack_tx, ack_rx) = mpsc::sync_channel(1);
        sender
            .send(WriterCommand::Flush(ack_tx))
            .map_err(|_| LogError::Writer("writer thread has stopped".to_string()))?;
        match ack_rx.recv() {
            Ok(result) => result.map_err(LogError::Writer),
            Err(_) => Err(LogError::Writer("writer thread exited before flushing".to_string())),
        }
    }

    /// The log file is opened here, on the caller's thread, so a bad path
    /// surfaces as an error from the first write instead of vanishing.
    fn sender_or_start(&self) -> Result<SyncSender<WriterCommand>, LogError> {
        let mut guard = match self.sender.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(sender) = guard.as_ref() {
            return Ok(sender.clone());
        }

        let path = match &self.path {
            Some(path) => path.clone(),
            None => default_log_path()?,
        };
        if let Some(parent) = path.parent() {
            create_private_directory(parent)?;
        }
        let file = open_private_append_file(&path)?;

        let (tx, rx) = mpsc::sync_channel(QUEUE_CAPACITY);
        thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || run_writer(rx, BufWriter::new(file)))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }
}

fn default_log_path() -> Result<PathBuf, LogError> {
    let home = dirs::home_dir().ok_or(LogError::NoHomeDirectory)?;
    Ok(home.join(LOG_DIR_NAME).join("logs").join(LOG_FILE_NAME))
}

fn create_private_directory(path: &Path) -> Result<(), LogError> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_DIR_MODE))?;
    Ok(())
}

fn open_private_append_file(path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(PRIVATE_FILE_MODE);
    let file = options.open(path)?;
    // `mode` only applies on creation; tighten a file left by an older run.
    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
    Ok(file)
}

fn run_writer(receiver: Receiver<WriterCommand>, mut out: BufWriter<File>) {
    let mut unflushed = false;
    // First write failure since the last flush, reported to the next flusher.
    let mut failure: Option<String> = None;

    loop {
        match receiver.recv_timeout(IDLE_FLUSH_INTERVAL) {
            Ok(WriterCommand::Line { urgent, text }) => {
                let mut result = writeln!(out, "{}", text);
                if result.is_ok() && urgent {
                    result = out.flush();
                }
                match result {
                    Ok(()) => unflushed = !urgent,
                    Err(err) => {
                        failure.get_or_insert_with(|| err.to_string());
                    }
                }
            }
            Ok(WriterCommand::Flush(ack)) => {
                let mut result = out.flush().map_err(|err| err.to_string());
                if let Some(earlier) = failure.take() {
                    result = Err(earlier);
                }
                unflushed = false;
                let _ = ack.send(result);
            }
            Err(RecvTimeoutError::Timeout) => {
                if unflushed {
                    if let Err(err) = out.flush() {
                        failure.get_or_insert_with(|| err.to_string());
                    }
                    unflushed = false;
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = out.flush();
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../test/log/writer.rs"]
mod tests;
