use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum LogError {
    Io(io::Error),
    /// `~` could not be resolved, so there is nowhere to put the log.
    NoHomeDirectory,
    /// The writer thread is gone or reported an earlier write failure.
    Writer(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Io(err) => write!(f, "I/O error: {}", err),
            LogError::NoHomeDirectory => write!(f, "home directory not found"),
            LogError::Writer(msg) => write!(f, "log writer failed: {}", msg),
        }
    }
}

impl Error for LogError {}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        LogError::Io(err)
    }
}
