//! Catalog lister: fetches the database names a server exposes.

use crate::connection::ConnectionDescriptor;
use crate::{log_debug, log_error, log_info};
use postgres::{Config, NoTls};
use secrecy::ExposeSecret;
use std::{
    error::Error,
    fmt, io,
    sync::{
        Arc,
        mpsc::{self, Receiver, TryRecvError},
    },
    thread,
    time::Duration,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const FETCH_LOST_DIAGNOSTIC: &str = "catalog worker stopped before reporting a result";
const LIST_DATABASES_SQL: &str = "SELECT datname FROM pg_database WHERE datistemplate = false ORDER BY datname";

/// Failure to reach the server or read its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    InvalidPort(String),
    Connect(String),
    Query(String),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidPort(port) => write!(f, "Invalid port '{}'", port),
            ConnectionError::Connect(msg) => write!(f, "Failed to connect: {}", msg),
            ConnectionError::Query(msg) => write!(f, "Failed to list databases: {}", msg),
        }
    }
}

impl Error for ConnectionError {}

/// Returns the ordered list of target names reachable through a connection.
///
/// Implementations must not return duplicates; the returned order becomes
/// the master order of the selection list.
pub trait CatalogLister: Send + Sync {
    fn list(&self, connection: &ConnectionDescriptor) -> Result<Vec<String>, ConnectionError>;
}

/// Lists non-template databases from `pg_database`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresCatalog;

impl PostgresCatalog {
    pub fn new() -> Self {
        Self
    }

    fn config_for(connection: &ConnectionDescriptor) -> Result<Config, ConnectionError> {
        let port = parse_port(&connection.port)?;
        let mut config = Config::new();
        config
            .host(connection.host.trim())
            .port(port)
            .dbname(connection.maintenance_database())
            .connect_timeout(CONNECT_TIMEOUT);

        let user = connection.user.trim();
        if !user.is_empty() {
            config.user(user);
        }
        let password = connection.password.expose_secret();
        if !password.is_empty() {
            config.password(password);
        }

        Ok(config)
    }
}

impl CatalogLister for PostgresCatalog {
    fn list(&self, connection: &ConnectionDescriptor) -> Result<Vec<String>, ConnectionError> {
        log_debug!("Listing databases on {}", connection.label());

        let config = Self::config_for(connection)?;
        let mut client = config.connect(NoTls).map_err(|err| {
            log_error!("Connection to {} failed: {}", connection.label(), err);
            ConnectionError::Connect(err.to_string())
        })?;

        let rows = client.query(LIST_DATABASES_SQL, &[]).map_err(|err| {
            log_error!("Catalog query on {} failed: {}", connection.label(), err);
            ConnectionError::Query(err.to_string())
        })?;

        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get(0).map_err(|err| ConnectionError::Query(err.to_string()))?;
            names.push(name);
        }

        log_debug!("Found {} databases on {}", names.len(), connection.label());
        Ok(dedup_preserving_order(names))
    }
}

type CatalogResult = Result<Vec<String>, ConnectionError>;

/// A catalog listing running off the UI thread.
#[derive(Debug)]
pub struct CatalogFetch {
    receiver: Receiver<CatalogResult>,
    connection: ConnectionDescriptor,
}

impl CatalogFetch {
    /// Parameters the listing was started with.
    pub fn connection(&self) -> &ConnectionDescriptor {
        &self.connection
    }

    /// The listing result, once the worker has one. A worker that exits
    /// without answering counts as a connection failure.
    pub fn try_result(&self) -> Option<CatalogResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConnectionError::Connect(FETCH_LOST_DIAGNOSTIC.to_string()))),
        }
    }

    pub fn into_connection(self) -> ConnectionDescriptor {
        self.connection
    }
}

/// List the catalog on a worker thread. Dropping the returned handle
/// abandons the result; the worker still runs to its connect timeout.
pub fn dispatch_fetch(catalog: Arc<dyn CatalogLister>, connection: ConnectionDescriptor) -> io::Result<CatalogFetch> {
    let (tx, rx) = mpsc::channel();
    let worker_connection = connection.clone();

    log_info!("Fetching catalog from {}", connection.label());

    thread::Builder::new().name("catalog-fetch".to_string()).spawn(move || {
        let _ = tx.send(catalog.list(&worker_connection));
    })?;

    Ok(CatalogFetch {
        receiver: rx,
        connection,
    })
}

pub(crate) fn parse_port(port: &str) -> Result<u16, ConnectionError> {
    let trimmed = port.trim();
    match trimmed.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConnectionError::InvalidPort(trimmed.to_string())),
        Ok(value) => Ok(value),
    }
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(names.len());
    names.into_iter().filter(|name| seen.insert(name.clone())).collect()
}

#[cfg(test)]
#[path = "test/catalog.rs"]
mod tests;
