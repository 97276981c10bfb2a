//! Connection parameters shared by the catalog lister and the exporter.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "5432";
pub const DEFAULT_DATABASE: &str = "postgres";

/// Server address, credentials and maintenance database.
///
/// Values are kept exactly as typed; `port` is only parsed by the
/// collaborators that need a number.
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: SecretString,
    pub database: String,
}

impl ConnectionDescriptor {
    pub fn new(host: impl Into<String>, port: impl Into<String>, user: impl Into<String>, password: &str, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            user: user.into(),
            password: secret_from(password),
            database: database.into(),
        }
    }

    /// Database to connect to for catalog queries, falling back to `postgres`.
    pub fn maintenance_database(&self) -> &str {
        let database = self.database.trim();
        if database.is_empty() { DEFAULT_DATABASE } else { database }
    }

    /// Short `user@host:port` label for logs and headers.
    pub fn label(&self) -> String {
        if self.user.is_empty() {
            format!("{}:{}", self.host, self.port)
        } else {
            format!("{}@{}:{}", self.user, self.host, self.port)
        }
    }
}

impl Clone for ConnectionDescriptor {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            port: self.port.clone(),
            user: self.user.clone(),
            password: secret_from(self.password.expose_secret()),
            database: self.database.clone(),
        }
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

fn secret_from(value: &str) -> SecretString {
    SecretString::new(value.to_owned().into_boxed_str())
}

#[cfg(test)]
#[path = "test/connection.rs"]
mod tests;
