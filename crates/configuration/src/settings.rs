use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub sources: SourceFiles,
}

/// Connection settings for the PostgreSQL store.
#[derive(Clone, Deserialize)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// The database to connect to.
    pub database: String,
    pub user: String,
    pub password: String,
    /// An optional schema (namespace) that all tables live in.
    /// It is created on demand and set as the `search_path` of every connection.
    #[serde(default)]
    pub schema: Option<String>,
}

// Hand-written so the password never ends up in a log line.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("schema", &self.schema)
            .finish()
    }
}

/// Locations of the four delimited source files.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceFiles {
    /// Directory the file names below are resolved against.
    pub data_dir: PathBuf,
    pub clients: PathBuf,
    pub products: PathBuf,
    pub invoices: PathBuf,
    pub invoice_lines: PathBuf,
    /// Field delimiter, a single ASCII character.
    pub delimiter: String,
}

impl SourceFiles {
    pub fn clients_path(&self) -> PathBuf {
        self.data_dir.join(&self.clients)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products)
    }

    pub fn invoices_path(&self) -> PathBuf {
        self.data_dir.join(&self.invoices)
    }

    pub fn invoice_lines_path(&self) -> PathBuf {
        self.data_dir.join(&self.invoice_lines)
    }

    /// The delimiter as the byte the CSV reader expects. Only valid after `Config::validate`.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("store.host must not be empty".to_string()));
        }
        if self.store.database.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store.database must not be empty".to_string(),
            ));
        }
        if let Some(schema) = &self.store.schema {
            if !is_identifier(schema) {
                return Err(ConfigError::ValidationError(format!(
                    "store.schema '{}' is not a plain SQL identifier",
                    schema
                )));
            }
        }
        let delimiter = self.sources.delimiter.as_bytes();
        if delimiter.len() != 1 || !delimiter[0].is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "sources.delimiter must be a single ASCII character, got '{}'",
                self.sources.delimiter
            )));
        }
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, so the name can be quoted into DDL safely.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
