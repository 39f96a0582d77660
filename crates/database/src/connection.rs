use crate::error::DbError;
use configuration::StoreConfig;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Executor};

/// Describes how to reach the PostgreSQL store.
///
/// A `Store` holds no open connection. Every operation calls [`Store::connect`], uses the
/// connection for one unit of work, and hands it back to [`Store::release`]. On an error
/// path the connection is simply dropped, which closes it.
#[derive(Debug, Clone)]
pub struct Store {
    options: PgConnectOptions,
    schema: Option<String>,
    target: String,
}

impl Store {
    pub fn new(config: &StoreConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        Self {
            options,
            schema: config.schema.clone(),
            target: format!("{}:{}/{}", config.host, config.port, config.database),
        }
    }

    /// The schema the tables live in, if one is configured.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Opens a connection, pointing its `search_path` at the configured schema.
    pub async fn connect(&self) -> Result<PgConnection, DbError> {
        tracing::debug!(store = %self.target, "Opening store connection");
        let mut conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(|source| DbError::Connection {
                target: self.target.clone(),
                source,
            })?;

        if let Some(schema) = &self.schema {
            // Validated as a plain identifier when the configuration was loaded.
            let set_path = format!("SET search_path TO \"{}\"", schema);
            conn.execute(set_path.as_str())
                .await
                .map_err(DbError::statement(format!("Setting search_path to {}", schema)))?;
        }

        Ok(conn)
    }

    /// Closes a connection after a successful unit of work.
    pub async fn release(&self, conn: PgConnection) -> Result<(), DbError> {
        conn.close()
            .await
            .map_err(DbError::statement("Closing the store connection"))
    }
}
