use analytics::RevenueReport;
use configuration::{ConfigArgs, ConfigError};
use database::{standard_loads, DbError, DbRepository, ErrorKind, Store};
use thiserror::Error;

// Exit statuses, following the BSD sysexits convention.
pub const EX_DATAERR: u8 = 65;
pub const EX_NOINPUT: u8 = 66;
pub const EX_UNAVAILABLE: u8 = 69;
pub const EX_CONFIG: u8 = 78;

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl RunError {
    /// Distinguishes configuration, source-file, data and store failures for scripts.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Config(_) => EX_CONFIG,
            RunError::Database(e) => match e.kind() {
                ErrorKind::Io => EX_NOINPUT,
                ErrorKind::Parse => EX_DATAERR,
                ErrorKind::Store => EX_UNAVAILABLE,
            },
        }
    }
}

/// Creates the schema, loads the four sources in order, then prints both reports.
/// The first failure aborts everything after it.
pub async fn run(args: &ConfigArgs) -> Result<(), RunError> {
    let config = configuration::load_config(args.config.as_deref(), args.data_dir.as_deref())?;
    let repo = DbRepository::new(Store::new(&config.store));

    repo.initialize_schema().await?;
    println!("Database schema created successfully.");

    for load in standard_loads(&config.sources) {
        println!("Loading data from: {}", load.path.display());
        let rows = repo.load_source(&load).await?;
        println!("Finished loading {} ({} rows).", load.path.display(), rows);
    }
    println!("Data loaded successfully.");

    let top_product = repo.most_profitable_product().await?;
    let clients = repo.clients_by_revenue().await?;
    print!("{}", RevenueReport::new(top_product, clients));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_by_failure_kind() {
        let config = RunError::from(ConfigError::ValidationError("bad".to_string()));
        assert_eq!(config.exit_code(), EX_CONFIG);

        let io = RunError::from(DbError::SourceIo {
            path: PathBuf::from("clients.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(io.exit_code(), EX_NOINPUT);

        let parse = RunError::from(DbError::MissingColumn {
            path: PathBuf::from("invoices.csv"),
            line: 2,
            column: 2,
        });
        assert_eq!(parse.exit_code(), EX_DATAERR);

        let store = RunError::from(DbError::Statement {
            context: "Insert into clients".to_string(),
            source: sqlx_error(),
        });
        assert_eq!(store.exit_code(), EX_UNAVAILABLE);

        let codes = [EX_CONFIG, EX_NOINPUT, EX_DATAERR, EX_UNAVAILABLE];
        assert!(codes.iter().all(|&c| c != 0));
    }

    fn sqlx_error() -> database::sqlx::Error {
        database::sqlx::Error::PoolClosed
    }
}
