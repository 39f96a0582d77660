use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to connect to the database at {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{context} failed: {source}")]
    Statement {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to open source file '{}': {source}", path.display())]
    SourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read source file '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("'{}' line {line}, column {column}: {source}", path.display())]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: usize,
        #[source]
        source: CoreError,
    },

    #[error("'{}' line {line}: column {column} is missing", path.display())]
    MissingColumn { path: PathBuf, line: u64, column: usize },
}

/// The failure categories callers branch on (e.g. to pick an exit status).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source file is missing or unreadable.
    Io,
    /// A source field or record is malformed.
    Parse,
    /// The store refused a connection or a statement.
    Store,
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Connection { .. } | DbError::Statement { .. } => ErrorKind::Store,
            DbError::SourceIo { .. } => ErrorKind::Io,
            DbError::Csv { source, .. } if source.is_io_error() => ErrorKind::Io,
            DbError::Csv { .. } | DbError::InvalidValue { .. } | DbError::MissingColumn { .. } => {
                ErrorKind::Parse
            }
        }
    }

    pub(crate) fn statement(context: impl Into<String>) -> impl FnOnce(sqlx::Error) -> DbError {
        let context = context.into();
        move |source| DbError::Statement { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let io = DbError::SourceIo {
            path: PathBuf::from("clients.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(io.kind(), ErrorKind::Io);

        let parse = DbError::InvalidValue {
            path: PathBuf::from("products.csv"),
            line: 3,
            column: 3,
            source: CoreError::InvalidValue("decimal", "abc".to_string(), "Invalid decimal".to_string()),
        };
        assert_eq!(parse.kind(), ErrorKind::Parse);
        assert!(parse.to_string().contains("products.csv"));
        assert!(parse.to_string().contains("line 3"));

        let store = DbError::statement("Creating table clients")(sqlx::Error::RowNotFound);
        assert_eq!(store.kind(), ErrorKind::Store);
        assert!(store.to_string().starts_with("Creating table clients failed"));
    }
}
