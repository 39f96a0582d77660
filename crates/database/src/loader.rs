use crate::error::DbError;
use configuration::SourceFiles;
use core_types::{ColumnBinding, SqlValue};
use std::fs::File;
use std::path::{Path, PathBuf};

pub const INSERT_CLIENT: &str = "INSERT INTO clients (client_id, name) VALUES ($1, $2)";
pub const INSERT_PRODUCT: &str =
    "INSERT INTO products (product_id, name, unit_value) VALUES ($1, $2, $3)";
pub const INSERT_INVOICE: &str = "INSERT INTO invoices (invoice_id, client_id) VALUES ($1, $2)";
pub const INSERT_INVOICE_LINE: &str =
    "INSERT INTO invoice_lines (invoice_id, product_id, quantity) VALUES ($1, $2, $3)";

pub const CLIENT_COLUMNS: [ColumnBinding; 2] = [ColumnBinding::integer(1), ColumnBinding::text(2)];
pub const PRODUCT_COLUMNS: [ColumnBinding; 3] = [
    ColumnBinding::integer(1),
    ColumnBinding::text(2),
    ColumnBinding::decimal(3),
];
pub const INVOICE_COLUMNS: [ColumnBinding; 2] =
    [ColumnBinding::integer(1), ColumnBinding::integer(2)];
pub const INVOICE_LINE_COLUMNS: [ColumnBinding; 3] = [
    ColumnBinding::integer(1),
    ColumnBinding::integer(2),
    ColumnBinding::integer(3),
];

/// One source file and how its columns map onto an insert statement.
#[derive(Debug, Clone)]
pub struct SourceLoad<'a> {
    /// Target table, used for logging and error context.
    pub table: &'a str,
    pub path: PathBuf,
    /// A parameterized insert with one `$n` placeholder per binding.
    pub statement: &'a str,
    /// The `n`-th binding fills parameter `$n`.
    pub columns: &'a [ColumnBinding],
    pub delimiter: u8,
}

/// A coerced data row and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: u64,
    pub values: Vec<SqlValue>,
}

/// The four loads in the order referential integrity requires:
/// clients and products before invoices, invoices before their lines.
pub fn standard_loads(sources: &SourceFiles) -> [SourceLoad<'static>; 4] {
    let delimiter = sources.delimiter_byte();
    [
        SourceLoad {
            table: "clients",
            path: sources.clients_path(),
            statement: INSERT_CLIENT,
            columns: &CLIENT_COLUMNS,
            delimiter,
        },
        SourceLoad {
            table: "products",
            path: sources.products_path(),
            statement: INSERT_PRODUCT,
            columns: &PRODUCT_COLUMNS,
            delimiter,
        },
        SourceLoad {
            table: "invoices",
            path: sources.invoices_path(),
            statement: INSERT_INVOICE,
            columns: &INVOICE_COLUMNS,
            delimiter,
        },
        SourceLoad {
            table: "invoice_lines",
            path: sources.invoice_lines_path(),
            statement: INSERT_INVOICE_LINE,
            columns: &INVOICE_LINE_COLUMNS,
            delimiter,
        },
    ]
}

/// Reads every data row of a header-bearing delimited file and coerces the bound columns.
///
/// The whole file is read before anything is returned, so a malformed row anywhere
/// fails the file without a single insert having been issued.
pub fn read_source(
    path: &Path,
    columns: &[ColumnBinding],
    delimiter: u8,
) -> Result<Vec<SourceRow>, DbError> {
    let file = File::open(path).map_err(|source| DbError::SourceIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        // Only the bound columns matter; a short row is reported as a missing column below.
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| DbError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());

        let values = columns
            .iter()
            .map(|binding| {
                let raw = record.get(binding.field_index()).ok_or_else(|| DbError::MissingColumn {
                    path: path.to_path_buf(),
                    line,
                    column: binding.source_column,
                })?;
                binding.target.coerce(raw).map_err(|source| DbError::InvalidValue {
                    path: path.to_path_buf(),
                    line,
                    column: binding.source_column,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(SourceRow { line, values });
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "Source file read");
    Ok(rows)
}
