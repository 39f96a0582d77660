//! Table definitions for the four entities and the idempotent initializer.

use crate::connection::Store;
use crate::error::DbError;
use sqlx::Executor;

pub const CREATE_CLIENTS: &str = "CREATE TABLE IF NOT EXISTS clients (
    client_id INT PRIMARY KEY,
    name VARCHAR(255)
)";

pub const CREATE_PRODUCTS: &str = "CREATE TABLE IF NOT EXISTS products (
    product_id INT PRIMARY KEY,
    name VARCHAR(255),
    unit_value DECIMAL(10, 2)
)";

pub const CREATE_INVOICES: &str = "CREATE TABLE IF NOT EXISTS invoices (
    invoice_id INT PRIMARY KEY,
    client_id INT,
    FOREIGN KEY (client_id) REFERENCES clients(client_id)
)";

pub const CREATE_INVOICE_LINES: &str = "CREATE TABLE IF NOT EXISTS invoice_lines (
    invoice_id INT,
    product_id INT,
    quantity INT,
    FOREIGN KEY (invoice_id) REFERENCES invoices(invoice_id),
    FOREIGN KEY (product_id) REFERENCES products(product_id)
)";

/// Creation order matters: each table only references tables created before it.
const TABLES: [(&str, &str); 4] = [
    ("clients", CREATE_CLIENTS),
    ("products", CREATE_PRODUCTS),
    ("invoices", CREATE_INVOICES),
    ("invoice_lines", CREATE_INVOICE_LINES),
];

/// Makes sure the four tables exist. Running it against an existing schema is a no-op.
pub async fn initialize_schema(store: &Store) -> Result<(), DbError> {
    let mut conn = store.connect().await?;

    if let Some(schema) = store.schema() {
        let create = format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema);
        conn.execute(create.as_str())
            .await
            .map_err(DbError::statement(format!("Creating schema {}", schema)))?;
        // Re-apply now that the schema exists so the tables land inside it.
        let set_path = format!("SET search_path TO \"{}\"", schema);
        conn.execute(set_path.as_str())
            .await
            .map_err(DbError::statement(format!("Setting search_path to {}", schema)))?;
    }

    for (table, ddl) in TABLES {
        conn.execute(ddl)
            .await
            .map_err(DbError::statement(format!("Creating table {}", table)))?;
        tracing::debug!(table, "Table ensured");
    }

    store.release(conn).await?;
    tracing::info!("Schema initialized");
    Ok(())
}
