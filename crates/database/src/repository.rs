use crate::connection::Store;
use crate::error::DbError;
use crate::loader::{read_source, SourceLoad, SourceRow};
use crate::schema;
use core_types::{ClientRevenue, ProductRevenue, SqlValue};
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use sqlx::Connection;

/// Revenue per product name, highest first. Equal totals fall back to name order
/// so the winner does not depend on how the store happens to iterate groups.
const MOST_PROFITABLE_PRODUCT: &str = r#"
    SELECT p.name AS name, COALESCE(SUM(il.quantity * p.unit_value), 0) AS revenue
    FROM products p
    JOIN invoice_lines il ON p.product_id = il.product_id
    GROUP BY p.name
    ORDER BY revenue DESC, p.name ASC
    LIMIT 1
"#;

/// Inner joins throughout: a client that was never invoiced has no row at all.
const CLIENTS_BY_REVENUE: &str = r#"
    SELECT c.name AS name, COALESCE(SUM(il.quantity * p.unit_value), 0) AS total_billed
    FROM clients c
    JOIN invoices i ON c.client_id = i.client_id
    JOIN invoice_lines il ON i.invoice_id = il.invoice_id
    JOIN products p ON il.product_id = p.product_id
    GROUP BY c.name
    ORDER BY total_billed DESC, c.name ASC
"#;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL statements and data access logic.
///
/// Each method runs on its own connection, opened at the start of the call and
/// released before it returns.
#[derive(Debug, Clone)]
pub struct DbRepository {
    store: Store,
}

impl DbRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Creates the four tables if they do not exist yet.
    pub async fn initialize_schema(&self) -> Result<(), DbError> {
        schema::initialize_schema(&self.store).await
    }

    /// Loads one source file as a single transaction and returns the number of rows inserted.
    ///
    /// The file is fully read and coerced before a connection is opened. The inserts then
    /// either all commit or, on the first rejected row, all roll back.
    pub async fn load_source(&self, load: &SourceLoad<'_>) -> Result<u64, DbError> {
        tracing::info!(table = load.table, path = %load.path.display(), "Loading source file");
        let rows = read_source(&load.path, load.columns, load.delimiter)?;

        let mut conn = self.store.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(DbError::statement(format!("Starting the {} load", load.table)))?;

        let mut inserted = 0;
        for row in &rows {
            let result = bind_row(sqlx::query(load.statement), row)
                .execute(&mut *tx)
                .await
                .map_err(DbError::statement(format!(
                    "Insert into {} from '{}' line {}",
                    load.table,
                    load.path.display(),
                    row.line
                )))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(DbError::statement(format!("Committing the {} load", load.table)))?;
        self.store.release(conn).await?;

        tracing::info!(table = load.table, rows = inserted, "Source file loaded");
        Ok(inserted)
    }

    /// Returns the product with the highest total revenue, or `None` when nothing was invoiced.
    pub async fn most_profitable_product(&self) -> Result<Option<ProductRevenue>, DbError> {
        let mut conn = self.store.connect().await?;
        let product = sqlx::query_as::<_, ProductRevenue>(MOST_PROFITABLE_PRODUCT)
            .fetch_optional(&mut conn)
            .await
            .map_err(DbError::statement("Most profitable product query"))?;
        self.store.release(conn).await?;
        Ok(product)
    }

    /// Returns every invoiced client with the total billed to them, highest first.
    pub async fn clients_by_revenue(&self) -> Result<Vec<ClientRevenue>, DbError> {
        let mut conn = self.store.connect().await?;
        let clients = sqlx::query_as::<_, ClientRevenue>(CLIENTS_BY_REVENUE)
            .fetch_all(&mut conn)
            .await
            .map_err(DbError::statement("Clients by revenue query"))?;
        self.store.release(conn).await?;
        Ok(clients)
    }
}

/// Binds the row's values to the statement's parameters in order.
fn bind_row<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    row: &'q SourceRow,
) -> Query<'q, Postgres, PgArguments> {
    for value in &row.values {
        query = match value {
            SqlValue::Text(text) => query.bind(text.as_str()),
            SqlValue::Integer(int) => query.bind(*int),
            SqlValue::Decimal(decimal) => query.bind(*decimal),
        };
    }
    query
}
