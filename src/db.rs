pub mod table;

use metrics::{counter, histogram};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, FromQueryResult, QueryResult,
    Statement, Value,
};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::config::ConnectionConfig;
use crate::errors::{ConnectionError, QueryError, ResourceReleaseError};
use crate::queries::MetricQuery;
use crate::schema::statements;

pub use table::{Table, TableRow};

/// Sole owner of the session's database connection.
///
/// Every read goes through [`Gateway::run_query`], which never fails: a broken
/// or unconnected query yields an empty [`Table`] carrying the [`QueryError`].
#[derive(Debug, Default)]
pub struct Gateway {
    conn: Option<DatabaseConnection>,
}

impl Gateway {
    pub fn new() -> Self {
        Self { conn: None }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens a single connection. On failure the gateway stays disconnected.
    pub async fn connect(&mut self, config: &ConnectionConfig) -> Result<(), ConnectionError> {
        if self.conn.is_some() {
            debug!("Replacing existing connection");
            self.close().await;
        }

        let url = config.connection_url()?;
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .sqlx_logging(false);

        if !config.autocommit {
            warn!("autocommit=false has no effect: analytics queries run outside transactions");
        }

        match Database::connect(opt).await {
            Ok(conn) => {
                info!("✓ Database connection established successfully");
                info!("✓ Connected to database: {}", config.database);
                self.conn = Some(conn);
                Ok(())
            }
            Err(e) => {
                error!("✗ Database connection failed: {}", e);
                counter!("pharma_analytics.connection.failures", 1);
                Err(ConnectionError::Database(e))
            }
        }
    }

    /// Executes one statement with bound parameters
    pub async fn execute(
        &self,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Vec<QueryResult>, QueryError> {
        let conn = self.conn.as_ref().ok_or(QueryError::NotConnected)?;
        let stmt = Statement::from_sql_and_values(conn.get_database_backend(), sql, params);
        debug!("Executing SQL query: {}", stmt);
        conn.query_all(stmt).await.map_err(QueryError::execution)
    }

    /// Runs a query and decodes each row as `R`.
    ///
    /// Never returns an error: failures are logged and recorded on an empty table.
    pub async fn run_query<R>(
        &self,
        name: &str,
        sql: &str,
        params: Vec<Value>,
        columns: &'static [&'static str],
    ) -> Table<R>
    where
        R: FromQueryResult,
    {
        let start = Instant::now();

        let decoded = match self.execute(sql, params).await {
            Ok(rows) => rows
                .iter()
                .map(|row| R::from_query_result(row, ""))
                .collect::<Result<Vec<_>, _>>()
                .map_err(QueryError::decode),
            Err(e) => Err(e),
        };

        let elapsed = start.elapsed();
        histogram!("pharma_analytics.query.duration", elapsed);

        match decoded {
            Ok(rows) => {
                debug!(
                    query = name,
                    rows = rows.len(),
                    "Query completed in {:?}",
                    elapsed
                );
                Table::new(columns, rows)
            }
            Err(e) => {
                error!(query = name, "✗ {}", e);
                counter!("pharma_analytics.query.error", 1);
                Table::failed(columns, e)
            }
        }
    }

    /// Runs a catalog query and shapes its records into rows
    pub async fn fetch<Q: MetricQuery>(&self, query: &Q) -> Table<Q::Row> {
        self.run_query::<Q::Record>(query.name(), query.sql(), query.params(), query.columns())
            .await
            .map(|record| query.shape(record))
    }

    /// Executes a `;`-separated script without parameters
    pub async fn execute_batch(&self, script: &str) -> Result<(), QueryError> {
        let conn = self.conn.as_ref().ok_or(QueryError::NotConnected)?;
        for statement in statements(script) {
            conn.execute_unprepared(statement)
                .await
                .map_err(QueryError::execution)?;
        }
        Ok(())
    }

    /// Releases the connection. Idempotent; release errors are logged only.
    pub async fn close(&mut self) {
        let Some(conn) = self.conn.take() else {
            debug!("Close requested with no open connection");
            return;
        };

        match conn.close().await.map_err(ResourceReleaseError::from) {
            Ok(()) => info!("✓ Database connection closed successfully"),
            Err(e) => warn!("Warning: {}", e),
        }
    }
}
