//! Database layer for PaperCheck
//!
//! Provides:
//! - SeaORM entity models
//! - Schema migrations
//! - Repository functions for data access
//! - Connection pool management and scoped sessions

pub mod migrations;
pub mod models;
mod repository;

pub use repository::{Repository, MAX_PAGE_SIZE};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use futures::future::BoxFuture;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction,
    TransactionError, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper; clones share one pool
#[derive(Clone)]
pub struct DbPool {
    conn: Arc<DatabaseConnection>,
}

impl DbPool {
    /// Connect using the pool parameters from configuration
    pub async fn connect(config: &DatabaseConfig, sql_logging: bool) -> Result<Self> {
        info!(
            host = %config.host,
            database = %config.name,
            max_connections = config.max_connections,
            "Connecting to database..."
        );

        let mut opts = ConnectOptions::new(config.connection_url());
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .test_before_acquire(config.test_before_acquire)
            .sqlx_logging(sql_logging);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: format!("Failed to connect: {}", e),
            })?;

        info!("Database connection established");

        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection (mock backends in tests)
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    /// Underlying connection for single-statement operations
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Run `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back on `Err`. The transaction
    /// handle is borrowed for the closure's duration only.
    pub async fn session<F, T>(&self, f: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T>> + Send,
        T: Send,
    {
        self.conn
            .transaction::<_, T, AppError>(f)
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db) => AppError::from(db),
                TransactionError::Transaction(app) => app,
            })
    }

    /// Ping the database to check connectivity
    pub async fn ping(&self) -> Result<()> {
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| AppError::DatabaseConnection {
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<()> {
        migrations::Migrator::up(self.conn.as_ref(), None).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Statements recorded by the mock backend. Panics while another clone
    /// of the pool is alive.
    #[cfg(test)]
    pub(crate) fn into_transaction_log(self) -> Vec<sea_orm::Transaction> {
        Arc::try_unwrap(self.conn)
            .ok()
            .expect("pool still shared")
            .into_transaction_log()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    fn mock_pool(db: MockDatabase) -> DbPool {
        DbPool::from_connection(db.into_connection())
    }

    #[tokio::test]
    async fn test_ping_ok() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]),
        );
        assert!(pool.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_one_connection() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]),
        );
        let handle = pool.clone();
        handle.ping().await.unwrap();
        drop(handle);

        let log = pool.into_transaction_log();
        assert_eq!(
            log,
            vec![Transaction::one(sea_orm::Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT 1"
            ))]
        );
    }

    #[tokio::test]
    async fn test_ping_failure_is_connection_error() {
        let pool = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_errors([DbErr::Custom("connection refused".to_string())]),
        );
        let err = pool.ping().await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseConnection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_session_returns_closure_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let pool = DbPool::from_connection(db);

        let result: Result<()> = tokio_test::block_on(pool.session(|_txn| {
            Box::pin(async move { Err(AppError::not_found("paper", 7)) })
        }));

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_session_runs_statements_in_one_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let pool = DbPool::from_connection(db);

        pool.session(|txn| {
            Box::pin(async move {
                txn.execute_unprepared("DELETE FROM dataset_papers").await?;
                Ok(())
            })
        })
        .await
        .unwrap();

        let log = pool.into_transaction_log();
        assert_eq!(
            log,
            vec![Transaction::many([
                sea_orm::Statement::from_string(DatabaseBackend::Postgres, "BEGIN"),
                sea_orm::Statement::from_string(DatabaseBackend::Postgres, "DELETE FROM dataset_papers"),
                sea_orm::Statement::from_string(DatabaseBackend::Postgres, "COMMIT"),
            ])]
        );
    }
}
