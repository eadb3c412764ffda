//! Repository for database operations
//!
//! Every operation goes through [`DbPool`]; multi-statement deletes run in a
//! single session so that dependents are removed before their parents and a
//! failure leaves nothing half-deleted.

mod datasets;
mod evals;
mod extractors;
mod extracts;
mod ground_truths;
mod papers;

use crate::db::DbPool;
use crate::errors::Result;
use crate::metrics::DbOperationTimer;
use sea_orm::DatabaseConnection;
use std::future::Future;

/// Upper bound for a single list page
pub const MAX_PAGE_SIZE: u64 = 1000;

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}

/// Run `fut` and record its outcome under `entity`/`operation`
async fn observe<T, F>(entity: &'static str, operation: &'static str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let timer = DbOperationTimer::start(entity, operation);
    let result = fut.await;
    timer.finish(result.is_ok());
    result
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`
fn page_size(limit: u64) -> u64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use crate::db::DbPool;
    use sea_orm::entity::prelude::DateTimeWithTimeZone;
    use sea_orm::{MockDatabase, MockExecResult, Transaction};

    pub fn repo(db: MockDatabase) -> Repository {
        Repository::new(DbPool::from_connection(db.into_connection()))
    }

    pub fn into_log(repo: Repository) -> Vec<Transaction> {
        repo.pool.into_transaction_log()
    }

    pub fn affected(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    pub fn ts() -> DateTimeWithTimeZone {
        chrono::DateTime::parse_from_rfc3339("2025-03-01T12:00:00+00:00").unwrap()
    }

    /// Byte offsets of each needle within the debug rendering of the log,
    /// panicking when one is missing
    pub fn positions(log: &[Transaction], needles: &[&str]) -> Vec<usize> {
        let rendered = format!("{:?}", log);
        needles
            .iter()
            .map(|n| {
                rendered
                    .find(n)
                    .unwrap_or_else(|| panic!("statement {:?} not found in {}", n, rendered))
            })
            .collect()
    }

    pub fn assert_in_order(log: &[Transaction], needles: &[&str]) {
        let found = positions(log, needles);
        assert!(
            found.windows(2).all(|w| w[0] < w[1]),
            "statements out of order: {:?} at {:?}",
            needles,
            found
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(page_size(0), 1);
        assert_eq!(page_size(50), 50);
        assert_eq!(page_size(10_000), MAX_PAGE_SIZE);
    }
}
