//! PostgreSQL data source using sqlx.
//!
//! Provides `PostgresSource<T>`, a [`DataSource`] over one table, backed by
//! a `sqlx::PgPool`. Queries are compiled by [`SqlTable`].
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! paged-source = { version = "0.1", features = ["postgres"] }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgRow;

use crate::core::{DataSource, Query};
use crate::storage::sql::SqlTable;

/// Data source over a PostgreSQL table.
///
/// Rows are decoded with `sqlx::FromRow`. Configure a stable key on the
/// table to make pages without a sort field repeatable.
#[derive(Clone, Debug)]
pub struct PostgresSource<T> {
    pool: PgPool,
    table: SqlTable,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> PostgresSource<T> {
    /// Create a new `PostgresSource` with the given connection pool.
    pub fn new(pool: PgPool, table: SqlTable) -> Self {
        Self {
            pool,
            table,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn table(&self) -> &SqlTable {
        &self.table
    }
}

#[async_trait]
impl<T> DataSource<T> for PostgresSource<T>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    async fn count(&self) -> Result<usize> {
        let sql = self.table.count_sql();
        let total: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(usize::try_from(total)?)
    }

    async fn any(&self, query: &Query) -> Result<bool> {
        let sql = self.table.exists_sql(query);
        tracing::trace!(%sql, "probing page window");
        let found: bool = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(found)
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<T>> {
        let sql = self.table.select_sql(query);
        tracing::trace!(%sql, "fetching page");
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
