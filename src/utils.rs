use std::{error::Error, fmt::Debug};

use diesel::{r2d2::ConnectionManager, Connection, PgConnection};
use r2d2::{Pool, PooledConnection};
use thiserror::Error;

use crate::{db_interaction::references::ForeignReference, telemetry::spawn_blocking_with_tracing};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub fn error_fmt_chain(f: &mut std::fmt::Formatter<'_>, source: &Option<impl Error>) -> std::fmt::Result{
    if let Some(error) = source{
        write!(f, "\n\tCaused By:\n\t")?;
        write!(f, "{:?}", &error)?;
        error_fmt_chain(f, &error.source())
    } else {
        Ok(())
    }
}

pub async fn get_pooled_connection(
    pool: &DbPool
) -> Result<DbConnection, PoolGetError>{
    let pool_clone = pool.clone();

    let res = spawn_blocking_with_tracing(move || {
        pool_clone.get()
    })
    .await??;

    Ok(res)
}

#[derive(Error)]
pub enum PoolGetError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
}

impl Debug for PoolGetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Errors coming out of the db_interaction layer
#[derive(Error)]
pub enum DbError{
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    QueryError(#[from] diesel::result::Error),
    #[error("{0}")]
    ForeignReference(#[from] ForeignReference)
}

impl Debug for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Check out a connection and run `query` on the blocking pool
pub async fn run_query<F, T>(pool: &DbPool, query: F) -> Result<T, DbError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static
{
    let mut conn = get_pooled_connection(pool).await?;

    let res = spawn_blocking_with_tracing(move || {
        query(&mut *conn)
    })
    .await??;

    Ok(res)
}

// Run `query` inside one transaction, `E` lets callers reject the write with their own errors
pub async fn run_transaction<F, T, E>(pool: &DbPool, query: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<diesel::result::Error> + From<PoolGetError> + From<tokio::task::JoinError> + Send + 'static
{
    let mut conn = get_pooled_connection(pool).await?;

    spawn_blocking_with_tracing(move || {
        let conn: &mut PgConnection = &mut conn;
        conn.transaction(query)
    })
    .await?
}

// Several reads that must agree with each other, e.g. one dashboard response
pub async fn run_consistent_read<F, T>(pool: &DbPool, query: F) -> Result<T, DbError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
    T: Send + 'static
{
    run_query(pool, move |conn| {
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run(query)
    })
    .await
}

// Round money / percentages for presentation
pub fn round_to(value: f64, places: i32) -> f64{
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
