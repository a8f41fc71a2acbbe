//! Postgres database clients.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Non-transactional Postgres database client.
///
/// Every statement runs in its own [`connection::Pooled`] connection.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to take connections from.
    pub(crate) pool: connection::Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Takes a [`connection::Pooled`] connection from the
    /// [`connection::Pool`].
    pub(crate) async fn pooled(
        &self,
    ) -> Result<connection::Pooled, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl Connection for NonTx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.pooled()
            .await
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.pooled()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        self.pooled()
            .await
            .map_err(tracerr::wrap!())?
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional Postgres database client.
///
/// Clones share the same transaction.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Open [`connection::Tx`], [`None`] once committed.
    inner: Arc<Mutex<Option<connection::Tx>>>,
}

impl Tx {
    /// Begins a new [`Tx`] in a connection taken by the provided [`NonTx`]
    /// client.
    ///
    /// # Errors
    ///
    /// If failed to take a connection or to open a transaction in it.
    pub async fn begin(client: &NonTx) -> Result<Self, Traced<database::Error>> {
        let pooled = client.pooled().await.map_err(tracerr::wrap!())?;
        let tx = connection::Tx::begin(pooled)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Some(tx))),
        })
    }

    /// Locks the underlying [`connection::Tx`] of this [`Tx`] client.
    async fn lock(
        &self,
    ) -> Result<MutexGuard<'_, Option<connection::Tx>>, Traced<database::Error>>
    {
        let guard = self.inner.lock().await;
        if guard.is_none() {
            return Err(tracerr::new!(postgres::Error::Finished))
                .map_err(tracerr::map_from);
        }
        Ok(guard)
    }

    /// Commits this [`Tx`] client.
    ///
    /// Dropping all the clones without committing rolls the transaction back.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client, or it has been
    /// committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let tx = self
            .lock()
            .await
            .map_err(tracerr::wrap!())?
            .take()
            .ok_or_else(|| tracerr::new!(postgres::Error::Finished))
            .map_err(tracerr::map_from)?;
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let guard = self.lock().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            return Err(tracerr::new!(postgres::Error::Finished))
                .map_err(tracerr::map_from);
        };
        tx.transaction()
            .map_err(tracerr::wrap!())?
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let guard = self.lock().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            return Err(tracerr::new!(postgres::Error::Finished))
                .map_err(tracerr::map_from);
        };
        tx.transaction()
            .map_err(tracerr::wrap!())?
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized,
    {
        let guard = self.lock().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            return Err(tracerr::new!(postgres::Error::Finished))
                .map_err(tracerr::map_from);
        };
        tx.transaction()
            .map_err(tracerr::wrap!())?
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
