//! In-memory [`Database`] implementation.
//!
//! Keeps all the records in a single [`State`]. A [`Tx`] works on a private
//! copy of it, which replaces the shared one on [`Commit`]. Transactions are
//! serialized, so only one [`Tx`] may be in progress at a time.

mod impls;
mod state;

use std::{future::Future, sync::Arc};

use common::operations::{Commit, Transact};
use derive_more::{Deref, Display, Error as StdError};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracerr::Traced;

use crate::infra::{database, Database};

pub use self::state::State;

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Non-transactional [`Memory`] client.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Committed [`State`].
    state: Arc<RwLock<State>>,

    /// Lock serializing all the writers.
    writer: Arc<Mutex<()>>,
}

/// Transactional [`Memory`] client.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Committed [`State`] to be replaced on [`Commit`].
    committed: Arc<RwLock<State>>,

    /// Uncommitted [`State`] of this [`Tx`].
    ///
    /// [`None`] once this [`Tx`] is committed.
    staged: Arc<Mutex<Option<Staged>>>,
}

/// Uncommitted [`State`] of a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// [`State`] modified by the [`Tx`].
    state: State,

    /// Guard of [`NonTx::writer`], held until the [`Tx`] is finished.
    _writer: OwnedMutexGuard<()>,
}

impl Tx {
    /// Commits this [`Tx`].
    ///
    /// # Errors
    ///
    /// If this [`Tx`] has been committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let staged = self
            .staged
            .lock()
            .await
            .take()
            .ok_or_else(|| tracerr::new!(Error::Finished))
            .map_err(tracerr::map_from)?;
        *self.committed.write().await = staged.state;
        Ok(())
    }
}

/// Access to a [`State`].
pub trait Storage {
    /// Reads the [`State`] with the provided function.
    ///
    /// # Errors
    ///
    /// If the [`State`] is not accessible anymore.
    fn read<T>(
        &self,
        f: impl FnOnce(&State) -> T,
    ) -> impl Future<Output = Result<T, Traced<database::Error>>>;

    /// Modifies the [`State`] with the provided function.
    ///
    /// The [`State`] is left untouched if the function fails.
    ///
    /// # Errors
    ///
    /// If the provided function fails, or the [`State`] is not accessible
    /// anymore.
    fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, Error>,
    ) -> impl Future<Output = Result<T, Traced<database::Error>>>;
}

impl Storage for NonTx {
    async fn read<T>(
        &self,
        f: impl FnOnce(&State) -> T,
    ) -> Result<T, Traced<database::Error>> {
        Ok(f(&*self.state.read().await))
    }

    async fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, Error>,
    ) -> Result<T, Traced<database::Error>> {
        let _writer = self.writer.lock().await;

        let mut state = self.state.write().await;
        let mut draft = state.clone();
        let out = f(&mut draft)
            .map_err(|e| tracerr::new!(e))
            .map_err(tracerr::map_from)?;
        *state = draft;

        Ok(out)
    }
}

impl Storage for Tx {
    async fn read<T>(
        &self,
        f: impl FnOnce(&State) -> T,
    ) -> Result<T, Traced<database::Error>> {
        let staged = self.staged.lock().await;
        let staged = staged
            .as_ref()
            .ok_or_else(|| tracerr::new!(Error::Finished))
            .map_err(tracerr::map_from)?;
        Ok(f(&staged.state))
    }

    async fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, Error>,
    ) -> Result<T, Traced<database::Error>> {
        let mut staged = self.staged.lock().await;
        let staged = staged
            .as_mut()
            .ok_or_else(|| tracerr::new!(Error::Finished))
            .map_err(tracerr::map_from)?;

        let mut draft = staged.state.clone();
        let out = f(&mut draft)
            .map_err(|e| tracerr::new!(e))
            .map_err(tracerr::map_from)?;
        staged.state = draft;

        Ok(out)
    }
}

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let writer = Arc::clone(&self.writer).lock_owned().await;
        let state = self.state.read().await.clone();
        Ok(Memory(Tx {
            committed: Arc::clone(&self.state),
            staged: Arc::new(Mutex::new(Some(Staged {
                state,
                _writer: writer,
            }))),
        }))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.commit().await.map_err(tracerr::wrap!())
    }
}

/// [`Memory`] database [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Uniqueness constraint is violated.
    #[display("Unique constraint `{_0}` is violated")]
    UniqueViolation(#[error(not(source))] &'static str),

    /// Referenced record doesn't exist.
    #[display("Foreign key constraint `{_0}` is violated")]
    ForeignKeyViolation(#[error(not(source))] &'static str),

    /// [`Tx`] is used after being committed.
    #[display("Transaction is already finished")]
    Finished,
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation(c) => constraint.map_or(true, |n| n == *c),
            Self::ForeignKeyViolation(..) | Self::Finished => false,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Insert, Select, Transact};

    use crate::{
        domain::{property_type, PropertyType},
        infra::Database as _,
    };

    use super::Memory;

    fn property_type(name: &str) -> PropertyType {
        PropertyType {
            id: property_type::Id::new(),
            name: name.parse().unwrap(),
            sequence: property_type::DEFAULT_SEQUENCE,
        }
    }

    #[tokio::test]
    async fn commits() {
        let db = Memory::new();
        let house = property_type("House");

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(house.clone())).await.unwrap();
        tx.execute(Commit).await.unwrap();
        drop(tx);

        let found = db
            .execute(Select(By::<Option<PropertyType>, _>::new(house.id)))
            .await
            .unwrap();
        assert_eq!(found, Some(house));
    }

    #[tokio::test]
    async fn rolls_back_on_drop() {
        let db = Memory::new();
        let house = property_type("House");

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(house.clone())).await.unwrap();
        drop(tx);

        let found = db
            .execute(Select(By::<Option<PropertyType>, _>::new(house.id)))
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn isolates_uncommitted() {
        let db = Memory::new();
        let house = property_type("House");

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(house.clone())).await.unwrap();

        let outside = db
            .execute(Select(By::<Option<PropertyType>, _>::new(house.id)))
            .await
            .unwrap();
        assert_eq!(outside, None);

        let inside = tx
            .execute(Select(By::<Option<PropertyType>, _>::new(house.id)))
            .await
            .unwrap();
        assert_eq!(inside, Some(house));
    }

    #[tokio::test]
    async fn refuses_use_after_commit() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Commit).await.unwrap();

        let err = tx.execute(Commit).await.unwrap_err();
        assert!(!err.as_ref().is_unique_violation(None));
        assert_eq!(err.as_ref().to_string(), "Transaction is already finished");
    }

    #[tokio::test]
    async fn enforces_unique_names() {
        let db = Memory::new();

        let tx = db.execute(Transact).await.unwrap();
        tx.execute(Insert(property_type("House"))).await.unwrap();
        let err = tx
            .execute(Insert(property_type("House")))
            .await
            .unwrap_err();

        assert!(err
            .as_ref()
            .is_unique_violation(Some(property_type::NAME_CONSTRAINT)));
    }
}
