//! Shared store handle.
//!
//! A [`Store`] is built once at startup and cloned into every caller. It owns the
//! database connection, the rental policy, and the locks that serialize
//! booking decisions per item:
//!
//! - one `tokio::sync::Mutex` per item id, created on first use and held across
//!   the availability check and the insert of a new rental (and across the
//!   rental count and delete of an item);
//! - one inventory-wide mutex held while a new item id is allocated.
//!
//! Tests construct isolated stores over `sqlite::memory:`.

use crate::config::database;
use crate::core::policy::RentalPolicy;
use crate::errors::Result;
use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};
use tracing::{info, instrument};

/// Handle to the persistence backend plus booking locks.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    db: DatabaseConnection,
    policy: RentalPolicy,
    item_locks: DashMap<i64, Arc<Mutex<()>>>,
    inventory_lock: Mutex<()>,
}

impl Store {
    /// Wraps an open connection with the default policy.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_policy(db, RentalPolicy::default())
    }

    /// Wraps an open connection with an explicit policy.
    #[must_use]
    pub fn with_policy(db: DatabaseConnection, policy: RentalPolicy) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                db,
                policy,
                item_locks: DashMap::new(),
                inventory_lock: Mutex::new(()),
            }),
        }
    }

    /// Connects to `database_url` and ensures the schema exists.
    #[instrument(skip(policy))]
    pub async fn open(database_url: &str, policy: RentalPolicy) -> Result<Self> {
        let db = database::create_connection(database_url).await?;
        let store = Self::with_policy(db, policy);
        store.initialize().await?;
        info!("Store ready");
        Ok(store)
    }

    /// Creates tables and indexes if missing. Safe to call more than once.
    pub async fn initialize(&self) -> Result<()> {
        database::create_tables(&self.inner.db).await
    }

    /// The underlying connection, for read-only queries.
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.inner.db
    }

    /// Active policy.
    #[must_use]
    pub fn policy(&self) -> RentalPolicy {
        self.inner.policy
    }

    /// Waits for exclusive access to writes on `item_id`.
    pub(crate) async fn lock_item(&self, item_id: i64) -> OwnedMutexGuard<()> {
        let lock = Arc::clone(
            self.inner
                .item_locks
                .entry(item_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        lock.lock_owned().await
    }

    /// Waits for exclusive access to item id allocation.
    pub(crate) async fn lock_inventory(&self) -> MutexGuard<'_, ()> {
        self.inner.inventory_lock.lock().await
    }
}
