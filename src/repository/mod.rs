//! Repository layer: in-memory stores and the concert archive DAO

pub mod archive;
pub mod memory;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::models::{Concert, Parolee};

pub use archive::{ConcertDao, PgConcertDao};
pub use memory::{EntityStore, IdAllocator};

/// Main repository struct holding every store
#[derive(Clone)]
pub struct Repository {
    pub concerts: Arc<EntityStore<Concert>>,
    pub parolees: Arc<EntityStore<Parolee>>,
    /// Present only when a database is configured
    pub archive: Option<Arc<dyn ConcertDao>>,
}

impl Repository {
    /// In-memory stores only
    pub fn new() -> Self {
        Self {
            concerts: Arc::new(EntityStore::new()),
            parolees: Arc::new(EntityStore::new()),
            archive: None,
        }
    }

    /// In-memory stores plus the Postgres-backed concert archive
    pub fn with_archive(pool: Pool<Postgres>) -> Self {
        Self {
            archive: Some(Arc::new(PgConcertDao::new(pool))),
            ..Self::new()
        }
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
