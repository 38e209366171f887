pub mod db;
pub mod directory;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use belcontact_core::rules::ContactValidationPolicy;
use rusqlite::Connection;
use std::path::Path;

pub use directory::StoreDirectory;

pub struct Store {
    conn: Connection,
    policy: ContactValidationPolicy,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self {
            conn,
            policy: ContactValidationPolicy::default(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self {
            conn,
            policy: ContactValidationPolicy::default(),
        })
    }

    /// Replaces the rules applied to every person and contact method write.
    pub fn with_policy(mut self, policy: ContactValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ContactValidationPolicy {
        &self.policy
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn persons(&self) -> repo::PersonsRepo<'_> {
        repo::PersonsRepo::new(&self.conn, &self.policy)
    }

    pub fn contact_methods(&self) -> repo::ContactMethodsRepo<'_> {
        repo::ContactMethodsRepo::new(&self.conn, &self.policy)
    }
}
