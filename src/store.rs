//! Policy table persistence
//!
//! The store is a port; MessagePack is the bundled adapter. Solved tables
//! are small, so whole-file reads and writes are fine.

use std::{fs::File, path::Path};

use crate::{
    error::{Error, Result},
    solver::PolicyTable,
};

/// Port for saving and loading solved policy tables
pub trait PolicyStore {
    /// Persist the table to the given path.
    fn save(&self, table: &PolicyTable, path: &Path) -> Result<()>;

    /// Load a table from the given path.
    fn load(&self, path: &Path) -> Result<PolicyTable>;
}

/// MessagePack-based policy store.
///
/// Provides persistent storage using the MessagePack binary format via
/// rmp_serde. This format offers good compression and fast
/// serialization/deserialization.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use oxo::solver::PolicyTable;
/// use oxo::store::{MsgPackStore, PolicyStore};
///
/// let store = MsgPackStore;
/// let table = PolicyTable::solve();
///
/// store.save(&table, Path::new("policy.msgpack"))?;
/// let loaded = store.load(Path::new("policy.msgpack"))?;
/// # Ok::<(), oxo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackStore;

impl MsgPackStore {
    /// Create a new MessagePack store.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyStore for MsgPackStore {
    fn save(&self, table: &PolicyTable, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write(&mut file, table).map_err(|e| Error::SerializationContext {
            operation: "serialize policy table to MessagePack".to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<PolicyTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let table =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize policy table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        Ok(table)
    }
}
