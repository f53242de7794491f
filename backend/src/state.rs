//! Shared portal state of the running server.
//!
//! The backend keeps every collection in memory for the lifetime of the
//! process. One `Portal` is shared by all workers behind an `Arc<RwLock>`:
//! list, export and dashboard handlers take read locks, mutating handlers
//! take the write lock for the whole validate-and-commit step so cascades
//! are applied atomically.

use std::sync::Arc;

use common::portal::seed;
use common::portal::Portal;
use common::table::TableError;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct PortalState {
    pub portal: Arc<RwLock<Portal>>,
}

impl PortalState {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal: Arc::new(RwLock::new(portal)),
        }
    }

    /// State holding the demo data.
    pub fn seeded() -> Result<Self, TableError> {
        Ok(Self::new(seed::demo_portal()?))
    }
}

/// Token identifying an invitation link.
pub fn invite_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
