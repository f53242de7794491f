use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::error::TableError;

/// Stable identifier of a resource within its store.
///
/// `0` is reserved for "not assigned yet"; the store hands out the next free
/// id when such a resource is added.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl ResourceId {
    pub const UNASSIGNED: ResourceId = ResourceId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }

    pub fn next(self) -> Self {
        ResourceId(self.0 + 1)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ResourceId)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        ResourceId(value)
    }
}

/// One entity kind managed by a [`ResourceStore`](crate::table::ResourceStore).
pub trait Resource: Clone + fmt::Debug + PartialEq {
    /// Partial update merged by [`Resource::apply_patch`].
    type Patch: Clone + fmt::Debug;

    /// Collection name, also the REST path segment (`/api/{KIND}`).
    const KIND: &'static str;

    /// Human label used in notifications ("Classroom created successfully!").
    const LABEL: &'static str;

    fn id(&self) -> ResourceId;

    fn set_id(&mut self, id: ResourceId);

    fn display_name(&self) -> &str;

    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Checks required fields. The default only requires a non-blank name.
    fn validate(&self) -> Result<(), TableError> {
        if self.display_name().trim().is_empty() {
            return Err(TableError::validation(format!(
                "Please enter a {} name",
                Self::LABEL.to_lowercase()
            )));
        }
        Ok(())
    }

    /// Checks whether `patch` may be applied to this resource at all, before
    /// the merged result is validated.
    fn validate_patch(&self, _patch: &Self::Patch) -> Result<(), TableError> {
        Ok(())
    }

    /// Resets fields only the owning side may set (derived counters,
    /// server-issued tokens) on a resource about to be created.
    fn sanitize_new(&mut self) {}

    /// Preconditions for deleting this resource, checked before any call.
    fn validate_delete(&self) -> Result<(), TableError> {
        Ok(())
    }
}
