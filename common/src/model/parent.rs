use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::{Resource, ResourceId, TableError};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParentStatus {
    #[default]
    Active,
    Archive,
}

impl ParentStatus {
    pub const ALL: [ParentStatus; 2] = [ParentStatus::Active, ParentStatus::Archive];

    pub fn as_str(self) -> &'static str {
        match self {
            ParentStatus::Active => "Active",
            ParentStatus::Archive => "Archive",
        }
    }
}

impl fmt::Display for ParentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the parent has accepted their invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InviteStatus {
    Active,
    #[default]
    Inactive,
}

impl InviteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteStatus::Active => "Active",
            InviteStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentProfile {
    #[serde(default)]
    pub id: ResourceId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: ParentStatus,
    #[serde(default)]
    pub invite_status: InviteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ParentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_status: Option<InviteStatus>,
}

impl ParentProfilePatch {
    pub fn status(status: ParentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl ParentProfile {
    pub fn is_invited(&self) -> bool {
        self.invite_status == InviteStatus::Active
    }
}

impl Resource for ParentProfile {
    type Patch = ParentProfilePatch;
    const KIND: &'static str = "parents";
    const LABEL: &'static str = "Parent";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn set_id(&mut self, id: ResourceId) {
        self.id = id;
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn apply_patch(&mut self, patch: &ParentProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(invite_status) = patch.invite_status {
            self.invite_status = invite_status;
        }
    }

    /// Invitations are only accepted and tokens only issued by the portal.
    fn sanitize_new(&mut self) {
        self.invite_status = InviteStatus::Inactive;
        self.invite_token = None;
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.name.trim().is_empty() {
            return Err(TableError::validation("Please enter a parent name"));
        }
        validation::require_email(&self.email)
    }
}
