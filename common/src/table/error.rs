use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::mutation::PendingKey;
use crate::table::resource::ResourceId;

/// Failure of a store or mutation operation.
///
/// `Validation` and `Service` are surfaced to the user and end the current
/// operation. `NotFound` means local state drifted from the server; it ends
/// the operation but the page keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{0}")]
    Validation(String),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: ResourceId },
    #[error("{key} already has an operation in progress")]
    AlreadyPending { key: PendingKey },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl TableError {
    pub fn validation(message: impl Into<String>) -> Self {
        TableError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: ResourceId) -> Self {
        TableError::NotFound { kind, id }
    }

    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Validation(_) => "validation",
            TableError::NotFound { .. } => "not_found",
            TableError::AlreadyPending { .. } => "already_pending",
            TableError::Service(_) => "service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceErrorKind {
    /// The request never produced a response.
    Transport,
    /// The service answered with a non-2xx status.
    Status,
    /// The service or a proxy gave up waiting (408 / 504).
    Timeout,
    /// The response body could not be decoded.
    Decode,
}

/// A rejected call to the backing service.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ServiceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Transport,
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            408 | 504 => ServiceErrorKind::Timeout,
            _ => ServiceErrorKind::Status,
        };
        Self {
            kind,
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Decode,
            status: None,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ServiceErrorKind::Timeout
    }
}

/// A cascade step found a reference that no longer resolves, or found
/// dependents it did not expect.
///
/// Never returned as an error: it is logged and collected for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIntegrityWarning {
    /// Collection holding the reference, e.g. `"student-forms"`.
    pub holder_kind: &'static str,
    pub holder_id: ResourceId,
    /// Collection the reference points into, e.g. `"form-templates"`.
    pub target_kind: &'static str,
    pub target_id: ResourceId,
    pub detail: String,
}

impl ReferenceIntegrityWarning {
    pub fn new(
        holder_kind: &'static str,
        holder_id: ResourceId,
        target_kind: &'static str,
        target_id: ResourceId,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            holder_kind,
            holder_id,
            target_kind,
            target_id,
            detail: detail.into(),
        }
    }

    /// Emits the warning on the `log` facade and hands it back.
    pub fn logged(self) -> Self {
        log::warn!("reference integrity: {}", self);
        self
    }
}

impl fmt::Display for ReferenceIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}: {}",
            self.holder_kind, self.holder_id, self.target_kind, self.target_id, self.detail
        )
    }
}
