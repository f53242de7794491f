//! Tabular resource management.
//!
//! Data flows `ResourceStore -> FilterPipeline -> Paginator -> render`, and
//! user actions flow `MutationCoordinator -> BackingService -> Reconcile`,
//! after which the rows are re-projected and re-filtered.

pub mod error;
pub mod filter;
pub mod mutation;
pub mod paginate;
pub mod resource;
pub mod store;
pub mod view;

pub use error::{ReferenceIntegrityWarning, ServiceError, TableError};
pub use filter::{FilterCriteria, FilterPipeline, StatusFilter};
pub use mutation::{
    BackingService, Change, Completion, LogNotifier, Mutation, MutationCoordinator, MutationKind,
    MutationOutcome, Notifier, PendingKey, PendingOperation, Reconcile, Ticket, execute,
    fetch_into,
};
pub use paginate::{Page, PageBounds, PageCursor, Paginator, Viewport};
pub use resource::{Resource, ResourceId};
pub use store::ResourceStore;
pub use view::TableView;
