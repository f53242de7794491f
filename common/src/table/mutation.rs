//! Orchestration of one mutating user action.
//!
//! Every operation goes `Idle -> Pending -> {Committed | Failed}`:
//!
//! 1. [`MutationCoordinator::begin`] validates locally and registers a
//!    [`PendingOperation`] for the target. Invalid input never leaves `Idle`,
//!    and a second operation on the same target is rejected while the first
//!    one is in flight.
//! 2. [`execute`] performs the backing-service call. It does not touch the
//!    coordinator or the store, so a UI can run it on its event loop and hand
//!    the [`Completion`] back as a message.
//! 3. [`MutationCoordinator::finish`] releases the lock and, only when the
//!    service confirmed the change, reconciles it into local state. A failed
//!    call leaves the store exactly as it was.
//!
//! Local state is never updated optimistically.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::table::error::{ServiceError, TableError};
use crate::table::resource::{Resource, ResourceId};
use crate::table::store::ResourceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Add,
    Edit,
    Delete,
}

impl MutationKind {
    fn past_tense(self) -> &'static str {
        match self {
            MutationKind::Add => "created",
            MutationKind::Edit => "updated",
            MutationKind::Delete => "deleted",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            MutationKind::Add => "creating",
            MutationKind::Edit => "updating",
            MutationKind::Delete => "deleting",
        }
    }
}

/// What a pending operation locks: the "add" control, or one existing id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingKey {
    New,
    Existing(ResourceId),
}

impl fmt::Display for PendingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingKey::New => write!(f, "new record"),
            PendingKey::Existing(id) => write!(f, "record {}", id),
        }
    }
}

/// In-flight marker; exists only between `begin` and `finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    pub kind: MutationKind,
    pub key: PendingKey,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum Mutation<R: Resource> {
    Create(R),
    Update { id: ResourceId, patch: R::Patch },
    Delete(ResourceId),
}

impl<R: Resource> Mutation<R> {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Add,
            Mutation::Update { .. } => MutationKind::Edit,
            Mutation::Delete(_) => MutationKind::Delete,
        }
    }

    pub fn key(&self) -> PendingKey {
        match self {
            Mutation::Create(_) => PendingKey::New,
            Mutation::Update { id, .. } | Mutation::Delete(id) => PendingKey::Existing(*id),
        }
    }
}

/// A confirmed change to apply to local state.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<R> {
    Loaded(Vec<R>),
    Created(R),
    Updated(R),
    Removed(ResourceId),
}

/// Local state that confirmed changes are applied to.
///
/// Implemented by a bare [`ResourceStore`] and by aggregates that cascade
/// changes into dependent collections.
pub trait Reconcile<R: Resource> {
    fn store(&self) -> &ResourceStore<R>;

    /// Applies `change`; returns the stored resource for creates and updates.
    fn reconcile(&mut self, change: Change<R>) -> Result<Option<R>, TableError>;
}

impl<R: Resource> Reconcile<R> for ResourceStore<R> {
    fn store(&self) -> &ResourceStore<R> {
        self
    }

    fn reconcile(&mut self, change: Change<R>) -> Result<Option<R>, TableError> {
        match change {
            Change::Loaded(items) => self.replace_all(items).map(|()| None),
            Change::Created(resource) => self.add(resource).map(Some),
            Change::Updated(resource) => self.replace(resource).map(Some),
            Change::Removed(id) => self.remove(id).map(|_| None),
        }
    }
}

/// Remote collection behind a store (REST client, in-memory fake, ...).
#[allow(async_fn_in_trait)]
pub trait BackingService<R: Resource> {
    async fn list(&self) -> Result<Vec<R>, ServiceError>;

    /// Persists a new resource and returns it with its assigned id.
    async fn create(&self, draft: &R) -> Result<R, ServiceError>;

    async fn update(&self, id: ResourceId, patch: &R::Patch) -> Result<R, ServiceError>;

    async fn delete(&self, id: ResourceId) -> Result<(), ServiceError>;
}

/// User-facing notification sink (toasts in the browser).
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only writes to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("{}", message);
    }

    fn error(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Proof that an operation passed validation and holds its lock.
#[derive(Debug, Clone)]
pub struct Ticket<R: Resource> {
    operation: PendingOperation,
    mutation: Mutation<R>,
    generation: u64,
}

impl<R: Resource> Ticket<R> {
    pub fn operation(&self) -> &PendingOperation {
        &self.operation
    }

    pub fn mutation(&self) -> &Mutation<R> {
        &self.mutation
    }
}

/// Result of the backing-service call for one ticket.
#[derive(Debug, Clone)]
pub struct Completion<R: Resource> {
    ticket: Ticket<R>,
    result: Result<Change<R>, ServiceError>,
}

impl<R: Resource> Completion<R> {
    pub fn ticket(&self) -> &Ticket<R> {
        &self.ticket
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Calls the backing service for `ticket`.
pub async fn execute<R, S>(ticket: Ticket<R>, service: &S) -> Completion<R>
where
    R: Resource,
    S: BackingService<R>,
{
    let result = match &ticket.mutation {
        Mutation::Create(draft) => service.create(draft).await.map(Change::Created),
        Mutation::Update { id, patch } => service.update(*id, patch).await.map(Change::Updated),
        Mutation::Delete(id) => service.delete(*id).await.map(|()| Change::Removed(*id)),
    };
    Completion { ticket, result }
}

/// Loads the full collection from `service` into `state`.
pub async fn fetch_into<R, S, T>(state: &mut T, service: &S) -> Result<usize, TableError>
where
    R: Resource,
    S: BackingService<R>,
    T: Reconcile<R>,
{
    let items = service.list().await?;
    let count = items.len();
    state.reconcile(Change::Loaded(items))?;
    Ok(count)
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<R> {
    Committed {
        kind: MutationKind,
        id: ResourceId,
        /// Stored resource for adds and edits.
        resource: Option<R>,
    },
    /// The owner was torn down while the call was in flight.
    Discarded,
}

pub struct MutationCoordinator<R: Resource> {
    pending: HashMap<PendingKey, PendingOperation>,
    generation: u64,
    notifier: Box<dyn Notifier>,
    _resource: std::marker::PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for MutationCoordinator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("kind", &R::KIND)
            .field("pending", &self.pending)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<R: Resource> Default for MutationCoordinator<R> {
    fn default() -> Self {
        Self::new(LogNotifier)
    }
}

impl<R: Resource> MutationCoordinator<R> {
    pub fn new(notifier: impl Notifier + 'static) -> Self {
        Self {
            pending: HashMap::new(),
            generation: 0,
            notifier: Box::new(notifier),
            _resource: std::marker::PhantomData,
        }
    }

    pub fn is_pending(&self, key: PendingKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Whether any operation of `kind` is in flight (drives "Adding..." spinners).
    pub fn is_busy(&self, kind: MutationKind) -> bool {
        self.pending.values().any(|op| op.kind == kind)
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingOperation> {
        self.pending.values()
    }

    /// `Idle -> Pending`. Validation failures are notified and returned; the
    /// operation then never reaches the service.
    pub fn begin<T>(&mut self, state: &T, mutation: Mutation<R>) -> Result<Ticket<R>, TableError>
    where
        T: Reconcile<R>,
    {
        let key = mutation.key();
        if self.pending.contains_key(&key) {
            log::warn!("rejected duplicate {} submission for {}", R::KIND, key);
            return Err(TableError::AlreadyPending { key });
        }

        if let Err(err) = Self::validate(state.store(), &mutation) {
            log::info!("{} {:?} rejected: {}", R::KIND, mutation.kind(), err);
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        let operation = PendingOperation {
            kind: mutation.kind(),
            key,
            started_at: Utc::now(),
        };
        self.pending.insert(key, operation.clone());
        Ok(Ticket {
            operation,
            mutation,
            generation: self.generation,
        })
    }

    fn validate(store: &ResourceStore<R>, mutation: &Mutation<R>) -> Result<(), TableError> {
        match mutation {
            Mutation::Create(draft) => {
                draft.validate()?;
                if draft.id().is_assigned() && store.contains(draft.id()) {
                    return Err(TableError::validation(format!(
                        "{} id {} is already in use",
                        R::LABEL,
                        draft.id()
                    )));
                }
                Ok(())
            }
            Mutation::Update { id, patch } => store.preview_update(*id, patch).map(|_| ()),
            Mutation::Delete(id) => store.require(*id)?.validate_delete(),
        }
    }

    /// `Pending -> Committed | Failed`.
    ///
    /// On success the confirmed change is reconciled into `state` and a
    /// success notification is sent. On failure `state` is not touched, the
    /// lock is released and the error is notified.
    pub fn finish<T>(
        &mut self,
        state: &mut T,
        completion: Completion<R>,
    ) -> Result<MutationOutcome<R>, TableError>
    where
        T: Reconcile<R>,
    {
        let Completion { ticket, result } = completion;
        if ticket.generation != self.generation {
            log::debug!(
                "discarding {} completion for {} after teardown",
                R::KIND,
                ticket.operation.key
            );
            return Ok(MutationOutcome::Discarded);
        }
        self.pending.remove(&ticket.operation.key);

        let kind = ticket.operation.kind;
        let change = match result {
            Ok(change) => change,
            Err(err) => {
                log::error!("{} {} failed: {}", R::KIND, kind.gerund(), err);
                self.notifier.error(&format!(
                    "Error {} {}: {}",
                    kind.gerund(),
                    R::LABEL.to_lowercase(),
                    err
                ));
                return Err(TableError::Service(err));
            }
        };

        let removed_id = match &change {
            Change::Removed(id) => Some(*id),
            _ => None,
        };
        match state.reconcile(change) {
            Ok(resource) => {
                let id = resource
                    .as_ref()
                    .map(Resource::id)
                    .or(removed_id)
                    .unwrap_or(ResourceId::UNASSIGNED);
                self.notifier
                    .success(&format!("{} {} successfully!", R::LABEL, kind.past_tense()));
                Ok(MutationOutcome::Committed { kind, id, resource })
            }
            Err(err) => {
                log::error!("{} reconcile after {:?} failed: {}", R::KIND, kind, err);
                self.notifier.error(&format!(
                    "Error {} {}: {}",
                    kind.gerund(),
                    R::LABEL.to_lowercase(),
                    err
                ));
                Err(err)
            }
        }
    }

    /// Runs a whole operation: `begin`, the service call, then `finish`.
    pub async fn run<T, S>(
        &mut self,
        state: &mut T,
        service: &S,
        mutation: Mutation<R>,
    ) -> Result<MutationOutcome<R>, TableError>
    where
        T: Reconcile<R>,
        S: BackingService<R>,
    {
        let ticket = self.begin(state, mutation)?;
        let completion = execute(ticket, service).await;
        self.finish(state, completion)
    }

    /// Drops every pending lock; completions already in flight will be
    /// discarded when they arrive. Called when the owning view unmounts.
    pub fn teardown(&mut self) {
        self.pending.clear();
        self.generation += 1;
    }
}
