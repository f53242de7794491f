//! One admin table on a page: its filtered, paginated rows and the
//! coordinator that runs mutations of its resource kind.
//!
//! Mutations start in `update` with [`Section::submit`], run against the
//! backend in a spawned task, and come back as a page message that is handed
//! to [`Section::complete`]. The local portal only changes there, with the
//! record the backend confirmed.

use common::portal::Portal;
use common::table::{
    execute, Completion, FilterPipeline, Mutation, MutationCoordinator, MutationOutcome,
    Reconcile, Resource, TableView, Viewport,
};
use gloo_console::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::Component;

use crate::api::RestService;
use crate::toast::ToastNotifier;

/// Phone-sized screens page by 5 rows, everything else by 10.
pub fn current_viewport() -> Viewport {
    let width = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .unwrap_or(1024.0);
    if width < 768.0 {
        Viewport::Compact
    } else {
        Viewport::Full
    }
}

/// Filter and paging input of one table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableMsg {
    Search(String),
    Status(String),
    Select(&'static str, String),
    Next,
    Previous,
}

/// Row-type independent controls of a [`TableView`].
pub trait TableControls {
    fn handle(&mut self, msg: TableMsg) -> bool;
}

impl<T> TableControls for TableView<T> {
    fn handle(&mut self, msg: TableMsg) -> bool {
        let viewport = current_viewport();
        match msg {
            TableMsg::Search(term) => self.set_search(term),
            TableMsg::Status(status) => self.set_status(&status),
            TableMsg::Select(name, value) => self.set_selector(name, &value),
            TableMsg::Next => return self.next_page(viewport),
            TableMsg::Previous => return self.previous_page(viewport),
        }
        true
    }
}

pub struct Section<R: Resource, T> {
    pub table: TableView<T>,
    pub coordinator: MutationCoordinator<R>,
    project: fn(&Portal) -> Vec<T>,
}

impl<R, T> Section<R, T>
where
    R: Resource + Serialize + DeserializeOwned + 'static,
    R::Patch: Serialize + 'static,
    Portal: Reconcile<R>,
{
    pub fn new(pipeline: FilterPipeline<T>, project: fn(&Portal) -> Vec<T>) -> Self {
        Self {
            table: TableView::new(pipeline),
            coordinator: MutationCoordinator::new(ToastNotifier),
            project,
        }
    }

    /// Re-projects the rows after the portal changed; cursors are clamped.
    pub fn refresh(&mut self, portal: &Portal) {
        self.table.set_rows((self.project)(portal));
    }

    /// Starts `mutation` unless local validation or a pending operation on
    /// the same target rejects it. Returns whether a call was started.
    pub fn submit<C: Component>(
        &mut self,
        portal: &Portal,
        mutation: Mutation<R>,
        link: &Scope<C>,
        done: fn(Completion<R>) -> C::Message,
    ) -> bool {
        match self.coordinator.begin(portal, mutation) {
            Ok(ticket) => {
                let link = link.clone();
                spawn_local(async move {
                    let service = RestService::<R>::default();
                    let completion = execute(ticket, &service).await;
                    link.send_message(done(completion));
                });
                true
            }
            Err(err) => {
                debug!(format!("{} mutation not started: {}", R::KIND, err));
                false
            }
        }
    }

    pub fn complete(
        &mut self,
        portal: &mut Portal,
        completion: Completion<R>,
    ) -> Option<MutationOutcome<R>> {
        self.coordinator.finish(portal, completion).ok()
    }
}
