//! # Resource Service Module
//!
//! CRUD endpoints shared by every portal collection. Each kind gets its own
//! scope under `/api/{kind}`, built from the same generic handlers:
//!
//! *   **`GET /`**: the whole collection, as `{ "data": [...] }`.
//! *   **`POST /`**: creates a record. Any client-sent id is ignored and the
//!     stored record, with its new id, is returned.
//! *   **`PATCH /{id}`**: applies a partial update and returns the stored record.
//! *   **`DELETE /{id}`**: removes the record and cascades the removal into
//!     dependent collections. Returns the removed id.
//!
//! Mutations run under the portal's write lock, so validation, reference
//! checks and cascades commit together or not at all. Kind-specific routes
//! (exports, form assignment, invitation resend, the parent dashboard) are
//! added to the same scopes in the per-kind functions below; ids only match
//! digits so they never shadow those routes.

pub mod export;

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::{Application, Classroom, FormTemplate, ParentProfile, StudentForms};
use common::portal::{ApplicationRow, ClassroomRow, Portal, References};
use common::requests::Envelope;
use common::table::{Reconcile, Resource, ResourceId};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::services::error::ApiError;
use crate::services::{children, dashboard, drain_warnings, invites};
use crate::state::PortalState;

const ID: &str = "/{id:\\d+}";

/// Generic scope for kind `R`.
pub fn configure_routes<R>() -> Scope
where
    R: Resource + Serialize + DeserializeOwned + 'static,
    R::Patch: DeserializeOwned + 'static,
    Portal: Reconcile<R> + References<R>,
{
    scope(&format!("/api/{}", R::KIND))
        .route("", get().to(list::<R>))
        .route("", post().to(create::<R>))
        .route(ID, patch().to(update::<R>))
        .route(ID, delete().to(remove::<R>))
}

pub fn form_templates() -> Scope {
    configure_routes::<FormTemplate>()
}

pub fn classrooms() -> Scope {
    configure_routes::<Classroom>().route("/export", get().to(export::process::<ClassroomRow>))
}

pub fn applications() -> Scope {
    configure_routes::<Application>()
        .route("/export", get().to(export::process::<ApplicationRow>))
}

pub fn parents() -> Scope {
    configure_routes::<ParentProfile>()
        .route("/export", get().to(export::process::<ParentProfile>))
        .route("/dashboard", get().to(dashboard::parent))
        .route("/{id:\\d+}/resend-invite", post().to(invites::resend))
}

pub fn student_forms() -> Scope {
    configure_routes::<StudentForms>()
        .route("/{id:\\d+}/forms/{form_id:\\d+}", post().to(children::assign_form))
        .route("/{id:\\d+}/forms/{form_id:\\d+}", delete().to(children::unassign_form))
}

async fn list<R>(state: web::Data<PortalState>) -> Result<HttpResponse, ApiError>
where
    R: Resource + Serialize,
    Portal: Reconcile<R>,
{
    let portal = state.portal.read().await;
    let items = portal.store_of::<R>().list();
    Ok(HttpResponse::Ok().json(Envelope::new(items)))
}

async fn create<R>(
    state: web::Data<PortalState>,
    body: web::Json<R>,
) -> Result<HttpResponse, ApiError>
where
    R: Resource + Serialize,
    Portal: Reconcile<R> + References<R>,
{
    let mut portal = state.portal.write().await;
    let stored = portal.create(body.into_inner())?;
    drain_warnings(&mut portal);
    info!("{} {} created: {}", R::LABEL, stored.id(), stored.display_name());
    Ok(HttpResponse::Created().json(Envelope::new(stored)))
}

async fn update<R>(
    state: web::Data<PortalState>,
    path: web::Path<u64>,
    body: web::Json<R::Patch>,
) -> Result<HttpResponse, ApiError>
where
    R: Resource + Serialize,
    Portal: Reconcile<R> + References<R>,
{
    let id = ResourceId(path.into_inner());
    let mut portal = state.portal.write().await;
    let stored = portal.update::<R>(id, &body)?;
    drain_warnings(&mut portal);
    info!("{} {} updated", R::LABEL, id);
    Ok(HttpResponse::Ok().json(Envelope::new(stored)))
}

async fn remove<R>(
    state: web::Data<PortalState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError>
where
    R: Resource,
    Portal: Reconcile<R> + References<R>,
{
    let id = ResourceId(path.into_inner());
    let mut portal = state.portal.write().await;
    let removed = portal.delete::<R>(id)?;
    drain_warnings(&mut portal);
    info!("{} {} deleted: {}", R::LABEL, id, removed.display_name());
    Ok(HttpResponse::Ok().json(Envelope::new(id)))
}
