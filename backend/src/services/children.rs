//! Children and per-student form assignment.
//!
//! - `POST /api/children`: "Add child" on the Parent Details page.
//! - `POST /api/student-forms/{id}/forms/{form_id}`: assigns one form.
//! - `DELETE /api/student-forms/{id}/forms/{form_id}`: unassigns one form.

use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Scope};
use common::requests::{AddChildRequest, Envelope};
use common::table::ResourceId;
use log::info;

use crate::services::drain_warnings;
use crate::services::error::ApiError;
use crate::state::PortalState;

const API_PATH: &str = "/api/children";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(add))
}

pub async fn add(
    state: web::Data<PortalState>,
    body: web::Json<AddChildRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut portal = state.portal.write().await;
    let student = portal.add_child(&body)?;
    drain_warnings(&mut portal);
    info!(
        "{} added to {} for {}",
        student.child_name,
        portal.classroom_name(student.classroom_id),
        student.parent_email
    );
    Ok(HttpResponse::Created().json(Envelope::new(student)))
}

pub async fn assign_form(
    state: web::Data<PortalState>,
    path: web::Path<(u64, u64)>,
) -> Result<HttpResponse, ApiError> {
    let (student_id, form_id) = path.into_inner();
    let mut portal = state.portal.write().await;
    let student = portal.assign_form(ResourceId(student_id), ResourceId(form_id))?;
    info!("form {} assigned to student {}", form_id, student_id);
    Ok(HttpResponse::Ok().json(Envelope::new(student)))
}

pub async fn unassign_form(
    state: web::Data<PortalState>,
    path: web::Path<(u64, u64)>,
) -> Result<HttpResponse, ApiError> {
    let (student_id, form_id) = path.into_inner();
    let mut portal = state.portal.write().await;
    let student = portal.unassign_form(ResourceId(student_id), ResourceId(form_id))?;
    info!("form {} unassigned from student {}", form_id, student_id);
    Ok(HttpResponse::Ok().json(Envelope::new(student)))
}
