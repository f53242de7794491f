//! HTTP API of the portal.
//!
//! - `resources`: CRUD scopes for every collection, plus exports.
//! - `invites`: parent invitations.
//! - `children`: adding children and per-student form assignment.
//! - `dashboard`: admin and parent dashboards.
//! - `error`: the JSON error body shared by every endpoint.

pub mod children;
pub mod dashboard;
pub mod error;
pub mod invites;
pub mod resources;

use actix_web::web;
use common::portal::Portal;
use common::table::TableError;
use log::debug;

use crate::services::error::ApiError;

/// Registers every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resources::form_templates())
        .service(resources::classrooms())
        .service(resources::student_forms())
        .service(resources::applications())
        .service(resources::parents())
        .service(invites::configure_routes())
        .service(children::configure_routes())
        .service(dashboard::configure_routes());
}

/// JSON extractor settings: body size limit, and malformed bodies reported
/// as validation errors in the usual error shape.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::from(TableError::validation(err.to_string())).into())
}

/// Clears cascade warnings after a committed change. Each warning was
/// already logged when it was raised.
pub(crate) fn drain_warnings(portal: &mut Portal) {
    let warnings = portal.take_warnings();
    if !warnings.is_empty() {
        debug!("{} reference warning(s) cleared", warnings.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PortalState;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use common::model::{
        Application, Classroom, FormTemplate, InviteStatus, ParentProfile, StudentForms,
    };
    use common::portal::{DashboardSummary, ParentDashboard};
    use common::requests::{ApiErrorBody, Envelope};
    use common::table::ResourceId;
    use serde_json::json;

    macro_rules! portal_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(json_config(1024 * 1024))
                    .app_data(web::Data::new(PortalState::seeded().unwrap()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lists_are_wrapped_in_data() {
        let app = portal_app!();
        let req = test::TestRequest::get().uri("/api/classrooms").to_request();
        let body: Envelope<Vec<Classroom>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.len(), 5);
        assert_eq!(body.data[0].name, "Butterfly");
    }

    #[actix_web::test]
    async fn create_assigns_a_fresh_id() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/classrooms")
            .set_json(json!({ "id": 1, "name": "Ladybug" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Envelope<Classroom> = test::read_body_json(resp).await;
        assert_ne!(body.data.id, ResourceId(1));
        assert_eq!(body.data.name, "Ladybug");

        let req = test::TestRequest::get().uri("/api/classrooms").to_request();
        let list: Envelope<Vec<Classroom>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.data.len(), 6);
    }

    #[actix_web::test]
    async fn create_ignores_server_owned_fields() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/classrooms")
            .set_json(json!({ "name": "Ladybug", "student_count": 7 }))
            .to_request();
        let created: Envelope<Classroom> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.data.student_count, 0);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/classrooms/{}", created.data.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/parents")
            .set_json(json!({
                "name": "Pat Lone",
                "email": "pat.lone@email.com",
                "invite_status": "Active",
                "invite_token": "forged"
            }))
            .to_request();
        let parent: Envelope<ParentProfile> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(parent.data.invite_status, InviteStatus::Inactive);
        assert_eq!(parent.data.invite_token, None);
    }

    #[actix_web::test]
    async fn parents_with_children_are_kept() {
        let app = portal_app!();
        let req = test::TestRequest::delete().uri("/api/parents/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body.error.message,
            "Cannot delete Jennifer Johnson: children are still registered under emma.johnson@email.com"
        );
    }

    #[actix_web::test]
    async fn duplicate_names_are_rejected() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/classrooms")
            .set_json(json!({ "name": "Butterfly" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_bodies_use_the_error_shape() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/form-templates")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "validation");
    }

    #[actix_web::test]
    async fn patch_renames_a_form() {
        let app = portal_app!();
        let req = test::TestRequest::patch()
            .uri("/api/form-templates/1")
            .set_json(json!({ "name": "Enrollment Intake" }))
            .to_request();
        let body: Envelope<FormTemplate> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.name, "Enrollment Intake");
    }

    #[actix_web::test]
    async fn unknown_ids_are_not_found() {
        let app = portal_app!();
        let req = test::TestRequest::patch()
            .uri("/api/form-templates/99")
            .set_json(json!({ "name": "Anything" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "not_found");
    }

    #[actix_web::test]
    async fn occupied_classrooms_cannot_be_deleted() {
        let app = portal_app!();
        let req = test::TestRequest::delete().uri("/api/classrooms/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body,
            ApiErrorBody::new("validation", "Cannot delete Butterfly: 15 students are still assigned")
        );
    }

    #[actix_web::test]
    async fn deleting_a_form_returns_its_id() {
        let app = portal_app!();
        let req = test::TestRequest::delete().uri("/api/form-templates/5").to_request();
        let body: Envelope<ResourceId> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data, ResourceId(5));

        let req = test::TestRequest::get().uri("/api/form-templates").to_request();
        let list: Envelope<Vec<FormTemplate>> = test::call_and_read_body_json(&app, req).await;
        assert!(list.data.iter().all(|f| f.id != ResourceId(5)));
    }

    #[actix_web::test]
    async fn csv_export_follows_the_filters() {
        let app = portal_app!();
        let req = test::TestRequest::get()
            .uri("/api/classrooms/export?format=csv&search=butter")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"Classrooms_"));
        assert!(disposition.ends_with(".csv\""));
        let body = test::read_body(resp).await;
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "Classroom Name,Student Count,Status\nButterfly,15,Active\n"
        );
    }

    #[actix_web::test]
    async fn xlsx_export_of_parents() {
        let app = portal_app!();
        let req = test::TestRequest::get()
            .uri("/api/parents/export?format=xlsx&status=Archive")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        );
    }

    #[actix_web::test]
    async fn invite_creates_parent_and_application() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/invites")
            .set_json(json!({
                "child_first_name": "Ava",
                "child_last_name": "Lee",
                "classroom_id": 2,
                "parent_name": "Grace Lee",
                "email": "grace.lee@email.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Envelope<ParentProfile> = test::read_body_json(resp).await;
        assert_eq!(body.data.invite_status, InviteStatus::Inactive);
        assert!(body.data.invite_token.is_some());

        let req = test::TestRequest::get().uri("/api/applications").to_request();
        let apps: Envelope<Vec<Application>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(apps.data.len(), 5);
    }

    #[actix_web::test]
    async fn invite_for_a_known_email_is_rejected() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/invites")
            .set_json(json!({
                "child_first_name": "Ava",
                "child_last_name": "Johnson",
                "classroom_id": 2,
                "parent_name": "Jennifer Johnson",
                "email": "emma.johnson@email.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/applications").to_request();
        let apps: Envelope<Vec<Application>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(apps.data.len(), 4);
    }

    #[actix_web::test]
    async fn resend_only_for_pending_invitations() {
        let app = portal_app!();
        let req = test::TestRequest::post().uri("/api/parents/1/resend-invite").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/api/parents/2/resend-invite").to_request();
        let body: Envelope<ParentProfile> = test::call_and_read_body_json(&app, req).await;
        assert!(body.data.invite_token.is_some());
    }

    #[actix_web::test]
    async fn added_child_gets_the_classroom_forms() {
        let app = portal_app!();
        let req = test::TestRequest::post()
            .uri("/api/children")
            .set_json(json!({
                "first_name": "Mia",
                "last_name": "Smith",
                "classroom_id": 2,
                "parent_email": "sarah.smith@email.com"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Envelope<StudentForms> = test::read_body_json(resp).await;
        assert_eq!(body.data.form_ids, vec![ResourceId(1), ResourceId(3)]);

        let req = test::TestRequest::get().uri("/api/classrooms").to_request();
        let rooms: Envelope<Vec<Classroom>> = test::call_and_read_body_json(&app, req).await;
        let purple = rooms.data.iter().find(|r| r.name == "Purple").unwrap();
        assert_eq!(purple.student_count, 13);
    }

    #[actix_web::test]
    async fn unassigning_a_form_twice_is_not_found() {
        let app = portal_app!();
        let req = test::TestRequest::delete().uri("/api/student-forms/1/forms/2").to_request();
        let body: Envelope<StudentForms> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.form_ids, vec![ResourceId(1)]);

        let req = test::TestRequest::delete().uri("/api/student-forms/1/forms/2").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn admin_dashboard_counts() {
        let app = portal_app!();
        let req = test::TestRequest::get().uri("/api/admin/dashboard").to_request();
        let body: Envelope<DashboardSummary> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.classrooms.total_classrooms, 5);
        assert_eq!(body.data.classrooms.active_classrooms, 4);
        assert_eq!(body.data.applications.completed, 2);
        assert_eq!(body.data.forms, 5);
    }

    #[actix_web::test]
    async fn parent_dashboard_needs_an_email() {
        let app = portal_app!();
        let req = test::TestRequest::get().uri("/api/parents/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/parents/dashboard?email=emma.johnson%40email.com")
            .to_request();
        let body: Envelope<ParentDashboard> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.children.len(), 1);
        assert_eq!(body.data.progress.progress, 100);
    }
}
