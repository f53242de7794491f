//! Read-only dashboards: the admin summary cards and a parent's view of
//! their children and required forms.

use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::requests::Envelope;
use common::validation;
use serde::Deserialize;

use crate::services::error::ApiError;
use crate::state::PortalState;

const API_PATH: &str = "/api/admin";

#[derive(Debug, Deserialize)]
pub struct ParentDashboardQuery {
    #[serde(default)]
    pub email: String,
}

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/dashboard", get().to(admin))
}

/// `GET /api/admin/dashboard`
pub async fn admin(state: web::Data<PortalState>) -> Result<HttpResponse, ApiError> {
    let portal = state.portal.read().await;
    Ok(HttpResponse::Ok().json(Envelope::new(portal.dashboard_summary())))
}

/// `GET /api/parents/dashboard?email=...`
pub async fn parent(
    state: web::Data<PortalState>,
    query: web::Query<ParentDashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    validation::require_email(&query.email)?;
    let portal = state.portal.read().await;
    Ok(HttpResponse::Ok().json(Envelope::new(portal.parent_dashboard(&query.email))))
}
