//! # Invitation Service
//!
//! *   `POST /api/invites`: the "Invite Parent" page. Stores an inactive
//!     parent profile carrying a fresh invitation token, together with an
//!     incomplete application for the child. Both records are created or
//!     neither is.
//! *   `POST /api/parents/{id}/resend-invite`: replaces the token of a parent
//!     who has not accepted yet.
//!
//! Sending the invitation email is outside the portal; the token is what a
//! mailer would embed in the link.

use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Scope};
use common::requests::{Envelope, InviteParentRequest};
use common::table::ResourceId;
use log::info;

use crate::services::drain_warnings;
use crate::services::error::ApiError;
use crate::state::{invite_token, PortalState};

const API_PATH: &str = "/api/invites";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(process))
}

/// Actix handler for `POST /api/invites`.
pub async fn process(
    state: web::Data<PortalState>,
    body: web::Json<InviteParentRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut portal = state.portal.write().await;
    let (parent, application) = portal.invite_parent(&body, invite_token())?;
    drain_warnings(&mut portal);
    info!(
        "invitation {} sent to {} (application {})",
        parent.id, parent.email, application.id
    );
    Ok(HttpResponse::Created().json(Envelope::new(parent)))
}

/// Actix handler for `POST /api/parents/{id}/resend-invite`.
pub async fn resend(
    state: web::Data<PortalState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = ResourceId(path.into_inner());
    let mut portal = state.portal.write().await;
    let parent = portal.resend_invite(id, invite_token())?;
    info!("invitation resent to {}", parent.email);
    Ok(HttpResponse::Ok().json(Envelope::new(parent)))
}
