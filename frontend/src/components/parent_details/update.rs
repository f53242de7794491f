//! Update function of the Parent Details page.
//!
//! Status toggles go through the parent coordinator. Resending an invite and
//! adding a child are plain service calls: the first changes nothing on this
//! page, the second touches three kinds at once, so the page reloads the
//! portal once the backend accepted it.

use common::model::{ParentProfilePatch, ParentStatus};
use common::requests::AddChildRequest;
use common::table::Mutation;
use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ParentDetails;
use crate::api::{load_portal, post_empty, post_json, API_BASE};
use crate::components::section::TableControls;
use crate::toast::show_toast;

pub fn update(component: &mut ParentDetails, ctx: &Context<ParentDetails>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(portal)) => {
            component.portal = portal;
            component.refresh();
            true
        }
        Msg::Loaded(Err(err)) => {
            error!(format!("loading parents failed: {}", err));
            show_toast(&format!("Error loading data: {}", err), true);
            false
        }
        Msg::Table(table_msg) => component.parents.table.handle(table_msg),
        Msg::ToggleStatus(id) => {
            let Some(parent) = component.portal.parents().get(id) else {
                return false;
            };
            let next = match parent.status {
                ParentStatus::Active => ParentStatus::Archive,
                ParentStatus::Archive => ParentStatus::Active,
            };
            component.parents.submit(
                &component.portal,
                Mutation::Update {
                    id,
                    patch: ParentProfilePatch::status(next),
                },
                ctx.link(),
                Msg::Done,
            )
        }
        Msg::ResendInvite(id) => {
            if !component.resending.insert(id) {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                let url = format!("{}/parents/{}/resend-invite", API_BASE, id);
                link.send_message(Msg::InviteResent(id, post_empty(&url).await));
            });
            true
        }
        Msg::InviteResent(id, result) => {
            component.resending.remove(&id);
            match result {
                Ok(parent) => show_toast(&format!("Invitation resent to {}", parent.email), false),
                Err(err) => show_toast(&err.message, true),
            }
            true
        }
        Msg::OpenAddChild(email) => {
            component.child = Some(AddChildRequest {
                parent_email: email,
                ..Default::default()
            });
            true
        }
        Msg::CloseAddChild => {
            component.child = None;
            true
        }
        Msg::ChildField(field, value) => {
            component.set_child_field(field, value);
            true
        }
        Msg::SaveChild => {
            let Some(request) = component.child.clone() else {
                return false;
            };
            if component.adding_child {
                return false;
            }
            if let Err(err) = request.validate() {
                show_toast(&err.to_string(), true);
                return false;
            }
            component.adding_child = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let url = format!("{}/children", API_BASE);
                link.send_message(Msg::ChildAdded(post_json(&url, &request).await));
            });
            true
        }
        Msg::ChildAdded(result) => {
            component.adding_child = false;
            match result {
                Ok(student) => {
                    show_toast(&format!("{} added successfully!", student.child_name), false);
                    component.child = None;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        link.send_message(Msg::Loaded(load_portal().await));
                    });
                }
                Err(err) => show_toast(&err.message, true),
            }
            true
        }
        Msg::Done(completion) => {
            component.parents.complete(&mut component.portal, completion);
            component.refresh();
            true
        }
    }
}
