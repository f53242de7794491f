use common::model::ApplicationPatch;
use common::query::classroom_from_query;
use common::table::Mutation;
use gloo_console::error;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ApplicationStatus;
use crate::components::location_search;
use crate::components::section::TableControls;
use crate::toast::show_toast;

pub fn update(component: &mut ApplicationStatus, ctx: &Context<ApplicationStatus>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(portal)) => {
            component.portal = portal;
            component.refresh();
            if let Some(id) = classroom_from_query(&location_search(), component.portal.classrooms()) {
                component
                    .applications
                    .table
                    .set_selector("classroom", &id.to_string());
            }
            true
        }
        Msg::Loaded(Err(err)) => {
            error!(format!("loading applications failed: {}", err));
            show_toast(&format!("Error loading data: {}", err), true);
            false
        }
        Msg::Table(table_msg) => component.applications.table.handle(table_msg),
        Msg::SetFormStatus { id, status } => {
            let unchanged = component
                .portal
                .applications()
                .get(id)
                .is_some_and(|app| app.form_status == status);
            if unchanged {
                return false;
            }
            let patch = ApplicationPatch {
                form_status: Some(status),
                ..ApplicationPatch::default()
            };
            component.applications.submit(
                &component.portal,
                Mutation::Update { id, patch },
                ctx.link(),
                Msg::Done,
            )
        }
        Msg::Done(completion) => {
            component.applications.complete(&mut component.portal, completion);
            component.refresh();
            true
        }
    }
}
