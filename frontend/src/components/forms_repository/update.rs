//! Update function of the Forms Repository page.
//!
//! Add/edit dialogs stay open while their call is pending and close when
//! the backend confirms. Deletes and single-form removals start straight
//! from the table rows.

use common::model::{
    ChangeType, Classroom, ClassroomPatch, FormTemplate, FormTemplatePatch, StudentFormsPatch,
};
use common::query::classroom_from_query;
use common::table::{Mutation, MutationKind, MutationOutcome};
use gloo_console::error;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{Dialog, FormsRepository};
use crate::components::location_search;
use crate::toast::show_toast;

pub fn update(component: &mut FormsRepository, ctx: &Context<FormsRepository>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(Ok(portal)) => {
            component.portal = portal;
            component.refresh();
            let search = location_search();
            if let Some(id) = classroom_from_query(&search, component.portal.classrooms()) {
                component
                    .students
                    .table
                    .set_selector("classroom", &id.to_string());
            }
            true
        }
        Msg::Loaded(Err(err)) => {
            error!(format!("loading the forms repository failed: {}", err));
            show_toast(&format!("Error loading data: {}", err), true);
            false
        }
        Msg::Table(table, table_msg) => component.controls(table).handle(table_msg),
        Msg::Open(dialog) => {
            component.open(dialog);
            true
        }
        Msg::Close => {
            component.close();
            true
        }
        Msg::DraftName(name) => {
            component.draft.name = name;
            true
        }
        Msg::DraftChangeType(value) => match value.parse::<ChangeType>() {
            Ok(change_type) => {
                component.draft.change_type = change_type;
                true
            }
            Err(_) => false,
        },
        Msg::ToggleDraftForm(id) => {
            component.draft.toggle_form(id);
            true
        }
        Msg::Save => {
            save(component, ctx);
            true
        }
        Msg::DeleteClassroom(id) => component.classrooms.submit(
            &component.portal,
            Mutation::Delete(id),
            ctx.link(),
            Msg::ClassroomDone,
        ),
        Msg::DeleteForm(id) => component.forms.submit(
            &component.portal,
            Mutation::Delete(id),
            ctx.link(),
            Msg::FormDone,
        ),
        Msg::UnassignForm { student, form } => {
            let Some(patch) = component
                .portal
                .students()
                .get(student)
                .map(|s| s.unassign_patch(form))
            else {
                return false;
            };
            component.students.submit(
                &component.portal,
                Mutation::Update { id: student, patch },
                ctx.link(),
                Msg::StudentDone,
            )
        }
        Msg::ClassroomDone(completion) => {
            let outcome = component.classrooms.complete(&mut component.portal, completion);
            settle(component, outcome.as_ref().and_then(committed_kind))
        }
        Msg::FormDone(completion) => {
            let outcome = component.forms.complete(&mut component.portal, completion);
            settle(component, outcome.as_ref().and_then(committed_kind))
        }
        Msg::StudentDone(completion) => {
            let outcome = component.students.complete(&mut component.portal, completion);
            settle(component, outcome.as_ref().and_then(committed_kind))
        }
    }
}

fn save(component: &mut FormsRepository, ctx: &Context<FormsRepository>) {
    let draft = component.draft.clone();
    let link = ctx.link();
    match component.dialog {
        Dialog::AddClassroom => {
            let mut room = Classroom::new(draft.name.trim());
            room.form_ids = draft.form_ids;
            component
                .classrooms
                .submit(&component.portal, Mutation::Create(room), link, Msg::ClassroomDone);
        }
        Dialog::EditClassroom(id) => {
            let renamed = component
                .portal
                .classrooms()
                .get(id)
                .is_some_and(|room| room.name != draft.name.trim());
            let patch = ClassroomPatch {
                name: renamed.then(|| draft.name.trim().to_string()),
                form_ids: Some(draft.form_ids),
            };
            component.classrooms.submit(
                &component.portal,
                Mutation::Update { id, patch },
                link,
                Msg::ClassroomDone,
            );
        }
        Dialog::AddForm => {
            let form = FormTemplate::new(draft.name.trim(), draft.change_type);
            component
                .forms
                .submit(&component.portal, Mutation::Create(form), link, Msg::FormDone);
        }
        Dialog::EditForm(id) => {
            let patch = FormTemplatePatch {
                name: Some(draft.name.trim().to_string()),
                change_type: Some(draft.change_type),
            };
            component
                .forms
                .submit(&component.portal, Mutation::Update { id, patch }, link, Msg::FormDone);
        }
        Dialog::StudentForms(id) => {
            let patch = StudentFormsPatch {
                form_ids: Some(draft.form_ids),
                ..StudentFormsPatch::default()
            };
            component.students.submit(
                &component.portal,
                Mutation::Update { id, patch },
                link,
                Msg::StudentDone,
            );
        }
        Dialog::Closed => {}
    }
}

fn committed_kind<R>(outcome: &MutationOutcome<R>) -> Option<MutationKind> {
    match outcome {
        MutationOutcome::Committed { kind, .. } => Some(*kind),
        MutationOutcome::Discarded => None,
    }
}

/// Re-projects every table and closes the dialog once an add or edit landed.
fn settle(component: &mut FormsRepository, kind: Option<MutationKind>) -> bool {
    component.refresh();
    if matches!(kind, Some(MutationKind::Add | MutationKind::Edit)) {
        component.close();
    }
    true
}
