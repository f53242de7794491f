//! View of the Forms Repository page: classrooms, form templates and the
//! student form repository, each with its own search, filters and pager.

use common::model::ChangeType;
use common::portal::change_type_options;
use common::table::{MutationKind, PageBounds, PendingKey, ResourceId};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{Dialog, FormsRepository, Table};
use crate::components::section::{current_viewport, TableMsg};
use crate::components::widgets::{icon_button, pager, search_box, select_box};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

pub fn view(component: &FormsRepository, ctx: &Context<FormsRepository>) -> Html {
    let link = ctx.link();
    html! {
        <div class="page forms-repository">
            <h1>{"Forms Repository"}</h1>
            { classroom_section(component, link) }
            { form_section(component, link) }
            { student_section(component, link) }
            { dialog(component, link) }
        </div>
    }
}

fn table_msg(table: Table) -> impl Fn(TableMsg) -> Msg {
    move |msg| Msg::Table(table, msg)
}

fn section_pager(link: &Scope<FormsRepository>, table: Table, bounds: PageBounds) -> Html {
    pager(
        bounds,
        link.callback(move |_| Msg::Table(table, TableMsg::Previous)),
        link.callback(move |_| Msg::Table(table, TableMsg::Next)),
    )
}

fn classroom_section(component: &FormsRepository, link: &Scope<FormsRepository>) -> Html {
    let section = &component.classrooms;
    let page = section.table.page(current_viewport());
    let wrap = table_msg(Table::Classrooms);
    let adding = section.coordinator.is_busy(MutationKind::Add);

    html! {
        <section class="table-section">
            <div class="section-header">
                <h2>{"Classrooms"}</h2>
                { search_box(
                    "Search classrooms",
                    section.table.criteria().search.clone(),
                    link.callback(move |term| wrap(TableMsg::Search(term))),
                ) }
                { icon_button(
                    "add",
                    if adding { "Adding..." } else { "Add Classroom" },
                    link.callback(|_| Msg::Open(Dialog::AddClassroom)),
                    adding,
                ) }
            </div>
            <table>
                <thead>
                    <tr>
                        <th>{"Classroom"}</th>
                        <th>{"Students"}</th>
                        <th>{"Required forms"}</th>
                        <th>{"Status"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for page.items.iter().map(|row| {
                        let id = row.id;
                        let busy = section.coordinator.is_pending(PendingKey::Existing(id));
                        html! {
                            <tr key={id.0}>
                                <td>{ row.name.clone() }</td>
                                <td>{ row.student_count.to_string() }</td>
                                <td>{ row.forms.join(", ") }</td>
                                <td>{ row.status() }</td>
                                <td class="actions">
                                    { icon_button("edit", "Edit", link.callback(move |_| Msg::Open(Dialog::EditClassroom(id))), busy || row.reserved) }
                                    { icon_button("delete", "Delete", link.callback(move |_| Msg::DeleteClassroom(id)), busy || row.reserved) }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            { section_pager(link, Table::Classrooms, page.bounds) }
        </section>
    }
}

fn form_section(component: &FormsRepository, link: &Scope<FormsRepository>) -> Html {
    let section = &component.forms;
    let page = section.table.page(current_viewport());
    let search = table_msg(Table::Forms);
    let status = table_msg(Table::Forms);
    let options = change_type_options()
        .into_iter()
        .map(|o| (o.to_string(), o.to_string()))
        .collect();
    let adding = section.coordinator.is_busy(MutationKind::Add);

    html! {
        <section class="table-section">
            <div class="section-header">
                <h2>{"Form Templates"}</h2>
                { search_box(
                    "Search forms",
                    section.table.criteria().search.clone(),
                    link.callback(move |term| search(TableMsg::Search(term))),
                ) }
                { select_box(
                    options,
                    section.table.criteria().status.as_str().to_string(),
                    link.callback(move |value| status(TableMsg::Status(value))),
                ) }
                { icon_button(
                    "add",
                    if adding { "Adding..." } else { "Add Form" },
                    link.callback(|_| Msg::Open(Dialog::AddForm)),
                    adding,
                ) }
            </div>
            <table>
                <thead>
                    <tr>
                        <th>{"Form"}</th>
                        <th>{"Change type"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for page.items.iter().map(|form| {
                        let id = form.id;
                        let busy = section.coordinator.is_pending(PendingKey::Existing(id));
                        html! {
                            <tr key={id.0}>
                                <td>{ form.name.clone() }</td>
                                <td>{ form.change_type.as_str() }</td>
                                <td class="actions">
                                    { icon_button("edit", "Edit", link.callback(move |_| Msg::Open(Dialog::EditForm(id))), busy) }
                                    { icon_button("delete", "Delete", link.callback(move |_| Msg::DeleteForm(id)), busy) }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            { section_pager(link, Table::Forms, page.bounds) }
        </section>
    }
}

fn student_section(component: &FormsRepository, link: &Scope<FormsRepository>) -> Html {
    let section = &component.students;
    let page = section.table.page(current_viewport());
    let criteria = section.table.criteria();
    let search = table_msg(Table::Students);
    let by_classroom = table_msg(Table::Students);
    let by_form = table_msg(Table::Students);

    let classroom_options = std::iter::once(("All".to_string(), "All classrooms".to_string()))
        .chain(
            component
                .portal
                .classrooms()
                .iter()
                .map(|room| (room.id.to_string(), room.name.clone())),
        )
        .collect();
    let form_options = std::iter::once(("All".to_string(), "All forms".to_string()))
        .chain(
            component
                .portal
                .forms()
                .iter()
                .map(|form| (form.id.to_string(), form.name.clone())),
        )
        .collect();

    html! {
        <section class="table-section">
            <div class="section-header">
                <h2>{"Student Form Repository"}</h2>
                { search_box(
                    "Search students",
                    criteria.search.clone(),
                    link.callback(move |term| search(TableMsg::Search(term))),
                ) }
                { select_box(
                    classroom_options,
                    criteria.selector("classroom").unwrap_or("All").to_string(),
                    link.callback(move |value| by_classroom(TableMsg::Select("classroom", value))),
                ) }
                { select_box(
                    form_options,
                    criteria.selector("form").unwrap_or("All").to_string(),
                    link.callback(move |value| by_form(TableMsg::Select("form", value))),
                ) }
            </div>
            <table>
                <thead>
                    <tr>
                        <th>{"Child"}</th>
                        <th>{"Classroom"}</th>
                        <th>{"Parent email"}</th>
                        <th>{"Forms"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for page.items.iter().map(|row| {
                        let id = row.id;
                        let busy = section.coordinator.is_pending(PendingKey::Existing(id));
                        html! {
                            <tr key={id.0}>
                                <td>{ row.child_name.clone() }</td>
                                <td>{ row.classroom.clone() }</td>
                                <td>{ row.parent_email.clone() }</td>
                                <td class="chips">
                                    { for row.form_ids.iter().zip(row.forms.iter()).map(|(form_id, name)| {
                                        let form = *form_id;
                                        html! {
                                            <span class="chip">
                                                { name.clone() }
                                                <button
                                                    class="chip-remove"
                                                    disabled={busy}
                                                    onclick={link.callback(move |_| Msg::UnassignForm { student: id, form })}
                                                >
                                                    {"×"}
                                                </button>
                                            </span>
                                        }
                                    }) }
                                </td>
                                <td class="actions">
                                    { icon_button("assignment", "Forms", link.callback(move |_| Msg::Open(Dialog::StudentForms(id))), busy) }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            { section_pager(link, Table::Students, page.bounds) }
        </section>
    }
}

fn dialog(component: &FormsRepository, link: &Scope<FormsRepository>) -> Html {
    let (title, saving) = match component.dialog {
        Dialog::Closed => ("", false),
        Dialog::AddClassroom => ("Add Classroom", component.classrooms.coordinator.is_busy(MutationKind::Add)),
        Dialog::EditClassroom(_) => ("Edit Classroom", component.classrooms.coordinator.is_busy(MutationKind::Edit)),
        Dialog::AddForm => ("Add Form", component.forms.coordinator.is_busy(MutationKind::Add)),
        Dialog::EditForm(_) => ("Edit Form", component.forms.coordinator.is_busy(MutationKind::Edit)),
        Dialog::StudentForms(_) => ("Assign Forms", component.students.coordinator.is_busy(MutationKind::Edit)),
    };

    let body = match component.dialog {
        Dialog::AddClassroom | Dialog::EditClassroom(_) => html! {
            <>
                { name_field(component, link, "Classroom name") }
                { form_checklist(component, link) }
            </>
        },
        Dialog::AddForm | Dialog::EditForm(_) => html! {
            <>
                { name_field(component, link, "Form name") }
                { select_box(
                    ChangeType::ALL.iter().map(|ct| (ct.as_str().to_string(), ct.as_str().to_string())).collect(),
                    component.draft.change_type.as_str().to_string(),
                    link.callback(Msg::DraftChangeType),
                ) }
            </>
        },
        Dialog::StudentForms(_) => form_checklist(component, link),
        Dialog::Closed => html! {},
    };

    html! {
        <YwMaterialTopSheet
            open={component.dialog != Dialog::Closed}
            title={title.to_string()}
            on_close={link.callback(|_| Msg::Close)}
        >
            <div class="dialog-body">
                { body }
                <div class="dialog-actions">
                    <button class="btn" onclick={link.callback(|_| Msg::Close)}>{"Cancel"}</button>
                    <button class="btn primary" disabled={saving} onclick={link.callback(|_| Msg::Save)}>
                        { if saving { "Saving..." } else { "Save" } }
                    </button>
                </div>
            </div>
        </YwMaterialTopSheet>
    }
}

fn name_field(component: &FormsRepository, link: &Scope<FormsRepository>, label: &str) -> Html {
    html! {
        <label class="field">
            <span>{ label }</span>
            <input
                type="text"
                value={component.draft.name.clone()}
                oninput={link.callback(|e: InputEvent| {
                    Msg::DraftName(e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                })}
            />
        </label>
    }
}

fn form_checklist(component: &FormsRepository, link: &Scope<FormsRepository>) -> Html {
    html! {
        <fieldset class="checklist">
            <legend>{"Required forms"}</legend>
            { for component.portal.forms().iter().map(|form| {
                let id: ResourceId = form.id;
                let checked = component.draft.form_ids.contains(&id);
                html! {
                    <label key={id.0}>
                        <input
                            type="checkbox"
                            checked={checked}
                            onchange={link.callback(move |_| Msg::ToggleDraftForm(id))}
                        />
                        { form.name.clone() }
                    </label>
                }
            }) }
        </fieldset>
    }
}
