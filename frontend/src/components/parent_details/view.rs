use common::model::{ParentProfile, ParentStatus};
use common::query::parent_dashboard_link;
use common::table::{PendingKey, Resource};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{ChildField, ParentDetails};
use crate::components::section::{current_viewport, TableMsg};
use crate::components::widgets::{
    export_links, icon_button, pager, search_box, select_box, stat_card, status_options,
};
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

pub fn view(component: &ParentDetails, ctx: &Context<ParentDetails>) -> Html {
    let link = ctx.link();
    let section = &component.parents;
    let criteria = section.table.criteria();
    let page = section.table.page(current_viewport());
    let stats = component.portal.parent_stats();

    html! {
        <div class="page parent-details">
            <h1>{"Parent Details"}</h1>
            <div class="stats">
                { stat_card("Active", stats.active) }
                { stat_card("Archived", stats.archived) }
                { stat_card("Accepted invitations", stats.invited) }
            </div>
            <section class="table-section">
                <div class="section-header">
                    { search_box(
                        "Search by name or email",
                        criteria.search.clone(),
                        link.callback(|term| Msg::Table(TableMsg::Search(term))),
                    ) }
                    { select_box(
                        status_options(ParentStatus::ALL.iter().map(|s| s.as_str())),
                        criteria.status.as_str().to_string(),
                        link.callback(|value| Msg::Table(TableMsg::Status(value))),
                    ) }
                    { export_links(ParentProfile::KIND, criteria) }
                </div>
                <table>
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Email"}</th>
                            <th>{"Status"}</th>
                            <th>{"Invitation"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.items.iter().map(|parent| row(component, link, parent)) }
                    </tbody>
                </table>
                { pager(
                    page.bounds,
                    link.callback(|_| Msg::Table(TableMsg::Previous)),
                    link.callback(|_| Msg::Table(TableMsg::Next)),
                ) }
            </section>
            { add_child_dialog(component, link) }
        </div>
    }
}

fn row(component: &ParentDetails, link: &Scope<ParentDetails>, parent: &ParentProfile) -> Html {
    let id = parent.id;
    let busy = component.parents.coordinator.is_pending(PendingKey::Existing(id));
    let resending = component.resending.contains(&id);
    let email = parent.email.clone();
    let (toggle_icon, toggle_label) = match parent.status {
        ParentStatus::Active => ("archive", "Archive"),
        ParentStatus::Archive => ("unarchive", "Activate"),
    };

    html! {
        <tr key={id.0}>
            <td>{ parent.name.clone() }</td>
            <td><a href={parent_dashboard_link(&parent.email)}>{ parent.email.clone() }</a></td>
            <td>{ parent.status.as_str() }</td>
            <td>{ parent.invite_status.as_str() }</td>
            <td class="actions">
                { icon_button(toggle_icon, toggle_label, link.callback(move |_| Msg::ToggleStatus(id)), busy) }
                if !parent.is_invited() {
                    { icon_button(
                        "forward_to_inbox",
                        if resending { "Sending..." } else { "Resend invite" },
                        link.callback(move |_| Msg::ResendInvite(id)),
                        resending,
                    ) }
                }
                { icon_button("person_add", "Add child", link.callback(move |_| Msg::OpenAddChild(email.clone())), false) }
            </td>
        </tr>
    }
}

fn add_child_dialog(component: &ParentDetails, link: &Scope<ParentDetails>) -> Html {
    let Some(child) = component.child.as_ref() else {
        return html! {};
    };
    let classroom_options = std::iter::once(("0".to_string(), "Select a classroom".to_string()))
        .chain(
            component
                .portal
                .assignable_classrooms()
                .into_iter()
                .map(|room| (room.id.to_string(), room.name.clone())),
        )
        .collect();
    let text_field = |label: &str, value: String, field: ChildField| {
        html! {
            <label class="field">
                <span>{ label }</span>
                <input
                    type="text"
                    value={value}
                    oninput={link.callback(move |e: InputEvent| {
                        Msg::ChildField(field, e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                    })}
                />
            </label>
        }
    };

    html! {
        <YwMaterialTopSheet
            open={true}
            title={format!("Add child for {}", child.parent_email)}
            on_close={link.callback(|_| Msg::CloseAddChild)}
        >
            <div class="dialog-body">
                { text_field("First name", child.first_name.clone(), ChildField::FirstName) }
                { text_field("Last name", child.last_name.clone(), ChildField::LastName) }
                <label class="field">
                    <span>{"Classroom"}</span>
                    { select_box(
                        classroom_options,
                        child.classroom_id.to_string(),
                        link.callback(|value| Msg::ChildField(ChildField::Classroom, value)),
                    ) }
                </label>
                <div class="dialog-actions">
                    <button class="btn" onclick={link.callback(|_| Msg::CloseAddChild)}>{"Cancel"}</button>
                    <button class="btn primary" disabled={component.adding_child} onclick={link.callback(|_| Msg::SaveChild)}>
                        { if component.adding_child { "Adding..." } else { "Add child" } }
                    </button>
                </div>
            </div>
        </YwMaterialTopSheet>
    }
}
