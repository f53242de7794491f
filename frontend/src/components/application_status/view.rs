use common::model::{Application, FormStatus};
use common::query::parent_dashboard_link;
use common::table::{PendingKey, Resource};
use yew::prelude::*;

use super::messages::Msg;
use super::state::ApplicationStatus;
use crate::components::section::{current_viewport, TableMsg};
use crate::components::widgets::{
    export_links, pager, search_box, select_box, stat_card, status_options,
};

pub fn view(component: &ApplicationStatus, ctx: &Context<ApplicationStatus>) -> Html {
    let link = ctx.link();
    let section = &component.applications;
    let criteria = section.table.criteria();
    let page = section.table.page(current_viewport());
    let stats = component.portal.application_stats();

    let classroom_options = std::iter::once(("All".to_string(), "All classrooms".to_string()))
        .chain(
            component
                .portal
                .classrooms()
                .iter()
                .map(|room| (room.id.to_string(), room.name.clone())),
        )
        .collect();

    html! {
        <div class="page application-status">
            <h1>{"Application Status"}</h1>
            <div class="stats">
                { stat_card("Total applications", stats.total) }
                { stat_card("Completed", stats.completed) }
                { stat_card("Incomplete", stats.incomplete) }
            </div>
            <section class="table-section">
                <div class="section-header">
                    { search_box(
                        "Search by child, parent email or classroom",
                        criteria.search.clone(),
                        link.callback(|term| Msg::Table(TableMsg::Search(term))),
                    ) }
                    { select_box(
                        classroom_options,
                        criteria.selector("classroom").unwrap_or("All").to_string(),
                        link.callback(|value| Msg::Table(TableMsg::Select("classroom", value))),
                    ) }
                    { select_box(
                        status_options(FormStatus::ALL.iter().map(|s| s.as_str())),
                        criteria.status.as_str().to_string(),
                        link.callback(|value| Msg::Table(TableMsg::Status(value))),
                    ) }
                    { export_links(Application::KIND, criteria) }
                </div>
                <table>
                    <thead>
                        <tr>
                            <th>{"Child"}</th>
                            <th>{"Classroom"}</th>
                            <th>{"Parent email"}</th>
                            <th>{"Second parent"}</th>
                            <th>{"Form status"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for page.items.iter().map(|row| {
                            let id = row.id;
                            let busy = section.coordinator.is_pending(PendingKey::Existing(id));
                            let options = FormStatus::ALL
                                .iter()
                                .map(|s| (s.as_str().to_string(), s.as_str().to_string()))
                                .collect();
                            html! {
                                <tr key={id.0} class={classes!(busy.then_some("pending"))}>
                                    <td>{ row.child_name.clone() }</td>
                                    <td>{ row.classroom.clone() }</td>
                                    <td>
                                        <a href={parent_dashboard_link(&row.primary_email)}>
                                            { row.primary_email.clone() }
                                        </a>
                                    </td>
                                    <td>{ row.additional_parent_email.clone() }</td>
                                    <td>
                                        { select_box(
                                            options,
                                            row.form_status.as_str().to_string(),
                                            link.batch_callback(move |value: String| {
                                                let status = match value.as_str() {
                                                    "Completed" => FormStatus::Completed,
                                                    "Incomplete" => FormStatus::Incomplete,
                                                    _ => return None,
                                                };
                                                Some(Msg::SetFormStatus { id, status })
                                            }),
                                        ) }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
                { pager(
                    page.bounds,
                    link.callback(|_| Msg::Table(TableMsg::Previous)),
                    link.callback(|_| Msg::Table(TableMsg::Next)),
                ) }
            </section>
        </div>
    }
}
