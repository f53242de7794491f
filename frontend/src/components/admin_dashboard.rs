//! Admin landing page with the headline counters of every section.

use common::portal::DashboardSummary;
use common::table::ServiceError;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{get_json, API_BASE};
use crate::components::widgets::stat_card;
use crate::toast::show_toast;

pub enum Msg {
    Loaded(Result<DashboardSummary, ServiceError>),
}

#[derive(Default)]
pub struct AdminDashboard {
    summary: Option<DashboardSummary>,
}

impl Component for AdminDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            spawn_local(async move {
                let url = format!("{}/admin/dashboard", API_BASE);
                link.send_message(Msg::Loaded(get_json(&url).await));
            });
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(summary)) => {
                self.summary = Some(summary);
                true
            }
            Msg::Loaded(Err(err)) => {
                show_toast(&format!("Error loading dashboard: {}", err), true);
                false
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(summary) = self.summary else {
            return html! {
                <div class="page admin-dashboard">
                    <h1>{"Dashboard"}</h1>
                    <p>{"Loading..."}</p>
                </div>
            };
        };

        html! {
            <div class="page admin-dashboard">
                <h1>{"Dashboard"}</h1>
                <section>
                    <h2><a href="/forms-repository">{"Classrooms"}</a></h2>
                    <div class="stats">
                        { stat_card("Classrooms", summary.classrooms.active_classrooms) }
                        { stat_card("Students", summary.classrooms.total_students as usize) }
                        { stat_card("Form templates", summary.forms) }
                    </div>
                </section>
                <section>
                    <h2><a href="/application-status">{"Applications"}</a></h2>
                    <div class="stats">
                        { stat_card("Total", summary.applications.total) }
                        { stat_card("Completed", summary.applications.completed) }
                        { stat_card("Incomplete", summary.applications.incomplete) }
                    </div>
                </section>
                <section>
                    <h2><a href="/parent-details">{"Parents"}</a></h2>
                    <div class="stats">
                        { stat_card("Active", summary.parents.active) }
                        { stat_card("Archived", summary.parents.archived) }
                        { stat_card("Accepted invitations", summary.parents.invited) }
                    </div>
                    <a class="btn primary" href="/invite-parent">{"Invite a parent"}</a>
                </section>
            </div>
        }
    }
}
