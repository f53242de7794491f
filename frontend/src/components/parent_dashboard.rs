//! Parent dashboard: the children registered under one parent email and
//! how far the family is with its required forms.
//!
//! The email comes from `?id=`; without it the page asks for one.

use common::portal::ParentDashboard as Summary;
use common::query::deep_link_id;
use common::table::ServiceError;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{get_json, API_BASE};
use crate::components::location_search;
use crate::components::widgets::stat_card;
use crate::toast::show_toast;

pub enum Msg {
    Email(String),
    Lookup,
    Loaded(Result<Summary, ServiceError>),
}

pub struct ParentDashboard {
    email: String,
    loading: bool,
    summary: Option<Summary>,
}

impl ParentDashboard {
    fn lookup(&mut self, ctx: &Context<Self>) {
        let email = self.email.trim().to_string();
        if email.is_empty() {
            return;
        }
        self.loading = true;
        let link = ctx.link().clone();
        spawn_local(async move {
            let url = format!(
                "{}/parents/dashboard?email={}",
                API_BASE,
                urlencoding::encode(&email)
            );
            link.send_message(Msg::Loaded(get_json(&url).await));
        });
    }
}

impl Component for ParentDashboard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut page = Self {
            email: deep_link_id(&location_search()).unwrap_or_default(),
            loading: false,
            summary: None,
        };
        page.lookup(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Email(email) => {
                self.email = email;
                true
            }
            Msg::Lookup => {
                if self.loading {
                    return false;
                }
                self.lookup(ctx);
                true
            }
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(summary) => self.summary = Some(summary),
                    Err(err) => {
                        self.summary = None;
                        show_toast(&err.message, true);
                    }
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="page parent-dashboard">
                <h1>{"Parent Dashboard"}</h1>
                <form
                    class="lookup"
                    onsubmit={link.callback(|e: SubmitEvent| {
                        e.prevent_default();
                        Msg::Lookup
                    })}
                >
                    <input
                        type="email"
                        placeholder="Parent email"
                        value={self.email.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::Email(e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                        })}
                    />
                    <button class="btn primary" type="submit" disabled={self.loading}>
                        { if self.loading { "Loading..." } else { "Show" } }
                    </button>
                </form>
                { self.summary.as_ref().map(summary_view).unwrap_or_default() }
            </div>
        }
    }
}

fn summary_view(summary: &Summary) -> Html {
    let greeting = summary
        .parent
        .as_ref()
        .map(|parent| format!("Welcome, {}", parent.name))
        .unwrap_or_else(|| summary.email.clone());
    let progress = summary.progress;

    html! {
        <>
            <h2>{ greeting }</h2>
            <div class="stats">
                { stat_card("Required forms", progress.total) }
                { stat_card("Completed", progress.completed) }
                { stat_card("Outstanding", progress.incomplete) }
            </div>
            <div class="progress">
                <div class="progress-bar" style={format!("width: {}%", progress.progress)}></div>
                <span>{ format!("{}% complete", progress.progress) }</span>
            </div>
            if summary.children.is_empty() {
                <p class="empty">{"No children are registered under this email."}</p>
            } else {
                <div class="children">
                    { for summary.children.iter().map(|child| html! {
                        <div class="card child" key={child.application_id.0}>
                            <h3>{ child.child_name.clone() }</h3>
                            <p>{ child.classroom.clone() }</p>
                            <p class="status">{ child.form_status.as_str() }</p>
                            <ul>
                                { for child.required_forms.iter().map(|form| html! { <li>{ form.clone() }</li> }) }
                            </ul>
                        </div>
                    }) }
                </div>
            }
        </>
    }
}
