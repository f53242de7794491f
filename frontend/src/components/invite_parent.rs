//! Invite Parent page: registers a child and sends the invitation that
//! creates the parent account.

use common::model::{Classroom, ParentProfile};
use common::requests::InviteParentRequest;
use common::table::{BackingService, ResourceId, ServiceError};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{post_json, RestService, API_BASE};
use crate::components::widgets::select_box;
use crate::toast::show_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ChildFirstName,
    ChildLastName,
    Classroom,
    ParentName,
    Email,
}

pub enum Msg {
    Classrooms(Result<Vec<Classroom>, ServiceError>),
    Input(Field, String),
    Submit,
    Sent(Result<ParentProfile, ServiceError>),
}

pub struct InviteParent {
    request: InviteParentRequest,
    classrooms: Vec<Classroom>,
    sending: bool,
    /// Message of the last rejected submission, shown under the form.
    problem: Option<String>,
}

impl Component for InviteParent {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = RestService::<Classroom>::default().list().await;
            link.send_message(Msg::Classrooms(result));
        });
        Self {
            request: InviteParentRequest::default(),
            classrooms: Vec::new(),
            sending: false,
            problem: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Classrooms(Ok(classrooms)) => {
                self.classrooms = classrooms.into_iter().filter(|room| !room.is_reserved()).collect();
                true
            }
            Msg::Classrooms(Err(err)) => {
                show_toast(&format!("Error loading classrooms: {}", err), true);
                false
            }
            Msg::Input(field, value) => {
                let request = &mut self.request;
                match field {
                    Field::ChildFirstName => request.child_first_name = value,
                    Field::ChildLastName => request.child_last_name = value,
                    Field::Classroom => {
                        request.classroom_id = value.parse().unwrap_or(ResourceId::UNASSIGNED)
                    }
                    Field::ParentName => request.parent_name = value,
                    Field::Email => request.email = value,
                }
                self.problem = None;
                true
            }
            Msg::Submit => {
                if self.sending {
                    return false;
                }
                if let Err(err) = self.request.validate() {
                    self.problem = Some(err.to_string());
                    return true;
                }
                self.sending = true;
                let request = self.request.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let url = format!("{}/invites", API_BASE);
                    link.send_message(Msg::Sent(post_json(&url, &request).await));
                });
                true
            }
            Msg::Sent(Ok(parent)) => {
                self.sending = false;
                show_toast(&format!("Invitation sent to {}", parent.email), false);
                self.request = InviteParentRequest::default();
                true
            }
            Msg::Sent(Err(err)) => {
                self.sending = false;
                self.problem = Some(err.message.clone());
                show_toast(&err.message, true);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let text = |label: &str, value: &str, field: Field, kind: &str| {
            html! {
                <label class="field">
                    <span>{ label }</span>
                    <input
                        type={kind.to_string()}
                        value={value.to_string()}
                        oninput={link.callback(move |e: InputEvent| {
                            Msg::Input(field, e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
                        })}
                    />
                </label>
            }
        };
        let classroom_options = std::iter::once(("0".to_string(), "Select a classroom".to_string()))
            .chain(
                self.classrooms
                    .iter()
                    .map(|room| (room.id.to_string(), room.name.clone())),
            )
            .collect();

        html! {
            <div class="page invite-parent">
                <h1>{"Invite Parent"}</h1>
                <form
                    class="card"
                    onsubmit={link.callback(|e: SubmitEvent| {
                        e.prevent_default();
                        Msg::Submit
                    })}
                >
                    <h2>{"Child"}</h2>
                    { text("First name", &self.request.child_first_name, Field::ChildFirstName, "text") }
                    { text("Last name", &self.request.child_last_name, Field::ChildLastName, "text") }
                    <label class="field">
                        <span>{"Classroom"}</span>
                        { select_box(
                            classroom_options,
                            self.request.classroom_id.to_string(),
                            link.callback(|value| Msg::Input(Field::Classroom, value)),
                        ) }
                    </label>
                    <h2>{"Parent"}</h2>
                    { text("Full name", &self.request.parent_name, Field::ParentName, "text") }
                    { text("Email", &self.request.email, Field::Email, "email") }
                    if let Some(problem) = &self.problem {
                        <p class="form-error">{ problem.clone() }</p>
                    }
                    <button class="btn primary" type="submit" disabled={self.sending}>
                        { if self.sending { "Sending..." } else { "Send invitation" } }
                    </button>
                </form>
            </div>
        }
    }
}
