//! Forms Repository page: classrooms with their required forms, the form
//! template catalogue, and per-student form assignments.
//!
//! `?id=` (a classroom id or name) pre-selects the classroom filter of the
//! student table.

use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::FormsRepository;

use crate::api::load_portal;

impl Component for FormsRepository {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        FormsRepository::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Loaded(load_portal().await));
            });
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.classrooms.coordinator.teardown();
        self.forms.coordinator.teardown();
        self.students.coordinator.teardown();
    }
}
