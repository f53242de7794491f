//! Application Status page: every enrollment application with its form
//! status, filterable by classroom and status, exportable to CSV / Excel.
//!
//! `?id=` (a classroom id or name) pre-selects the classroom filter.

use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ApplicationStatus;

use crate::api::load_portal;

impl Component for ApplicationStatus {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        ApplicationStatus::new()
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
        self.applications.coordinator.teardown();
    }
}
