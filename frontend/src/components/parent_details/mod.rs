//! Parent Details page: parent profiles with their account status and
//! invitation state. Admins archive or reactivate parents, resend pending
//! invitations and add further children to a family.

use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ParentDetails;

use crate::api::load_portal;

impl Component for ParentDetails {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        ParentDetails::new()
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
        self.parents.coordinator.teardown();
    }
}
