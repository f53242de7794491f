//! Shell of the portal: a navigation bar and the page picked from the
//! current path. Pages are plain links, each one loads its own data.

use yew::{html, Component, Context, Html};

use crate::components::admin_dashboard::AdminDashboard;
use crate::components::application_status::ApplicationStatus;
use crate::components::forms_repository::FormsRepository;
use crate::components::invite_parent::InviteParent;
use crate::components::parent_dashboard::ParentDashboard;
use crate::components::parent_details::ParentDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    FormsRepository,
    ApplicationStatus,
    ParentDetails,
    InviteParent,
    ParentDashboard,
    NotFound,
}

impl Page {
    const NAV: [(Page, &'static str, &'static str); 5] = [
        (Page::Dashboard, "/admin", "Dashboard"),
        (Page::FormsRepository, "/forms-repository", "Forms Repository"),
        (Page::ApplicationStatus, "/application-status", "Application Status"),
        (Page::ParentDetails, "/parent-details", "Parent Details"),
        (Page::InviteParent, "/invite-parent", "Invite Parent"),
    ];

    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/admin" => Page::Dashboard,
            "/forms-repository" => Page::FormsRepository,
            "/application-status" => Page::ApplicationStatus,
            "/parent-details" => Page::ParentDetails,
            "/invite-parent" => Page::InviteParent,
            "/parent-dashboard" => Page::ParentDashboard,
            _ => Page::NotFound,
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::from_path(&current_path()),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let content = match self.page {
            Page::Dashboard => html! { <AdminDashboard /> },
            Page::FormsRepository => html! { <FormsRepository /> },
            Page::ApplicationStatus => html! { <ApplicationStatus /> },
            Page::ParentDetails => html! { <ParentDetails /> },
            Page::InviteParent => html! { <InviteParent /> },
            Page::ParentDashboard => html! { <ParentDashboard /> },
            Page::NotFound => html! {
                <div class="page">
                    <h1>{"Page not found"}</h1>
                    <a href="/admin">{"Back to the dashboard"}</a>
                </div>
            },
        };

        html! {
            <div class="app">
                <nav class="sidebar">
                    <span class="brand">{"Goddard Portal"}</span>
                    { for Page::NAV.iter().map(|(page, href, label)| {
                        let active = *page == self.page;
                        html! {
                            <a href={*href} class={if active { "nav-link active" } else { "nav-link" }}>
                                { *label }
                            </a>
                        }
                    }) }
                </nav>
                <main>{ content }</main>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn routes_known_paths() {
        assert_eq!(Page::from_path("/"), Page::Dashboard);
        assert_eq!(Page::from_path("/admin/"), Page::Dashboard);
        assert_eq!(Page::from_path("/parent-details"), Page::ParentDetails);
        assert_eq!(Page::from_path("/parent-dashboard"), Page::ParentDashboard);
        assert_eq!(Page::from_path("/nope"), Page::NotFound);
    }
}
