pub mod admin_dashboard;
pub mod application_status;
pub mod forms_repository;
pub mod invite_parent;
pub mod parent_dashboard;
pub mod parent_details;
pub mod section;
pub mod widgets;

/// Query string of the current page, `?` included; empty outside a browser.
pub fn location_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}
