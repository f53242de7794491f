//! Small view helpers shared by the admin pages.

use common::requests::{ExportFormat, ExportQuery};
use common::table::{FilterCriteria, PageBounds};
use yew::prelude::*;

use crate::api::API_BASE;

/// "Showing 1 to 10 of 23 results" with previous / next buttons.
pub fn pager(bounds: PageBounds, on_previous: Callback<MouseEvent>, on_next: Callback<MouseEvent>) -> Html {
    html! {
        <div class="pager">
            <span class="pager-summary">{ bounds.summary() }</span>
            <div class="pager-buttons">
                <button class="icon-btn" disabled={!bounds.has_previous()} onclick={on_previous}>
                    <i class="material-icons">{"chevron_left"}</i>
                </button>
                <span class="pager-page">
                    { format!("Page {} of {}", bounds.current_page, bounds.total_pages.max(1)) }
                </span>
                <button class="icon-btn" disabled={!bounds.has_next()} onclick={on_next}>
                    <i class="material-icons">{"chevron_right"}</i>
                </button>
            </div>
        </div>
    }
}

/// Renders a toolbar button with a Material icon and a label.
pub fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>, disabled: bool) -> Html {
    html! {
        <button class="icon-btn" onclick={on_click} disabled={disabled}>
            <i class="material-icons">{icon_name}</i>
            <span class="icon-label">{label}</span>
        </button>
    }
}

/// Search box feeding `on_input` with the raw text.
pub fn search_box(placeholder: &str, value: String, on_input: Callback<String>) -> Html {
    html! {
        <input
            class="search"
            type="search"
            placeholder={placeholder.to_string()}
            value={value}
            oninput={Callback::from(move |e: InputEvent| {
                on_input.emit(e.target_unchecked_into::<web_sys::HtmlInputElement>().value())
            })}
        />
    }
}

/// Dropdown over `(value, label)` pairs.
pub fn select_box(options: Vec<(String, String)>, selected: String, on_change: Callback<String>) -> Html {
    html! {
        <select onchange={Callback::from(move |e: Event| {
            on_change.emit(e.target_unchecked_into::<web_sys::HtmlSelectElement>().value())
        })}>
            { for options.into_iter().map(|(value, label)| {
                let is_selected = value == selected;
                html! { <option value={value} selected={is_selected}>{label}</option> }
            }) }
        </select>
    }
}

/// `All` followed by the given status names.
pub fn status_options(names: impl IntoIterator<Item = &'static str>) -> Vec<(String, String)> {
    std::iter::once("All")
        .chain(names)
        .map(|name| (name.to_string(), name.to_string()))
        .collect()
}

/// One summary card of a statistics row.
pub fn stat_card(label: &str, value: usize) -> Html {
    html! {
        <div class="stat-card">
            <span class="stat-value">{ value.to_string() }</span>
            <span class="stat-label">{ label }</span>
        </div>
    }
}

/// CSV and Excel download links carrying the table's current filters.
pub fn export_links(kind: &str, criteria: &FilterCriteria) -> Html {
    let link = |format: ExportFormat| {
        let query = ExportQuery {
            format,
            search: criteria.search.clone(),
            status: criteria.status.as_str().to_string(),
            classroom: criteria.selector("classroom").unwrap_or_default().to_string(),
        };
        format!("{}/{}/export?{}", API_BASE, kind, query.to_query_string())
    };
    html! {
        <div class="export-links">
            <a class="icon-btn" href={link(ExportFormat::Csv)} download="">
                <i class="material-icons">{"download"}</i>
                <span class="icon-label">{"CSV"}</span>
            </a>
            <a class="icon-btn" href={link(ExportFormat::Xlsx)} download="">
                <i class="material-icons">{"grid_on"}</i>
                <span class="icon-label">{"Excel"}</span>
            </a>
        </div>
    }
}
