//! Temporary notifications at the bottom of the screen.

use common::table::Notifier;
use gloo_console::error;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const TOAST_MILLIS: u32 = 3000;

/// Injects a styled `div` into the page and removes it after a few seconds.
pub fn show_toast(message: &str, is_error: bool) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    let background = if is_error { "rgba(198, 40, 40, 0.95)" } else { "rgba(0, 0, 0, 0.8)" };
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", background),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
        ("font-family", "Arial, sans-serif"),
    ] {
        style.set_property(property, value).ok();
    }

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Routes mutation outcomes to toasts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        show_toast(message, false);
    }

    fn error(&self, message: &str) {
        error!(message.to_string());
        show_toast(message, true);
    }
}
