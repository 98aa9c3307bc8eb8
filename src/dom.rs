use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::error::{ClientError, Result};

pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| ClientError::Platform("No global `window` object found".to_string()))
}

pub fn document() -> Result<web_sys::Document> {
    window()?
        .document()
        .ok_or_else(|| ClientError::Platform("window has no document".to_string()))
}

/// Path component of the current location, e.g. `/site/books.html`.
pub fn current_path() -> Result<String> {
    window()?
        .location()
        .pathname()
        .map_err(|e| ClientError::Platform(format!("cannot read location: {:?}", e)))
}

pub fn alert(message: &str) {
    let shown = window().and_then(|w| {
        w.alert_with_message(message)
            .map_err(|e| ClientError::Platform(format!("{:?}", e)))
    });
    if let Err(e) = shown {
        log::warn!("alert \"{}\" not shown: {}", message, e);
    }
}

pub fn navigate(href: &str) {
    let moved = window().and_then(|w| {
        w.location()
            .set_href(href)
            .map_err(|e| ClientError::Platform(format!("{:?}", e)))
    });
    if let Err(e) = moved {
        log::error!("navigation to {} failed: {}", href, e);
    }
}

/// Full page reload; drops all in-memory state.
pub fn reload() {
    let reloaded = window().and_then(|w| {
        w.location()
            .reload()
            .map_err(|e| ClientError::Platform(format!("{:?}", e)))
    });
    if let Err(e) = reloaded {
        log::error!("page reload failed: {}", e);
    }
}

pub fn smooth_scroll_to(element_id: &str) {
    let Some(target) = document().ok().and_then(|d| d.get_element_by_id(element_id)) else {
        log::debug!("no #{} element to scroll to", element_id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
