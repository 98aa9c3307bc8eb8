pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod discussion;
pub mod dom;
pub mod error;
pub mod lazy;
pub mod loader;
pub mod logging;
pub mod pages;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
mod testing;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::AppHandle;

use crate::app::{App, AppProps};
use crate::config::{Config, ROOT_ID};
use crate::error::{ClientError, Result};
use crate::pages::Page;
use crate::storage::TokenStore;

thread_local! {
    static MOUNTED: RefCell<Option<AppHandle<App>>> = RefCell::new(None);
}

/// Render the site into `root`. The returned handle tears it down again.
pub fn mount(root: Element, props: AppProps) -> AppHandle<App> {
    yew::Renderer::<App>::with_root_and_props(root, props).render()
}

fn boot() -> Result<()> {
    let config = Config::from_env();
    let path = dom::current_path()?;
    let page = Page::from_path(&path);
    let session = TokenStore::new(&config.token_key).session();
    log::info!(
        "starting on {} (page: {}, signed in: {})",
        path,
        page.map_or("none", |p| p.name()),
        session.is_authenticated()
    );

    let root = dom::document()?
        .get_element_by_id(ROOT_ID)
        .ok_or_else(|| ClientError::Platform(format!("no #{} element in the page", ROOT_ID)))?;

    let handle = mount(
        root,
        AppProps {
            config: Rc::new(config),
            session: Rc::new(session),
            page,
        },
    );
    let previous = MOUNTED.with(|mounted| mounted.borrow_mut().replace(handle));
    if let Some(previous) = previous {
        previous.destroy();
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    logging::init();
    if let Err(e) = boot() {
        log::error!("booksite failed to start: {}", e);
    }
}

/// Unmount the site and release its listeners and observers.
#[wasm_bindgen]
pub fn teardown() {
    let mounted = MOUNTED.with(|mounted| mounted.borrow_mut().take());
    if let Some(handle) = mounted {
        handle.destroy();
    }
}
