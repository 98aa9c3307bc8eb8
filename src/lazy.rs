//! Deferred cover images.
//!
//! Images are rendered as `<img class="lazy" data-src="...">` and only get a
//! real `src` once they scroll into view.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use crate::error::{ClientError, Result};

pub const LAZY_CLASS: &str = "lazy";
pub const DEFERRED_SRC_ATTR: &str = "data-src";

pub trait LazyTarget {
    fn deferred_src(&self) -> Option<String>;
    fn set_src(&self, src: &str);
    fn clear_marker(&self);
}

impl LazyTarget for Element {
    fn deferred_src(&self) -> Option<String> {
        self.get_attribute(DEFERRED_SRC_ATTR)
    }

    fn set_src(&self, src: &str) {
        if let Err(e) = self.set_attribute("src", src) {
            log::warn!("cannot set image src {}: {:?}", src, e);
        }
    }

    fn clear_marker(&self) {
        if let Err(e) = self.class_list().remove_1(LAZY_CLASS) {
            log::warn!("cannot clear lazy marker: {:?}", e);
        }
    }
}

/// Swap in the deferred source if the target is on screen. Returns whether
/// the target is done and should stop being watched.
pub fn reveal<T: LazyTarget>(target: &T, intersecting: bool) -> bool {
    if !intersecting {
        return false;
    }
    if let Some(src) = target.deferred_src() {
        target.set_src(&src);
    }
    target.clear_marker();
    true
}

pub struct LazyImageLoader {
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl LazyImageLoader {
    pub fn new() -> Result<Self> {
        let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if reveal(&target, entry.is_intersecting()) {
                        observer.unobserve(&target);
                    }
                }
            },
        );
        let observer = IntersectionObserver::new(on_intersect.as_ref().unchecked_ref())
            .map_err(|e| ClientError::Platform(format!("IntersectionObserver unavailable: {:?}", e)))?;
        Ok(Self {
            observer,
            _on_intersect: on_intersect,
        })
    }

    /// Watch every image under `root` still carrying the lazy marker.
    /// Returns how many were found.
    pub fn scan(&self, root: &Element) -> Result<u32> {
        let selector = format!("img.{}", LAZY_CLASS);
        let images = root
            .query_selector_all(&selector)
            .map_err(|e| ClientError::Platform(format!("bad selector {}: {:?}", selector, e)))?;
        for i in 0..images.length() {
            if let Some(image) = images.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                self.observer.observe(&image);
            }
        }
        Ok(images.length())
    }
}

impl Drop for LazyImageLoader {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
