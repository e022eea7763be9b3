// Browser helpers shared by the components. Console output is compiled out off wasm32 so
// headless tests stay quiet.

use crate::model::{AnchorRect, Viewport};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current window size, or a phone-sized default when it cannot be read.
pub fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::new(390.0, 844.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(390.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(844.0);
    Viewport::new(width, height)
}

/// Screen rectangle of a rendered element.
pub fn element_rect(el: &web_sys::Element) -> AnchorRect {
    let r = el.get_bounding_client_rect();
    AnchorRect::new(r.x(), r.y(), r.width(), r.height())
}
