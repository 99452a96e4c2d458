//! WASM bindings for the navigation controller
//!
//! Server-rendered templates call these globals from inline `onclick`
//! handlers, so the exported names keep their camelCase JavaScript spelling.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, LevelFilter};
use wasm_bindgen::prelude::*;

use crate::config::NavConfig;
use crate::controller::NavController;
use crate::dom::{self, DomMount, DomView};
use crate::error::{NavError, NavResult};
use crate::mount::Mounted;
use crate::view::SidebarTrigger;

// Use wee_alloc for smaller WASM binary
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

thread_local! {
    static MOUNTED: RefCell<Option<DomMount>> = const { RefCell::new(None) };
}

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    crate::logging::init(LevelFilter::Info);
}

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Attach to the page's sidebar markup
///
/// Takes an optional JSON configuration; missing fields use the defaults.
/// Mounting again replaces the previous controller and removes its listeners.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => NavConfig::from_json(&json)?,
        None => NavConfig::default(),
    };
    log::set_max_level(config.level_filter()?);

    let controller = Rc::new(RefCell::new(NavController::attach(DomView::new()?, config)?));
    let mut listeners = dom::wire_triggers(&controller)?;
    listeners.extend(dom::schedule_highlight(&controller)?);

    // Replacing the mount unregisters the previous listeners
    let next = Mounted::new(controller, listeners);
    MOUNTED.with(|slot| Mounted::replace(&mut slot.borrow_mut(), next));
    info!("Navigation chrome mounted");
    Ok(())
}

fn with_controller<T>(f: impl FnOnce(&mut NavController<DomView>) -> NavResult<T>) -> NavResult<T> {
    let controller = MOUNTED
        .with(|slot| slot.borrow().as_ref().map(|mounted| Rc::clone(mounted.controller())))
        .ok_or(NavError::NotMounted)?;
    let mut controller = controller.try_borrow_mut().map_err(|_| NavError::Busy)?;
    f(&mut controller)
}

/// Toggle the sidebar. `secondary` selects the in-panel toggle and its icon.
#[wasm_bindgen(js_name = "toggleSidebar")]
pub fn toggle_sidebar(secondary: bool) -> Result<bool, JsValue> {
    let trigger = if secondary {
        SidebarTrigger::Secondary
    } else {
        SidebarTrigger::Main
    };
    Ok(with_controller(|controller| Ok(controller.toggle_sidebar(trigger)))?)
}

#[wasm_bindgen(js_name = "toggleDropdown")]
pub fn toggle_dropdown(menu_id: &str, parent_id: Option<String>) -> Result<bool, JsValue> {
    Ok(with_controller(|controller| {
        controller.toggle_dropdown(menu_id, parent_id.as_deref())
    })?)
}

#[wasm_bindgen(js_name = "closeAllDropdownsExcept")]
pub fn close_all_dropdowns_except(menu_id: &str) -> Result<usize, JsValue> {
    Ok(with_controller(|controller| {
        Ok(controller.close_all_dropdowns_except(menu_id))
    })?)
}

/// Re-run the active link pass, returning the highlighted links as JSON
#[wasm_bindgen(js_name = "highlightActiveLink")]
pub fn highlight_active_link() -> Result<String, JsValue> {
    let active = with_controller(|controller| Ok(controller.highlight_active_link()))?;
    Ok(serde_json::to_string(&active).map_err(NavError::from)?)
}
