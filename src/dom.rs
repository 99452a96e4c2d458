//! Browser document implementation of [`View`] and event wiring

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentReadyState, Element, Event, EventTarget, HtmlAnchorElement, Window};

use crate::controller::NavController;
use crate::error::{NavError, NavResult};
use crate::mount::{Detach, Mounted};
use crate::selector::Selector;
use crate::view::{SidebarTrigger, View};

/// Shared handle used by event listeners and the exported functions
pub type SharedController = Rc<RefCell<NavController<DomView>>>;

/// The page's mounted controller and its listeners
pub type DomMount = Mounted<SharedController, DomListener>;

/// The live document of the current window
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub fn new() -> NavResult<Self> {
        let window = web_sys::window().ok_or(NavError::NoWindow)?;
        let document = window.document().ok_or(NavError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl View for DomView {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        let list = match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => list,
            Err(err) => {
                warn!("querySelectorAll('{}') failed: {:?}", selector, err);
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn id(&self, node: &Element) -> String {
        node.id()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn href(&self, node: &Element) -> Option<String> {
        match node.dyn_ref::<HtmlAnchorElement>() {
            Some(anchor) => Some(anchor.href()),
            None => node.get_attribute("href"),
        }
    }

    fn has_class(&self, node: &Element, token: &str) -> bool {
        node.class_list().contains(token)
    }

    fn add_class(&mut self, node: &Element, token: &str) {
        if let Err(err) = node.class_list().add_1(token) {
            warn!("Failed to add class '{}' to #{}: {:?}", token, node.id(), err);
        }
    }

    fn remove_class(&mut self, node: &Element, token: &str) {
        if let Err(err) = node.class_list().remove_1(token) {
            warn!("Failed to remove class '{}' from #{}: {:?}", token, node.id(), err);
        }
    }

    fn current_path(&self) -> Option<String> {
        match self.window.location().pathname() {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Could not read location.pathname: {:?}", err);
                None
            }
        }
    }
}

/// An event listener registered by [`wire_triggers`] or [`schedule_highlight`]
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn register(
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> NavResult<Self> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }
}

impl Detach for DomListener {
    fn detach(&self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(self.event, callback) {
            warn!("Failed to remove '{}' listener: {:?}", self.event, err);
        }
    }
}

// The callback is invalid once dropped, so it must never stay registered
impl Drop for DomListener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Register click listeners on both sidebar triggers
pub fn wire_triggers(controller: &SharedController) -> NavResult<Vec<DomListener>> {
    let mut listeners = Vec::new();
    for trigger in [SidebarTrigger::Main, SidebarTrigger::Secondary] {
        let target = controller
            .try_borrow()
            .map_err(|_| NavError::Busy)?
            .trigger(trigger)
            .clone();

        let handle = Rc::clone(controller);
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            match handle.try_borrow_mut() {
                Ok(mut controller) => {
                    controller.toggle_sidebar(trigger);
                }
                Err(_) => error!("Sidebar toggle ignored: controller is busy"),
            }
        });

        listeners.push(DomListener::register(target.into(), "click", callback)?);
    }
    Ok(listeners)
}

/// Run the active-link pass once the document structure is parsed.
/// Returns the pending listener when the document is still loading.
pub fn schedule_highlight(controller: &SharedController) -> NavResult<Option<DomListener>> {
    let document = controller
        .try_borrow()
        .map_err(|_| NavError::Busy)?
        .view()
        .document()
        .clone();

    if document.ready_state() != DocumentReadyState::Loading {
        let mut controller = controller.try_borrow_mut().map_err(|_| NavError::Busy)?;
        controller.highlight_active_link();
        return Ok(None);
    }

    let handle = Rc::clone(controller);
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        match handle.try_borrow_mut() {
            Ok(mut controller) => {
                controller.highlight_active_link();
            }
            Err(_) => error!("Active link highlight skipped: controller is busy"),
        }
    });

    let listener = DomListener::register(document.into(), "DOMContentLoaded", callback)?;
    Ok(Some(listener))
}
