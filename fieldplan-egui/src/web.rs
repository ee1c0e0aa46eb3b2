//! Drawer of the host page around the map canvas.
//!
//! The page provides a `btnViews` button, a `drawerBackdrop` element and the `drawer` itself. If
//! any of them is missing the drawer stays inert.

use std::cell::RefCell;
use std::rc::Rc;

use fieldplan::drawer::{DrawerBinding, DrawerHost, DrawerTrigger, Key};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

const OPEN_CLASS: &str = "drawer-open";

/// Drawer state mirrored into the page: a class on the body and `aria-hidden` on the drawer.
pub struct DomDrawer {
    body: HtmlElement,
    drawer: Element,
}

impl DrawerHost for DomDrawer {
    fn apply(&mut self, open: bool) {
        let classes = self.body.class_list();
        let result = if open {
            classes.add_1(OPEN_CLASS)
        } else {
            classes.remove_1(OPEN_CLASS)
        }
        .and_then(|_| {
            self.drawer
                .set_attribute("aria-hidden", if open { "false" } else { "true" })
        });

        if let Err(err) = result {
            log::warn!("Failed to update drawer elements: {err:?}");
        }
    }
}

struct DrawerElements {
    button: Element,
    backdrop: Element,
    drawer: Element,
    body: HtmlElement,
}

impl DrawerElements {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            button: document.get_element_by_id("btnViews")?,
            backdrop: document.get_element_by_id("drawerBackdrop")?,
            drawer: document.get_element_by_id("drawer")?,
            body: document.body()?,
        })
    }
}

/// Looks up the drawer elements and attaches the event listeners.
///
/// Must be called once per page load. Listeners live as long as the page.
pub fn wire_drawer() -> Result<(), JsValue> {
    let document = web_sys::window().and_then(|window| window.document());
    let elements = document.as_ref().and_then(DrawerElements::find);

    let binding = DrawerBinding::wire(elements.as_ref().map(|elements| DomDrawer {
        body: elements.body.clone(),
        drawer: elements.drawer.clone(),
    }));
    let (Some(document), Some(elements)) = (document, elements) else {
        return Ok(());
    };

    let binding = Rc::new(RefCell::new(binding));

    listen(&elements.button, "click", {
        let binding = binding.clone();
        move |_: Event| {
            binding.borrow_mut().handle(DrawerTrigger::ButtonClick);
        }
    })?;

    listen(&elements.button, "keydown", {
        let binding = binding.clone();
        move |event: KeyboardEvent| {
            let key = Key::from_dom(&event.key());
            if binding
                .borrow_mut()
                .handle(DrawerTrigger::ButtonKey(key))
                .prevent_default
            {
                event.prevent_default();
            }
        }
    })?;

    listen(&elements.backdrop, "click", {
        let binding = binding.clone();
        move |_: Event| {
            binding.borrow_mut().handle(DrawerTrigger::BackdropClick);
        }
    })?;

    listen(&document, "keydown", move |event: KeyboardEvent| {
        let key = Key::from_dom(&event.key());
        binding.borrow_mut().handle(DrawerTrigger::GlobalKey(key));
    })?;

    log::info!("Page drawer wired");
    Ok(())
}

fn listen<E>(
    target: &EventTarget,
    event_type: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
