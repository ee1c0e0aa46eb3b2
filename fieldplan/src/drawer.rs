//! Slide-out navigation drawer.
//!
//! The drawer has a single piece of state: whether it is open. The state is mirrored into a
//! [`DrawerHost`], which in a web page sets the `drawer-open` class on the body and the
//! `aria-hidden` attribute on the drawer element.
//!
//! A drawer is wired once at startup with [`DrawerBinding::wire`]. If the host elements are not
//! available, the binding is [`DrawerBinding::Inert`] and ignores every trigger.
//!
//! ```
//! use fieldplan::drawer::{DrawerBinding, DrawerHost, DrawerTrigger, Key};
//!
//! #[derive(Default)]
//! struct Panel {
//!     visible: bool,
//! }
//!
//! impl DrawerHost for Panel {
//!     fn apply(&mut self, open: bool) {
//!         self.visible = open;
//!     }
//! }
//!
//! let mut drawer = DrawerBinding::wire(Some(Panel::default()));
//! drawer.handle(DrawerTrigger::ButtonClick);
//! assert!(drawer.is_open());
//!
//! drawer.handle(DrawerTrigger::GlobalKey(Key::Escape));
//! assert!(!drawer.is_open());
//! ```

/// Receives the drawer visibility.
pub trait DrawerHost {
    /// Shows the drawer if `open` is true and hides it otherwise.
    fn apply(&mut self, open: bool);
}

/// Keys the drawer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// Space bar.
    Space,
    /// `Escape`.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// User action that may change the drawer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerTrigger {
    /// The drawer button was clicked.
    ButtonClick,
    /// A key was pressed while the drawer button had focus.
    ButtonKey(Key),
    /// The backdrop behind the open drawer was clicked.
    BackdropClick,
    /// A key was pressed anywhere in the page.
    GlobalKey(Key),
}

/// How the event that carried a trigger should be treated by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriggerResponse {
    /// The trigger changed (or re-applied) the drawer state.
    pub handled: bool,
    /// The browser default action (e.g. scrolling on space) must be suppressed.
    pub prevent_default: bool,
}

impl TriggerResponse {
    const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
    };

    const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
    };
}

/// Drawer state mirrored into a host.
#[derive(Debug)]
pub struct DrawerController<H> {
    open: bool,
    host: H,
}

impl<H: DrawerHost> DrawerController<H> {
    /// Creates a closed drawer and applies the closed state to the host.
    pub fn new(mut host: H) -> Self {
        host.apply(false);
        Self { open: false, host }
    }

    /// Whether the drawer is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Host the state is mirrored into.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Flips the drawer state.
    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    /// Opens the drawer. Re-applies the state if it is already open.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Closes the drawer. Re-applies the state if it is already closed.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Applies a trigger.
    ///
    /// The button toggles the drawer, by click or by `Enter`/space while focused. The backdrop
    /// and `Escape` only ever close it.
    pub fn handle(&mut self, trigger: DrawerTrigger) -> TriggerResponse {
        match trigger {
            DrawerTrigger::ButtonClick => {
                self.toggle();
                TriggerResponse::HANDLED
            }
            DrawerTrigger::ButtonKey(Key::Enter | Key::Space) => {
                self.toggle();
                TriggerResponse {
                    handled: true,
                    prevent_default: true,
                }
            }
            DrawerTrigger::BackdropClick | DrawerTrigger::GlobalKey(Key::Escape) => {
                self.close();
                TriggerResponse::HANDLED
            }
            DrawerTrigger::ButtonKey(_) | DrawerTrigger::GlobalKey(_) => TriggerResponse::IGNORED,
        }
    }

    fn set_open(&mut self, open: bool) {
        if self.open != open {
            log::debug!("Drawer {}", if open { "opened" } else { "closed" });
        }

        self.open = open;
        self.host.apply(open);
    }
}

/// Result of wiring a drawer to its host.
#[derive(Debug)]
pub enum DrawerBinding<H> {
    /// All host elements were found, the drawer reacts to triggers.
    Wired(DrawerController<H>),
    /// Some host element was missing, the drawer stays closed and ignores every trigger.
    Inert,
}

impl<H: DrawerHost> DrawerBinding<H> {
    /// Wires the drawer to `host`, or creates an inert binding if there is no host.
    pub fn wire(host: Option<H>) -> Self {
        match host {
            Some(host) => Self::Wired(DrawerController::new(host)),
            None => {
                log::info!("Drawer elements are not available, drawer is disabled");
                Self::Inert
            }
        }
    }

    /// Whether the drawer reacts to triggers.
    pub fn is_wired(&self) -> bool {
        matches!(self, Self::Wired(_))
    }

    /// Whether the drawer is open. An inert drawer is always closed.
    pub fn is_open(&self) -> bool {
        match self {
            Self::Wired(controller) => controller.is_open(),
            Self::Inert => false,
        }
    }

    /// Applies a trigger to a wired drawer.
    pub fn handle(&mut self, trigger: DrawerTrigger) -> TriggerResponse {
        match self {
            Self::Wired(controller) => controller.handle(trigger),
            Self::Inert => TriggerResponse::IGNORED,
        }
    }

    /// Controller of a wired drawer.
    pub fn controller_mut(&mut self) -> Option<&mut DrawerController<H>> {
        match self {
            Self::Wired(controller) => Some(controller),
            Self::Inert => None,
        }
    }
}
