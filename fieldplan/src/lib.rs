//! Fieldplan is the platform independent core of a small map editing wireframe: a map with a
//! movable anchor marker, an editable route with labelled waypoints, and a slide-out navigation
//! drawer.
//!
//! # Main components
//!
//! * [`MapInteraction`] owns the interaction [mode](InteractionMode), the anchor point and the
//!   [`Route`]. It turns map clicks into state changes and pushes the visual consequences to a
//!   [`MapSurface`], which is implemented by the rendering backend. Tests use a recording
//!   surface, the application uses a galileo map.
//! * [`DrawerController`](drawer::DrawerController) owns the visibility of the navigation drawer
//!   and mirrors it into a [`DrawerHost`](drawer::DrawerHost). Wiring a drawer yields a
//!   [`DrawerBinding`](drawer::DrawerBinding), which is inert when the host elements are missing.
//!
//! The two controllers never talk to each other.
//!
//! Supporting modules provide [geographic bounds](GeoBounds), [viewport fitting](viewport),
//! the [layer selection model](layers), [tile url templates](tiles) and the
//! [configuration](config).
//!
//! ```
//! use fieldplan::config::MapSettings;
//! use fieldplan::{InteractionMode, MapInteraction, NoopSurface};
//! use fieldplan::galileo_types::latlon;
//!
//! let mut interaction = MapInteraction::new(&MapSettings::default(), NoopSurface);
//! interaction.set_mode(InteractionMode::EditRoute);
//! interaction.on_map_click(latlon!(-6.75, -79.83));
//!
//! assert_eq!(interaction.route().len(), 4);
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
mod controller;
pub mod drawer;
pub mod error;
mod geo;
pub mod layers;
mod mode;
mod route;
mod surface;
pub mod tiles;
pub mod viewport;

pub use controller::{ClickOutcome, MapInteraction};
pub use error::FieldplanError;
pub use geo::GeoBounds;
pub use mode::InteractionMode;
pub use route::{waypoint_label, Route, Waypoint};
pub use surface::{MapSurface, NoopSurface};

// Reexport galileo_types
pub use galileo_types;
