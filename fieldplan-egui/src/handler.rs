use std::sync::Arc;

use fieldplan::{ClickOutcome, MapInteraction};
use galileo::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use galileo::Map;
use parking_lot::RwLock;

use crate::surface::GalileoSurface;

/// Interaction state shared between the map event handler and the application UI.
pub type SharedInteraction = Arc<RwLock<MapInteraction<GalileoSurface>>>;

/// Creates a handler passing left clicks on the map to the interaction.
///
/// Clicks that change nothing are propagated, so the map keeps its default behaviour.
pub fn click_handler(interaction: SharedInteraction) -> impl UserEventHandler {
    move |ev: &UserEvent, map: &mut Map| {
        let UserEvent::Click(MouseButton::Left, event) = ev else {
            return EventPropagation::Propagate;
        };

        let Some(position) = map.view().screen_to_map_geo(event.screen_pointer_position) else {
            log::trace!("Click outside of the map projection ignored");
            return EventPropagation::Propagate;
        };

        let outcome = interaction.write().on_map_click(position);
        let propagation = click_propagation(outcome);
        if matches!(propagation, EventPropagation::Stop) {
            log::trace!("Map click applied: {outcome:?}");
            map.redraw();
        }

        propagation
    }
}

/// Ignored clicks go on to the map controls, applied ones stop there.
fn click_propagation(outcome: ClickOutcome) -> EventPropagation {
    match outcome {
        ClickOutcome::Ignored => EventPropagation::Propagate,
        ClickOutcome::AnchorMoved | ClickOutcome::WaypointAdded(_) => EventPropagation::Stop,
    }
}
