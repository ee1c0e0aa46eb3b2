use galileo_types::geo::impls::GeoPoint2d;

use crate::geo::GeoBounds;
use crate::mode::InteractionMode;
use crate::route::Waypoint;

/// Rendering capabilities that [`MapInteraction`](crate::MapInteraction) needs from a map
/// backend.
///
/// Every call is expected to take visible effect before it returns (or on the next frame for
/// immediate mode UIs). The interaction never reads anything back from the surface.
pub trait MapSurface {
    /// Places the anchor marker at the given position, creating it if needed.
    fn place_anchor(&mut self, position: GeoPoint2d);
    /// Opens the info popup bound to the anchor marker.
    fn open_anchor_popup(&mut self);
    /// Replaces the route polyline geometry with the given points.
    fn set_route_line(&mut self, points: &[GeoPoint2d]);
    /// Removes all waypoint markers.
    fn clear_waypoints(&mut self);
    /// Adds a waypoint marker with its label.
    fn add_waypoint(&mut self, waypoint: &Waypoint);
    /// Moves the viewport so that the given bounds are visible.
    fn fit_bounds(&mut self, bounds: GeoBounds);
    /// Updates the styling of the mode toggle controls for the given mode.
    fn show_mode(&mut self, mode: InteractionMode);
}

/// Surface that draws nothing.
///
/// Useful for driving the interaction logic without any rendering, e.g. in documentation or
/// headless checks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSurface;

impl MapSurface for NoopSurface {
    fn place_anchor(&mut self, _position: GeoPoint2d) {}
    fn open_anchor_popup(&mut self) {}
    fn set_route_line(&mut self, _points: &[GeoPoint2d]) {}
    fn clear_waypoints(&mut self) {}
    fn add_waypoint(&mut self, _waypoint: &Waypoint) {}
    fn fit_bounds(&mut self, _bounds: GeoBounds) {}
    fn show_mode(&mut self, _mode: InteractionMode) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Keeps the last state pushed by the interaction, like a renderer would.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct RecordingSurface {
        pub anchor: Option<GeoPoint2d>,
        pub popup_opened: usize,
        pub route_line: Vec<GeoPoint2d>,
        pub route_line_updates: usize,
        pub waypoints: Vec<(String, GeoPoint2d)>,
        pub fitted: Option<GeoBounds>,
        pub active_toggles: Vec<InteractionMode>,
    }

    impl RecordingSurface {
        pub fn waypoint_labels(&self) -> Vec<&str> {
            self.waypoints
                .iter()
                .map(|(label, _)| label.as_str())
                .collect()
        }
    }

    impl MapSurface for RecordingSurface {
        fn place_anchor(&mut self, position: GeoPoint2d) {
            self.anchor = Some(position);
        }

        fn open_anchor_popup(&mut self) {
            self.popup_opened += 1;
        }

        fn set_route_line(&mut self, points: &[GeoPoint2d]) {
            self.route_line = points.to_vec();
            self.route_line_updates += 1;
        }

        fn clear_waypoints(&mut self) {
            self.waypoints.clear();
        }

        fn add_waypoint(&mut self, waypoint: &Waypoint) {
            self.waypoints.push((waypoint.label(), waypoint.position));
        }

        fn fit_bounds(&mut self, bounds: GeoBounds) {
            self.fitted = Some(bounds);
        }

        fn show_mode(&mut self, mode: InteractionMode) {
            self.active_toggles = InteractionMode::TOGGLES
                .into_iter()
                .filter(|control| mode.is_active(*control))
                .collect();
        }
    }
}
