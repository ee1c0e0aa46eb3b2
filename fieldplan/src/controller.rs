use galileo_types::geo::impls::GeoPoint2d;

use crate::config::MapSettings;
use crate::geo::GeoBounds;
use crate::mode::InteractionMode;
use crate::route::Route;
use crate::surface::MapSurface;

/// What a map click changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The anchor was moved to the clicked position.
    AnchorMoved,
    /// A waypoint with the given index was appended to the route.
    WaypointAdded(usize),
    /// No mode was active, nothing changed.
    Ignored,
}

/// Owns the map editing state and keeps a [`MapSurface`] in sync with it.
///
/// The state consists of the current [`InteractionMode`], the anchor point and the [`Route`].
/// Clicks are interpreted according to the mode; the mode itself only changes through
/// [`MapInteraction::set_mode`].
pub struct MapInteraction<S> {
    mode: InteractionMode,
    anchor: GeoPoint2d,
    route: Route,
    fit_padding: f64,
    surface: S,
}

impl<S: MapSurface> MapInteraction<S> {
    /// Creates the interaction with the default anchor and route from the settings and draws the
    /// initial content on the surface.
    pub fn new(settings: &MapSettings, surface: S) -> Self {
        Self::with_content(
            settings.center,
            settings.default_route(),
            settings.fit_padding,
            surface,
        )
    }

    /// Creates the interaction with the given content and draws it on the surface.
    ///
    /// The viewport is fitted to the content and no mode is active.
    pub fn with_content(anchor: GeoPoint2d, route: Route, fit_padding: f64, surface: S) -> Self {
        let mut interaction = Self {
            mode: InteractionMode::None,
            anchor,
            route,
            fit_padding,
            surface,
        };

        interaction.surface.place_anchor(interaction.anchor);
        interaction
            .surface
            .set_route_line(interaction.route.points());
        interaction.redraw_waypoint_markers();
        interaction.fit_to_content();
        interaction.surface.show_mode(interaction.mode);

        log::debug!(
            "Map interaction initialized with {} route points",
            interaction.route.len()
        );

        interaction
    }

    /// Currently active mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Current anchor position.
    pub fn anchor(&self) -> GeoPoint2d {
        self.anchor
    }

    /// Current route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Surface the interaction draws on.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to let the backend consume pending updates.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Switches to `next`, or back to [`InteractionMode::None`] if `next` is already active.
    pub fn set_mode(&mut self, next: InteractionMode) {
        let previous = self.mode;
        self.mode = previous.toggle(next);
        self.surface.show_mode(self.mode);

        log::debug!("Interaction mode: {previous} -> {}", self.mode);
    }

    /// Applies a click at `point` according to the current mode.
    pub fn on_map_click(&mut self, point: GeoPoint2d) -> ClickOutcome {
        log::trace!("Map click at {point:?} in mode {}", self.mode);

        match self.mode {
            InteractionMode::MoveAnchor => {
                self.anchor = point;
                self.surface.place_anchor(point);
                self.surface.open_anchor_popup();
                ClickOutcome::AnchorMoved
            }
            InteractionMode::EditRoute => {
                let index = self.route.push(point);
                self.surface.set_route_line(self.route.points());
                self.redraw_waypoint_markers();
                ClickOutcome::WaypointAdded(index)
            }
            InteractionMode::None => ClickOutcome::Ignored,
        }
    }

    /// Redraws the route and its markers from the current state and fits the viewport to the
    /// anchor and the route.
    ///
    /// Calling it repeatedly gives the same result as calling it once.
    pub fn recalculate(&mut self) {
        self.surface.set_route_line(self.route.points());
        self.redraw_waypoint_markers();
        self.fit_to_content();
    }

    /// Bounds of the anchor and all route points, padded by the configured fraction.
    pub fn content_bounds(&self) -> GeoBounds {
        self.route
            .points()
            .iter()
            .fold(GeoBounds::from_point(&self.anchor), |bounds, point| {
                bounds.extend(point)
            })
            .pad(self.fit_padding)
    }

    fn fit_to_content(&mut self) {
        let bounds = self.content_bounds();
        self.surface.fit_bounds(bounds);
    }

    fn redraw_waypoint_markers(&mut self) {
        self.surface.clear_waypoints();
        for waypoint in self.route.waypoints() {
            self.surface.add_waypoint(&waypoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use galileo_types::geo::GeoPoint;
    use galileo_types::latlon;

    use super::*;
    use crate::surface::recording::RecordingSurface;

    fn interaction() -> MapInteraction<RecordingSurface> {
        MapInteraction::new(&MapSettings::default(), RecordingSurface::default())
    }

    #[test]
    fn initial_state_is_drawn() {
        let interaction = interaction();
        let surface = interaction.surface();

        assert_eq!(interaction.mode(), InteractionMode::None);
        assert_eq!(surface.anchor, Some(latlon!(-6.7714, -79.8409)));
        assert_eq!(surface.route_line, interaction.route().points());
        assert_eq!(surface.waypoint_labels(), ["WP-01", "WP-02", "WP-03"]);
        assert_eq!(surface.fitted, Some(interaction.content_bounds()));
        assert!(surface.active_toggles.is_empty());
        assert_eq!(surface.popup_opened, 0);
    }

    #[test]
    fn initial_fit_is_padded_content() {
        let interaction = interaction();
        let bounds = interaction
            .surface()
            .fitted
            .expect("viewport fitted on start");

        // Anchor and route span 0.02 degrees in latitude and 0.035 in longitude.
        assert_relative_eq!(bounds.south(), -6.7714 - 0.005, epsilon = 1e-9);
        assert_relative_eq!(bounds.north(), -6.7514 + 0.005, epsilon = 1e-9);
        assert_relative_eq!(bounds.west(), -79.8609 - 0.00875, epsilon = 1e-9);
        assert_relative_eq!(bounds.east(), -79.8259 + 0.00875, epsilon = 1e-9);
        assert!(bounds.contains(&interaction.anchor()));
    }

    #[test]
    fn set_mode_sequences() {
        let mut interaction = interaction();
        let requests = [
            InteractionMode::EditRoute,
            InteractionMode::MoveAnchor,
            InteractionMode::MoveAnchor,
            InteractionMode::None,
            InteractionMode::EditRoute,
            InteractionMode::EditRoute,
            InteractionMode::EditRoute,
        ];

        for requested in requests {
            let before = interaction.mode();
            interaction.set_mode(requested);

            let expected = if before == requested {
                InteractionMode::None
            } else {
                requested
            };
            assert_eq!(interaction.mode(), expected);
            assert!(interaction.surface().active_toggles.len() <= 1);
        }
    }

    #[test]
    fn pressing_same_toggle_twice_turns_mode_off() {
        let mut interaction = interaction();

        interaction.set_mode(InteractionMode::MoveAnchor);
        assert_eq!(
            interaction.surface().active_toggles,
            [InteractionMode::MoveAnchor]
        );

        interaction.set_mode(InteractionMode::MoveAnchor);
        assert_eq!(interaction.mode(), InteractionMode::None);
        assert!(interaction.surface().active_toggles.is_empty());
    }

    #[test]
    fn switching_toggles_moves_active_styling() {
        let mut interaction = interaction();

        interaction.set_mode(InteractionMode::MoveAnchor);
        interaction.set_mode(InteractionMode::EditRoute);

        assert_eq!(interaction.mode(), InteractionMode::EditRoute);
        assert_eq!(
            interaction.surface().active_toggles,
            [InteractionMode::EditRoute]
        );
    }

    #[test]
    fn click_in_edit_route_appends_waypoint() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::EditRoute);
        let anchor = interaction.anchor();
        let clicked = latlon!(-6.75, -79.83);

        let outcome = interaction.on_map_click(clicked);

        assert_matches!(outcome, ClickOutcome::WaypointAdded(3));
        assert_eq!(interaction.route().len(), 4);
        assert_eq!(interaction.route().last(), clicked);
        assert_eq!(interaction.anchor(), anchor);
        assert_eq!(interaction.mode(), InteractionMode::EditRoute);

        let surface = interaction.surface();
        assert_eq!(surface.route_line.len(), 4);
        assert_eq!(surface.route_line[3], clicked);
        insta::assert_debug_snapshot!(surface.waypoint_labels(), @r###"
        [
            "WP-01",
            "WP-02",
            "WP-03",
            "WP-04",
        ]
        "###);
    }

    #[test]
    fn repeated_clicks_grow_route_by_one() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::EditRoute);

        for i in 0..12 {
            let before = interaction.route().len();
            let point = latlon!(-6.7 - i as f64 * 0.001, -79.8);
            interaction.on_map_click(point);

            assert_eq!(interaction.route().len(), before + 1);
            assert_eq!(interaction.route().last(), point);
        }

        // Same point twice is kept twice.
        interaction.on_map_click(latlon!(0.0, 0.0));
        interaction.on_map_click(latlon!(0.0, 0.0));
        assert_eq!(interaction.route().len(), 17);

        let labels = interaction.surface().waypoint_labels();
        assert_eq!(labels.len(), 17);
        assert_eq!(labels[9], "WP-10");
        assert_eq!(labels[16], "WP-17");
    }

    #[test]
    fn click_in_move_anchor_replaces_anchor() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::MoveAnchor);
        let route = interaction.route().clone();
        let clicked = latlon!(-6.78, -79.85);

        let outcome = interaction.on_map_click(clicked);

        assert_matches!(outcome, ClickOutcome::AnchorMoved);
        assert_eq!(interaction.anchor(), clicked);
        assert_eq!(interaction.route(), &route);
        assert_eq!(interaction.mode(), InteractionMode::MoveAnchor);
        assert_eq!(interaction.surface().anchor, Some(clicked));
        assert_eq!(interaction.surface().popup_opened, 1);

        interaction.on_map_click(latlon!(-6.79, -79.86));
        assert_eq!(interaction.anchor(), latlon!(-6.79, -79.86));
        assert_eq!(interaction.surface().popup_opened, 2);
    }

    #[test]
    fn click_without_mode_changes_nothing() {
        let mut interaction = interaction();
        let anchor = interaction.anchor();
        let route = interaction.route().clone();
        let surface = interaction.surface().clone();

        let outcome = interaction.on_map_click(latlon!(1.0, 1.0));

        assert_matches!(outcome, ClickOutcome::Ignored);
        assert_eq!(interaction.anchor(), anchor);
        assert_eq!(interaction.route(), &route);
        assert_eq!(interaction.surface(), &surface);
    }

    #[test]
    fn clicks_do_not_refit_viewport() {
        let mut interaction = interaction();
        let initial_fit = interaction.surface().fitted;
        interaction.set_mode(InteractionMode::EditRoute);

        interaction.on_map_click(latlon!(10.0, 10.0));

        assert_eq!(interaction.surface().fitted, initial_fit);
    }

    #[test]
    fn recalculate_fits_updated_content() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::EditRoute);
        interaction.on_map_click(latlon!(-6.70, -79.80));
        interaction.set_mode(InteractionMode::MoveAnchor);
        interaction.on_map_click(latlon!(-6.90, -79.90));

        interaction.recalculate();

        let bounds = interaction.surface().fitted.expect("fitted");
        assert_eq!(bounds, interaction.content_bounds());
        assert!(bounds.contains(&latlon!(-6.70, -79.80)));
        assert!(bounds.contains(&latlon!(-6.90, -79.90)));
        assert_relative_eq!(bounds.lat_span(), 0.2 * 1.5, epsilon = 1e-9);
        assert_relative_eq!(bounds.south(), -6.90 - 0.05, epsilon = 1e-9);
    }

    #[test]
    fn recalculate_is_idempotent() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::EditRoute);
        interaction.on_map_click(latlon!(-6.75, -79.83));

        interaction.recalculate();
        let once = interaction.surface().clone();
        interaction.recalculate();
        let twice = interaction.surface().clone();

        assert_eq!(once.route_line, twice.route_line);
        assert_eq!(once.waypoints, twice.waypoints);
        assert_eq!(once.fitted, twice.fitted);
        assert_eq!(once.anchor, twice.anchor);
        assert_eq!(twice.route_line_updates, once.route_line_updates + 1);
    }

    #[test]
    fn recalculate_restores_drifted_surface() {
        let mut interaction = interaction();
        interaction.surface_mut().route_line.clear();
        interaction.surface_mut().waypoints.clear();

        interaction.recalculate();

        assert_eq!(
            interaction.surface().route_line,
            interaction.route().points()
        );
        assert_eq!(interaction.surface().waypoints.len(), 3);
    }

    #[test]
    fn custom_content() {
        let route = Route::single(latlon!(1.0, 1.0));
        let interaction =
            MapInteraction::with_content(latlon!(0.0, 0.0), route, 0.0, RecordingSurface::default());

        let bounds = interaction.surface().fitted.expect("fitted");
        assert_relative_eq!(bounds.south(), 0.0);
        assert_relative_eq!(bounds.north(), 1.0);
        assert_relative_eq!(interaction.anchor().lat(), 0.0);
    }
}
