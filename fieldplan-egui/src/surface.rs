use fieldplan::{GeoBounds, InteractionMode, MapSurface, Waypoint};
use galileo_types::geo::impls::GeoPoint2d;

use crate::map::FeatureLayers;

/// [`MapSurface`] drawing into galileo feature layers.
///
/// Geometry changes are written into the shared layers right away. Everything that needs the
/// map view or the egui context (viewport fitting, the anchor popup, toggle styling) is kept here
/// and picked up by the application on the next frame.
pub struct GalileoSurface {
    layers: FeatureLayers,
    anchor: Option<GeoPoint2d>,
    waypoints: Vec<Waypoint>,
    popup_open: bool,
    pending_fit: Option<GeoBounds>,
    mode: InteractionMode,
    requires_redraw: bool,
}

impl GalileoSurface {
    /// Creates a surface over empty layers.
    pub fn new(layers: FeatureLayers) -> Self {
        Self {
            layers,
            anchor: None,
            waypoints: Vec::new(),
            popup_open: false,
            pending_fit: None,
            mode: InteractionMode::None,
            requires_redraw: false,
        }
    }

    /// Mode the toggle controls are styled for.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Position of the anchor marker, if placed.
    pub fn anchor(&self) -> Option<GeoPoint2d> {
        self.anchor
    }

    /// Waypoint markers currently drawn.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Whether the anchor popup is shown.
    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Opens the anchor popup without an interaction change, e.g. when the marker is clicked.
    pub fn show_popup(&mut self) {
        if self.anchor.is_some() {
            self.popup_open = true;
        }
    }

    /// Hides the anchor popup.
    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }

    /// Applies a primary click on the map area: a click on the anchor marker shows the popup,
    /// any other click hides it.
    pub fn click_map(&mut self, on_anchor: bool) {
        if on_anchor {
            self.show_popup();
        } else {
            self.close_popup();
        }
    }

    /// Takes the last fit request that was not applied to the map yet.
    pub fn take_pending_fit(&mut self) -> Option<GeoBounds> {
        self.pending_fit.take()
    }

    /// Puts back a fit request that could not be applied, unless a newer one arrived.
    pub fn defer_fit(&mut self, bounds: GeoBounds) {
        self.pending_fit.get_or_insert(bounds);
    }

    /// Returns true once after the layer contents changed.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.requires_redraw)
    }

    fn redraw_waypoint_layer(&mut self) {
        let points: Vec<_> = self.waypoints.iter().map(|w| w.position).collect();
        self.layers.waypoints.set_points(&points);
        self.requires_redraw = true;
    }
}

impl MapSurface for GalileoSurface {
    fn place_anchor(&mut self, position: GeoPoint2d) {
        self.anchor = Some(position);
        self.layers.anchor.set_points(&[position]);
        self.requires_redraw = true;
    }

    fn open_anchor_popup(&mut self) {
        self.show_popup();
    }

    fn set_route_line(&mut self, points: &[GeoPoint2d]) {
        self.layers.route.set_points(points);
        self.requires_redraw = true;
    }

    fn clear_waypoints(&mut self) {
        self.waypoints.clear();
        self.redraw_waypoint_layer();
    }

    fn add_waypoint(&mut self, waypoint: &Waypoint) {
        self.waypoints.push(*waypoint);
        self.redraw_waypoint_layer();
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        self.pending_fit = Some(bounds);
    }

    fn show_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fieldplan::config::FieldplanConfig;
    use fieldplan::MapInteraction;
    use galileo_types::latlon;

    use super::*;

    fn interaction() -> MapInteraction<GalileoSurface> {
        let config = FieldplanConfig::default();
        MapInteraction::new(
            &config.map,
            GalileoSurface::new(FeatureLayers::new(&config)),
        )
    }

    #[test]
    fn initial_content_is_drawn() {
        let mut interaction = interaction();
        let surface = interaction.surface_mut();

        assert!(surface.anchor().is_some());
        assert_eq!(surface.waypoints().len(), 3);
        assert_eq!(surface.mode(), InteractionMode::None);
        assert!(!surface.is_popup_open());
        assert!(surface.take_redraw());
        assert!(!surface.take_redraw());
        assert_matches!(surface.take_pending_fit(), Some(_));
        assert_matches!(surface.take_pending_fit(), None);
    }

    #[test]
    fn moving_anchor_opens_popup() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::MoveAnchor);
        interaction.on_map_click(latlon!(-6.75, -79.83));

        let surface = interaction.surface_mut();
        assert_eq!(surface.anchor(), Some(latlon!(-6.75, -79.83)));
        assert!(surface.is_popup_open());
        assert_eq!(surface.mode(), InteractionMode::MoveAnchor);

        surface.close_popup();
        assert!(!surface.is_popup_open());
    }

    #[test]
    fn popup_closes_on_click_away_from_anchor() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::MoveAnchor);
        interaction.on_map_click(latlon!(-6.75, -79.83));
        let surface = interaction.surface_mut();
        surface.click_map(true);
        assert!(surface.is_popup_open());

        surface.click_map(false);
        assert!(!surface.is_popup_open());

        surface.click_map(true);
        assert!(surface.is_popup_open());
    }

    #[test]
    fn adding_waypoint_away_from_anchor_closes_popup() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::MoveAnchor);
        interaction.on_map_click(latlon!(-6.75, -79.83));
        interaction.set_mode(InteractionMode::EditRoute);
        interaction.on_map_click(latlon!(-6.70, -79.80));

        let surface = interaction.surface_mut();
        assert!(surface.is_popup_open());
        surface.click_map(false);
        assert!(!surface.is_popup_open());
        assert_eq!(surface.anchor(), Some(latlon!(-6.75, -79.83)));
    }

    #[test]
    fn waypoint_markers_follow_route() {
        let mut interaction = interaction();
        interaction.set_mode(InteractionMode::EditRoute);
        interaction.on_map_click(latlon!(-6.75, -79.83));

        let labels: Vec<_> = interaction
            .surface()
            .waypoints()
            .iter()
            .map(Waypoint::label)
            .collect();
        assert_eq!(labels, ["WP-01", "WP-02", "WP-03", "WP-04"]);
    }

    #[test]
    fn deferred_fit_does_not_replace_newer_request() {
        let mut interaction = interaction();
        let initial = interaction
            .surface_mut()
            .take_pending_fit()
            .expect("initial fit");

        interaction.set_mode(InteractionMode::EditRoute);
        interaction.on_map_click(latlon!(-6.0, -79.0));
        interaction.recalculate();

        let surface = interaction.surface_mut();
        surface.defer_fit(initial);
        let pending = surface.take_pending_fit().expect("recalculated fit");
        assert_ne!(pending, initial);
    }
}
