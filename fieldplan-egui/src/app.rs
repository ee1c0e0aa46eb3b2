use egui::{Align2, Context, Id, Order, Pos2, Rect, Vec2};
use fieldplan::config::{AnchorLabel, FieldplanConfig};
use fieldplan::drawer::{DrawerBinding, DrawerTrigger, Key};
use fieldplan::layers::{LayerControl, LayerRole};
use fieldplan::tiles::TileAttribution;
use fieldplan::viewport::{FitError, ScreenProjector, ViewportFit};
use fieldplan::InteractionMode;
use galileo_egui::{EguiMap, EguiMapState};
use galileo_types::geo::impls::GeoPoint2d;

use crate::drawer::{self, DrawerPanel, ViewRequest};
use crate::handler::SharedInteraction;

/// Distance in pixels from a marker center within which the pointer is over the marker.
const MARKER_HIT_RADIUS: f32 = 10.0;

fn toggle_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::MoveAnchor => "Mover SET",
        InteractionMode::EditRoute => "Waypoints",
        InteractionMode::None => "Ninguno",
    }
}

/// Map window with the editing toolbar, the layer control and the views drawer.
pub struct FieldplanApp {
    map: EguiMapState,
    interaction: SharedInteraction,
    layers: LayerControl,
    drawer: DrawerBinding<DrawerPanel>,
    anchor_label: AnchorLabel,
    attributions: Vec<TileAttribution>,
    max_z: u32,
}

impl FieldplanApp {
    /// Creates the application around a map built with [`build_map`](crate::map::build_map).
    pub fn new(
        map: EguiMapState,
        interaction: SharedInteraction,
        layers: LayerControl,
        config: &FieldplanConfig,
    ) -> Self {
        let mut app = Self {
            map,
            interaction,
            layers,
            drawer: DrawerBinding::wire(Some(DrawerPanel::default())),
            anchor_label: config.map.anchor_label.clone(),
            attributions: vec![
                config.tiles.imagery.attribution.clone(),
                config.tiles.labels.attribution.clone(),
            ],
            max_z: config.tiles.imagery.max_zoom,
        };
        app.apply_layer_visibility();
        app
    }

    fn toolbar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                // Buttons report keyboard activation (Enter, space) as clicks.
                if ui.button("Vistas").clicked() {
                    self.drawer.handle(DrawerTrigger::ButtonClick);
                }

                ui.separator();

                let mode = self.interaction.read().surface().mode();
                for toggle in InteractionMode::TOGGLES {
                    if ui
                        .selectable_label(mode.is_active(toggle), toggle_label(toggle))
                        .clicked()
                    {
                        self.interaction.write().set_mode(toggle);
                    }
                }

                if ui.button("Recalcular").clicked() {
                    self.interaction.write().recalculate();
                }
            });
        });
    }

    fn layer_control(&mut self, ctx: &Context) {
        let mut changed = false;

        egui::Area::new(Id::new("layer_control"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-10.0, 40.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if ui.button("Capas").clicked() {
                        self.layers.toggle_collapsed();
                    }

                    if self.layers.is_collapsed() {
                        return;
                    }

                    ui.separator();
                    for index in 0..self.layers.entries().len() {
                        let entry = &self.layers.entries()[index];
                        let (name, role, mut visible) =
                            (entry.name.clone(), entry.role, entry.is_visible());

                        match role {
                            LayerRole::Base => {
                                if ui.radio(visible, name).clicked() {
                                    changed |= self.layers.select_base(index);
                                }
                            }
                            LayerRole::Overlay => {
                                if ui.checkbox(&mut visible, name).changed() {
                                    changed |= self.layers.set_overlay(index, visible);
                                }
                            }
                        }
                    }
                });
            });

        if changed {
            self.apply_layer_visibility();
        }
    }

    fn apply_layer_visibility(&mut self) {
        let layers = self.map.map_mut().layers_mut();
        for (index, entry) in self.layers.entries().iter().enumerate() {
            if entry.is_visible() {
                layers.show(index);
            } else {
                layers.hide(index);
            }
        }

        self.map.request_redraw();
    }

    fn apply_pending_fit(&mut self, size: Vec2) {
        let pending = self.interaction.write().surface_mut().take_pending_fit();
        let Some(bounds) = pending else {
            return;
        };

        match ViewportFit::compute(&bounds, size.x as f64, size.y as f64, self.max_z) {
            Ok(fit) => {
                log::debug!("Fitting map to z-level {} at {:?}", fit.z_level, fit.center);
                let map = self.map.map_mut();
                let view = map
                    .view()
                    .with_position(&fit.center)
                    .with_resolution(fit.resolution);
                map.set_view(view);
                self.map.request_redraw();
            }
            Err(FitError::EmptyScreen) => self
                .interaction
                .write()
                .surface_mut()
                .defer_fit(bounds),
            Err(err) => log::warn!("Dropping viewport fit to {bounds:?}: {err}"),
        }
    }

    fn apply_view_request(&mut self, request: ViewRequest) {
        match request {
            ViewRequest::Overview => self.interaction.write().recalculate(),
            ViewRequest::Focus(point) => {
                let map = self.map.map_mut();
                let view = map.view().with_position(&point);
                map.set_view(view);
                self.map.request_redraw();
            }
        }
    }

    fn marker_overlays(&mut self, ctx: &Context, rect: Rect) {
        let view = self.map.map().view();
        let Some(center) = view.position() else {
            return;
        };
        let Some(projector) = ScreenProjector::new(
            &center,
            view.resolution(),
            rect.width() as f64,
            rect.height() as f64,
        ) else {
            return;
        };
        let to_screen = |point: &GeoPoint2d| {
            projector
                .project(point)
                .map(|[x, y]| rect.min + Vec2::new(x as f32, y as f32))
        };

        let pointer = ctx.pointer_hover_pos().filter(|pos| rect.contains(*pos));
        let is_near =
            |marker: Pos2| pointer.is_some_and(|p| p.distance(marker) <= MARKER_HIT_RADIUS);
        // Clicks on the popup or the other windows are not map clicks.
        let map_clicked = ctx.input(|input| input.pointer.primary_clicked())
            && pointer.is_some_and(|pos| {
                ctx.layer_id_at(pos)
                    .map_or(true, |layer| layer.order == Order::Background)
            });

        let mut interaction = self.interaction.write();
        let surface = interaction.surface_mut();

        if let Some(anchor) = surface.anchor().and_then(|anchor| to_screen(&anchor)) {
            if map_clicked {
                surface.click_map(is_near(anchor));
            }

            if surface.is_popup_open() {
                let mut open = true;
                egui::Window::new(self.anchor_label.title.as_str())
                    .id(Id::new("anchor_popup"))
                    .pivot(Align2::CENTER_BOTTOM)
                    .fixed_pos(anchor - Vec2::new(0.0, MARKER_HIT_RADIUS))
                    .collapsible(false)
                    .resizable(false)
                    .open(&mut open)
                    .show(ctx, |ui| {
                        ui.label(self.anchor_label.detail.as_str());
                    });

                if !open {
                    surface.close_popup();
                }
            }
        }

        let hovered = surface.waypoints().iter().find_map(|waypoint| {
            to_screen(&waypoint.position)
                .filter(|pos| is_near(*pos))
                .map(|pos| (waypoint.label(), pos))
        });
        if let Some((label, pos)) = hovered {
            egui::Area::new(Id::new("waypoint_tooltip"))
                .order(Order::Tooltip)
                .pivot(Align2::LEFT_BOTTOM)
                .fixed_pos(pos + Vec2::new(MARKER_HIT_RADIUS, -MARKER_HIT_RADIUS))
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(label);
                    });
                });
        }
    }

    fn attribution(&self, ctx: &Context) {
        egui::Area::new(Id::new("attribution"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-4.0, -4.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for attribution in &self.attributions {
                        match &attribution.url {
                            Some(url) => {
                                ui.hyperlink_to(
                                    egui::RichText::new(attribution.text.as_str()).small(),
                                    url,
                                );
                            }
                            None => {
                                ui.small(attribution.text.as_str());
                            }
                        }
                    }
                });
            });
    }
}

impl eframe::App for FieldplanApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            self.drawer.handle(DrawerTrigger::GlobalKey(Key::Escape));
        }

        self.toolbar(ctx);

        let (anchor, waypoints) = {
            let interaction = self.interaction.read();
            (interaction.anchor(), interaction.surface().waypoints().to_vec())
        };
        if let Some(request) = drawer::show(ctx, &mut self.drawer, anchor, &waypoints) {
            self.apply_view_request(request);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            self.apply_pending_fit(rect.size());
            if self.interaction.write().surface_mut().take_redraw() {
                self.map.request_redraw();
            }

            EguiMap::new(&mut self.map).show_ui(ui);
            self.marker_overlays(ctx, rect);
        });

        self.layer_control(ctx);
        self.attribution(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_labels() {
        let labels: Vec<_> = InteractionMode::TOGGLES
            .into_iter()
            .map(toggle_label)
            .collect();
        assert_eq!(labels, ["Mover SET", "Waypoints"]);
    }
}
