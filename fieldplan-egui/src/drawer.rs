//! "Vistas" drawer drawn with egui.

use egui::{Color32, Context, Id, Order, Sense};
use fieldplan::drawer::{DrawerBinding, DrawerHost, DrawerTrigger};
use fieldplan::Waypoint;
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::GeoPoint;

const BACKDROP: Color32 = Color32::from_black_alpha(96);

/// Visibility of the side panel.
#[derive(Debug, Default)]
pub struct DrawerPanel {
    visible: bool,
}

impl DrawerHost for DrawerPanel {
    fn apply(&mut self, open: bool) {
        self.visible = open;
    }
}

/// View selected in the drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Show the anchor and the whole route.
    Overview,
    /// Center the map on a point.
    Focus(GeoPoint2d),
}

/// Shows the drawer with a backdrop over the rest of the window if it is open.
pub fn show(
    ctx: &Context,
    binding: &mut DrawerBinding<DrawerPanel>,
    anchor: GeoPoint2d,
    waypoints: &[Waypoint],
) -> Option<ViewRequest> {
    let visible = binding
        .controller_mut()
        .is_some_and(|controller| controller.host().visible);

    let mut request = None;
    let panel = egui::SidePanel::left("views_drawer")
        .resizable(false)
        .show_animated(ctx, visible, |ui| {
            ui.heading("Vistas");
            ui.separator();

            if ui.button("Vista general").clicked() {
                request = Some(ViewRequest::Overview);
            }
            if ui.button(format!("SET  {}", format_point(&anchor))).clicked() {
                request = Some(ViewRequest::Focus(anchor));
            }

            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for waypoint in waypoints {
                    let text = format!("{}  {}", waypoint.label(), format_point(&waypoint.position));
                    if ui.selectable_label(false, text).clicked() {
                        request = Some(ViewRequest::Focus(waypoint.position));
                    }
                }
            });
        });

    if let Some(panel) = panel {
        let mut rect = ctx.screen_rect();
        rect.min.x = panel.response.rect.max.x;

        egui::Area::new(Id::new("views_drawer_backdrop"))
            .order(Order::Middle)
            .fixed_pos(rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(rect, Sense::click());
                ui.painter().rect_filled(rect, 0.0, BACKDROP);
                if response.clicked() {
                    binding.handle(DrawerTrigger::BackdropClick);
                }
            });
    }

    request
}

fn format_point(point: &GeoPoint2d) -> String {
    format!("{:.5}, {:.5}", point.lat(), point.lon())
}

#[cfg(test)]
mod tests {
    use fieldplan::drawer::Key;
    use galileo_types::latlon;

    use super::*;

    #[test]
    fn panel_follows_binding() {
        let mut binding = DrawerBinding::wire(Some(DrawerPanel::default()));

        binding.handle(DrawerTrigger::ButtonClick);
        let visible = |binding: &mut DrawerBinding<DrawerPanel>| {
            binding
                .controller_mut()
                .is_some_and(|controller| controller.host().visible)
        };
        assert!(visible(&mut binding));

        binding.handle(DrawerTrigger::GlobalKey(Key::Escape));
        assert!(!visible(&mut binding));
    }

    #[test]
    fn point_format() {
        assert_eq!(
            format_point(&latlon!(-6.7714, -79.8409)),
            "-6.77140, -79.84090"
        );
    }
}
