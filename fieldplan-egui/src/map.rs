//! Galileo layers of the field plan map.

use std::sync::Arc;

use fieldplan::config::{FieldplanConfig, RouteStyle, WaypointStyle};
use fieldplan::layers::LayerControl;
use fieldplan::tiles::TileSource;
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::layer::{FeatureLayer, RasterTileLayer};
use galileo::symbol::{CirclePointSymbol, SimpleContourSymbol};
use galileo::tile_schema::{TileIndex, TileSchema};
use galileo::{Color, Map, MapBuilder};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, GeoPoint};
use galileo_types::geometry_type::GeoSpace2d;
use galileo_types::impls::Contour;
use parking_lot::RwLock;

const ROUTE_COLOR: Color = Color::from_hex("#3388ff");
const ANCHOR_COLOR: Color = Color::from_hex("#e53935");
const ANCHOR_SIZE: f64 = 14.0;
const ANCHOR_OUTLINE: f64 = 3.0;

type PointLayer = FeatureLayer<GeoPoint2d, GeoPoint2d, CirclePointSymbol, GeoSpace2d>;
type LineLayer = FeatureLayer<GeoPoint2d, Contour<GeoPoint2d>, SimpleContourSymbol, GeoSpace2d>;

/// Converts an opacity in `0..=1` into an alpha channel value.
pub(crate) fn alpha(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Polyline layer whose geometry is replaced as a whole.
pub struct RouteLayer {
    layer: Arc<RwLock<LineLayer>>,
    color: Color,
    width: f64,
}

impl RouteLayer {
    fn new(style: &RouteStyle) -> Self {
        let color = ROUTE_COLOR.with_alpha(alpha(style.opacity));
        let layer = FeatureLayer::new(
            vec![],
            SimpleContourSymbol::new(color, style.weight),
            Crs::WGS84,
        );

        Self {
            layer: Arc::new(RwLock::new(layer)),
            color,
            width: style.weight,
        }
    }

    /// Replaces the polyline with one going through `points`.
    pub fn set_points(&self, points: &[GeoPoint2d]) {
        *self.layer.write() = FeatureLayer::new(
            vec![Contour::open(points.to_vec())],
            SimpleContourSymbol::new(self.color, self.width),
            Crs::WGS84,
        );
    }
}

/// Circle markers drawn as a filled disk over a slightly larger outline disk.
pub struct MarkerLayer {
    outline: Arc<RwLock<PointLayer>>,
    fill: Arc<RwLock<PointLayer>>,
    outline_symbol: (Color, f64),
    fill_symbol: (Color, f64),
}

impl MarkerLayer {
    fn new(outline_symbol: (Color, f64), fill_symbol: (Color, f64)) -> Self {
        let empty = |(color, size): (Color, f64)| {
            Arc::new(RwLock::new(FeatureLayer::new(
                vec![],
                CirclePointSymbol::new(color, size),
                Crs::WGS84,
            )))
        };

        Self {
            outline: empty(outline_symbol),
            fill: empty(fill_symbol),
            outline_symbol,
            fill_symbol,
        }
    }

    fn anchor() -> Self {
        Self::new(
            (Color::WHITE, ANCHOR_SIZE + 2.0 * ANCHOR_OUTLINE),
            (ANCHOR_COLOR, ANCHOR_SIZE),
        )
    }

    fn waypoints(style: &WaypointStyle) -> Self {
        let diameter = style.radius * 2.0;
        Self::new(
            (
                ROUTE_COLOR.with_alpha(alpha(style.opacity)),
                diameter + 2.0 * style.weight,
            ),
            (ROUTE_COLOR.with_alpha(alpha(style.fill_opacity)), diameter),
        )
    }

    /// Replaces all markers.
    pub fn set_points(&self, points: &[GeoPoint2d]) {
        for (layer, (color, size)) in [
            (&self.outline, self.outline_symbol),
            (&self.fill, self.fill_symbol),
        ] {
            *layer.write() = FeatureLayer::new(
                points.to_vec(),
                CirclePointSymbol::new(color, size),
                Crs::WGS84,
            );
        }
    }
}

/// Layers drawn over the basemap, shared between the map and the interaction surface.
pub struct FeatureLayers {
    /// Route polyline.
    pub route: RouteLayer,
    /// Waypoint markers.
    pub waypoints: MarkerLayer,
    /// Anchor marker.
    pub anchor: MarkerLayer,
}

impl FeatureLayers {
    /// Creates empty layers styled by the configuration.
    pub fn new(config: &FieldplanConfig) -> Self {
        Self {
            route: RouteLayer::new(&config.map.route_style),
            waypoints: MarkerLayer::waypoints(&config.map.waypoint_style),
            anchor: MarkerLayer::anchor(),
        }
    }
}

/// Builds the map with the imagery basemap, the label overlay and the feature layers on top.
///
/// The returned control lists the two tile layers at the indices they have in the map.
pub fn build_map(
    config: &FieldplanConfig,
    features: &FeatureLayers,
) -> anyhow::Result<(Map, LayerControl)> {
    let cache_dir = config.tiles.cache_dir.as_deref();
    let imagery = tile_layer(&config.tiles.imagery, cache_dir)?;
    let labels = tile_layer(&config.tiles.labels, cache_dir)?;

    let mut control = LayerControl::new();
    control.add_base(config.tiles.imagery.name.clone());
    control.add_overlay(config.tiles.labels.name.clone(), true);

    let center = &config.map.center;
    let map = MapBuilder::default()
        .with_latlon(center.lat(), center.lon())
        .with_z_level(config.map.z_level)
        .with_layer(imagery)
        .with_layer(labels)
        .with_layer(features.route.layer.clone())
        .with_layer(features.waypoints.outline.clone())
        .with_layer(features.waypoints.fill.clone())
        .with_layer(features.anchor.outline.clone())
        .with_layer(features.anchor.fill.clone())
        .build();

    Ok((map, control))
}

fn tile_layer(source: &TileSource, cache_dir: Option<&str>) -> anyhow::Result<RasterTileLayer> {
    source.validate()?;

    let template = source.clone();
    let mut builder = RasterTileLayerBuilder::new_rest(move |index: &TileIndex| {
        template
            .tile_url(index.z, index.x.into(), index.y.into())
            .unwrap_or_else(|err| {
                log::warn!("Cannot build url for tile {index:?}: {err}");
                String::new()
            })
    })
    .with_tile_schema(TileSchema::web(source.max_zoom + 1))
    .with_attribution(
        source.attribution.text.clone(),
        source.attribution.url.clone().unwrap_or_default(),
    );

    if let Some(path) = cache_dir {
        builder = builder.with_file_cache_checked(path);
    }

    log::debug!("Tile layer '{}' from {}", source.name, source.url_template);
    Ok(builder.build()?)
}
