//! Application configuration.
//!
//! Every field has a default, so a configuration file only needs to contain the values it wants
//! to change:
//!
//! ```
//! use fieldplan::config::FieldplanConfig;
//!
//! let config = FieldplanConfig::from_json_str(r#"{ "map": { "z_level": 15 } }"#)?;
//!
//! assert_eq!(config.map.z_level, 15);
//! assert_eq!(config.map.fit_padding, 0.25);
//! # Ok::<(), fieldplan::FieldplanError>(())
//! ```

use std::path::Path;

use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};

use crate::error::FieldplanError;
use crate::route::Route;
use crate::tiles::TileSource;

/// Root of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldplanConfig {
    /// Map content and viewport settings.
    pub map: MapSettings,
    /// Tile sources of the map layers.
    pub tiles: TileSettings,
}

impl FieldplanConfig {
    /// Parses and validates configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, FieldplanError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FieldplanError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that the configured values can be used to start the map.
    pub fn validate(&self) -> Result<(), FieldplanError> {
        self.map.validate()?;
        self.tiles.imagery.validate()?;
        self.tiles.labels.validate()?;
        Ok(())
    }
}

/// Initial map content.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapSettings {
    /// Default anchor position and initial map center.
    pub center: GeoPoint2d,
    /// Initial z-level before the viewport is fitted to the content.
    pub z_level: u32,
    /// Offsets `[d_lat, d_lon]` from the center that make up the default route.
    pub route_offsets: Vec<[f64; 2]>,
    /// Fraction of the content span added on every side when fitting the viewport.
    pub fit_padding: f64,
    /// Text of the anchor popup.
    pub anchor_label: AnchorLabel,
    /// Style of the route polyline.
    pub route_style: RouteStyle,
    /// Style of the waypoint markers.
    pub waypoint_style: WaypointStyle,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: GeoPoint2d::latlon(-6.7714, -79.8409),
            z_level: 13,
            route_offsets: vec![[0.02, -0.02], [0.01, -0.005], [0.0, 0.015]],
            fit_padding: 0.25,
            anchor_label: AnchorLabel::default(),
            route_style: RouteStyle::default(),
            waypoint_style: WaypointStyle::default(),
        }
    }
}

impl MapSettings {
    /// Route built from the center and the configured offsets.
    ///
    /// Falls back to a single point at the center if there are no offsets.
    pub fn default_route(&self) -> Route {
        let points = self
            .route_offsets
            .iter()
            .map(|[d_lat, d_lon]| {
                GeoPoint2d::latlon(self.center.lat() + d_lat, self.center.lon() + d_lon)
            })
            .collect();

        Route::from_points(points).unwrap_or_else(|| {
            log::warn!("No default route offsets configured, starting from the map center");
            Route::single(self.center)
        })
    }

    fn validate(&self) -> Result<(), FieldplanError> {
        if self.route_offsets.is_empty() {
            return Err(FieldplanError::InvalidConfig(
                "map.route_offsets must contain at least one offset".into(),
            ));
        }

        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err(FieldplanError::InvalidConfig(format!(
                "map.fit_padding must be a non-negative number, got {}",
                self.fit_padding
            )));
        }

        Ok(())
    }
}

/// Popup content of the anchor marker.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnchorLabel {
    /// Bold first line.
    pub title: String,
    /// Second line.
    pub detail: String,
}

impl Default for AnchorLabel {
    fn default() -> Self {
        Self {
            title: "SET".into(),
            detail: "ALT-SET-02 · SET-ALT-002".into(),
        }
    }
}

/// Stroke of the route polyline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteStyle {
    /// Line width in pixels.
    pub weight: f64,
    /// Line opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            weight: 4.0,
            opacity: 0.85,
        }
    }
}

/// Look of the small circular waypoint markers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WaypointStyle {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Outline width in pixels.
    pub weight: f64,
    /// Outline opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
}

impl Default for WaypointStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            weight: 2.0,
            opacity: 0.9,
            fill_opacity: 0.6,
        }
    }
}

/// Tile layers of the map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TileSettings {
    /// Base imagery layer.
    pub imagery: TileSource,
    /// Semi-transparent overlay with streets and place labels.
    pub labels: TileSource,
    /// Folder for the tile file cache on native platforms. `None` disables the cache.
    pub cache_dir: Option<String>,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            imagery: TileSource::esri_world_imagery(),
            labels: TileSource::esri_reference_labels(),
            cache_dir: Some(".tile_cache".into()),
        }
    }
}
