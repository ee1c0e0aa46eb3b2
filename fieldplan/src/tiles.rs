//! Remote raster tile sources.
//!
//! A tile source is described by a url template with `{z}`, `{x}` and `{y}` placeholders for the
//! tile index and an optional `{s}` placeholder for load balancing between subdomains.
//!
//! ```
//! use fieldplan::tiles::TileSource;
//!
//! let source = TileSource::esri_world_imagery();
//! assert_eq!(
//!     source.tile_url(13, 2281, 4250)?,
//!     "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/13/4250/2281",
//! );
//! # Ok::<(), fieldplan::FieldplanError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FieldplanError;

/// Attribution text shown for a tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TileAttribution {
    /// Text of the attribution.
    pub text: String,
    /// Link for the attribution text.
    pub url: Option<String>,
}

/// Raster tile service addressed by zoom, column and row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TileSource {
    /// Name shown in the layer selection control.
    pub name: String,
    /// Url template, see the [module docs](self).
    pub url_template: String,
    /// Highest z-level the service provides.
    pub max_zoom: u32,
    /// Attribution required by the provider.
    pub attribution: TileAttribution,
    /// Values substituted into the `{s}` placeholder.
    #[serde(default)]
    pub subdomains: Vec<String>,
}

impl TileSource {
    /// Esri World Imagery satellite/aerial basemap.
    pub fn esri_world_imagery() -> Self {
        Self {
            name: "Satelital (Esri)".into(),
            url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".into(),
            max_zoom: 19,
            attribution: TileAttribution {
                text: "Tiles © Esri — Source: Esri, Maxar, Earthstar Geographics, and the GIS User Community".into(),
                url: Some("https://www.esri.com".into()),
            },
            subdomains: vec![],
        }
    }

    /// Transparent overlay with boundaries, streets and place labels.
    pub fn esri_reference_labels() -> Self {
        Self {
            name: "Calles/labels".into(),
            url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}".into(),
            max_zoom: 19,
            attribution: TileAttribution {
                text: "Labels © Esri".into(),
                url: Some("https://www.esri.com".into()),
            },
            subdomains: vec![],
        }
    }

    /// Standard OpenStreetMap tiles balanced over the `a`, `b` and `c` subdomains.
    pub fn open_street_map() -> Self {
        Self {
            name: "OpenStreetMap".into(),
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            max_zoom: 19,
            attribution: TileAttribution {
                text: "© OpenStreetMap contributors".into(),
                url: Some("https://www.openstreetmap.org/copyright".into()),
            },
            subdomains: vec!["a".into(), "b".into(), "c".into()],
        }
    }

    /// Url of the tile with the given index.
    pub fn tile_url(&self, z: u32, x: i64, y: i64) -> Result<String, FieldplanError> {
        let mut vars = HashMap::with_capacity(4);
        vars.insert("z".to_string(), z.to_string());
        vars.insert("x".to_string(), x.to_string());
        vars.insert("y".to_string(), y.to_string());
        if let Some(subdomain) = self.subdomain(x, y) {
            vars.insert("s".to_string(), subdomain.to_string());
        }

        strfmt::strfmt(&self.url_template, &vars).map_err(|err| FieldplanError::TileTemplate {
            template: self.url_template.clone(),
            reason: err.to_string(),
        })
    }

    /// Checks that the template renders for a sample tile.
    pub fn validate(&self) -> Result<(), FieldplanError> {
        self.tile_url(0, 0, 0).map(|_| ())
    }

    fn subdomain(&self, x: i64, y: i64) -> Option<&str> {
        if self.subdomains.is_empty() {
            return None;
        }

        let index = (x + y).unsigned_abs() % self.subdomains.len() as u64;
        Some(&self.subdomains[index as usize])
    }
}
