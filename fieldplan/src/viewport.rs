//! Fitting the map viewport to geographic bounds.

use galileo_types::cartesian::{CartesianPoint2d, Point2};
use galileo_types::geo::impls::projection::WebMercator;
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Datum, GeoPoint, NewGeoPoint, Projection};
use thiserror::Error;

use crate::geo::GeoBounds;

/// Resolution (meters per pixel) of z-level 0 of the standard web tile schema.
pub const TOP_RESOLUTION: f64 = 156543.03392800014;

/// Largest latitude representable in Web Mercator, the edge of the z-level 0 tile.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Reason a viewport fit cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitError {
    /// The map area has no size yet.
    #[error("screen has no area")]
    EmptyScreen,
    /// The bounds hold coordinates that are not numbers.
    #[error("bounds cannot be projected")]
    Unprojectable,
}

/// Center and resolution that show given bounds on a screen of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    /// Position of the screen center.
    pub center: GeoPoint2d,
    /// Z-level of the standard web tile schema.
    pub z_level: u32,
    /// Map resolution in Web Mercator meters per pixel, matches `z_level`.
    pub resolution: f64,
}

impl ViewportFit {
    /// Computes the largest integer z-level at which the bounds fit on the screen, capped at
    /// `max_z`.
    ///
    /// Bounds with zero area are shown at `max_z`. Corners beyond the Web Mercator limits are
    /// clamped to [`MAX_LATITUDE`] and the antimeridian first, so padded bounds near the poles
    /// still fit.
    pub fn compute(
        bounds: &GeoBounds,
        screen_width: f64,
        screen_height: f64,
        max_z: u32,
    ) -> Result<Self, FitError> {
        if !(screen_width > 0.0 && screen_height > 0.0) {
            return Err(FitError::EmptyScreen);
        }

        let projection = WebMercator::<GeoPoint2d, Point2<f64>>::default();
        let south_west = projection
            .project(&clamp_to_mercator(&bounds.south_west()))
            .ok_or(FitError::Unprojectable)?;
        let north_east = projection
            .project(&clamp_to_mercator(&bounds.north_east()))
            .ok_or(FitError::Unprojectable)?;

        let width = (north_east.x() - south_west.x()).abs();
        let height = (north_east.y() - south_west.y()).abs();
        let required = (width / screen_width).max(height / screen_height);

        let z_level = if required > 0.0 {
            let z = (TOP_RESOLUTION / required).log2().floor();
            z.clamp(0.0, max_z as f64) as u32
        } else {
            max_z
        };

        let center = unproject(&Point2::<f64>::new(
            (south_west.x() + north_east.x()) / 2.0,
            (south_west.y() + north_east.y()) / 2.0,
        ));

        Ok(Self {
            center,
            z_level,
            resolution: resolution_at(z_level),
        })
    }
}

fn clamp_to_mercator(point: &GeoPoint2d) -> GeoPoint2d {
    GeoPoint2d::latlon(
        point.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE),
        point.lon().clamp(-180.0, 180.0),
    )
}

/// Converts geographic points into screen pixels for a north-up Web Mercator view.
///
/// Screen coordinates are measured from the top-left corner of the map area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjector {
    center: Point2<f64>,
    resolution: f64,
    half_width: f64,
    half_height: f64,
}

impl ScreenProjector {
    /// Creates a projector for a view centered at `center` with the given resolution and screen
    /// size.
    ///
    /// Returns `None` if the resolution is not positive or the center cannot be projected.
    pub fn new(center: &GeoPoint2d, resolution: f64, width: f64, height: f64) -> Option<Self> {
        if !(resolution > 0.0) {
            return None;
        }

        let center = WebMercator::<GeoPoint2d, Point2<f64>>::default().project(center)?;
        Some(Self {
            center,
            resolution,
            half_width: width / 2.0,
            half_height: height / 2.0,
        })
    }

    /// Screen position of `point` as `[x, y]` pixels.
    pub fn project(&self, point: &GeoPoint2d) -> Option<[f64; 2]> {
        let projected = WebMercator::<GeoPoint2d, Point2<f64>>::default().project(point)?;
        Some([
            self.half_width + (projected.x() - self.center.x()) / self.resolution,
            self.half_height - (projected.y() - self.center.y()) / self.resolution,
        ])
    }
}

// Inverse spherical mercator on the WGS84 semimajor axis, in degrees.
fn unproject(point: &Point2<f64>) -> GeoPoint2d {
    let radius = Datum::WGS84.semimajor();
    let lat = 2.0 * (point.y() / radius).exp().atan() - std::f64::consts::FRAC_PI_2;
    let lon = point.x() / radius;

    GeoPoint2d::latlon(lat.to_degrees(), lon.to_degrees())
}

/// Resolution of the given z-level of the standard web tile schema.
pub fn resolution_at(z_level: u32) -> f64 {
    TOP_RESOLUTION / 2f64.powi(z_level as i32)
}
