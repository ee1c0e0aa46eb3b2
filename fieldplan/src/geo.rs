use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{GeoPoint, NewGeoPoint};
use serde::{Deserialize, Serialize};

/// Rectangle in geographic coordinates (degrees), aligned with parallels and meridians.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoBounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl GeoBounds {
    /// Zero-area bounds around a single point.
    pub fn from_point(point: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            south: point.lat(),
            west: point.lon(),
            north: point.lat(),
            east: point.lon(),
        }
    }

    /// Smallest bounds containing all the given points, or `None` if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint2d>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = Self::from_point(iter.next()?);
        Some(iter.fold(first, |bounds, point| bounds.extend(point)))
    }

    /// Returns bounds grown to contain the point.
    pub fn extend(&self, point: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            south: self.south.min(point.lat()),
            west: self.west.min(point.lon()),
            north: self.north.max(point.lat()),
            east: self.east.max(point.lon()),
        }
    }

    /// Returns bounds extended on every side by `ratio` of the span along that axis.
    ///
    /// With `ratio = 0.25`, the north and south edges move by a quarter of the latitude span,
    /// and the east and west edges by a quarter of the longitude span.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = self.lat_span() * ratio;
        let lon_buffer = self.lon_span() * ratio;

        Self {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }

    /// Southern edge latitude.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Western edge longitude.
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Northern edge latitude.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Eastern edge longitude.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Difference between the northern and southern edges.
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Difference between the eastern and western edges.
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// South-west corner.
    pub fn south_west(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.south, self.west)
    }

    /// North-east corner.
    pub fn north_east(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.north, self.east)
    }

    /// Midpoint of the corners in degrees.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Checks if the point lies inside the bounds or on their edge.
    pub fn contains(&self, point: &impl GeoPoint<Num = f64>) -> bool {
        (self.south..=self.north).contains(&point.lat())
            && (self.west..=self.east).contains(&point.lon())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use galileo_types::latlon;

    use super::*;

    #[test]
    fn from_points_covers_all_points() {
        let points = [
            latlon!(-6.7714, -79.8409),
            latlon!(-6.7514, -79.8609),
            latlon!(-6.7614, -79.8459),
            latlon!(-6.7714, -79.8259),
        ];

        let bounds = GeoBounds::from_points(&points).expect("points are not empty");

        assert_relative_eq!(bounds.south(), -6.7714);
        assert_relative_eq!(bounds.north(), -6.7514);
        assert_relative_eq!(bounds.west(), -79.8609);
        assert_relative_eq!(bounds.east(), -79.8259);
        assert!(points.iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn from_points_empty() {
        assert_eq!(GeoBounds::from_points(&[]), None);
    }

    #[test]
    fn pad_extends_each_side_by_axis_span() {
        let bounds = GeoBounds::from_points(&[latlon!(10.0, 20.0), latlon!(12.0, 28.0)])
            .expect("points are not empty");

        let padded = bounds.pad(0.25);

        assert_relative_eq!(padded.south(), 9.5);
        assert_relative_eq!(padded.north(), 12.5);
        assert_relative_eq!(padded.west(), 18.0);
        assert_relative_eq!(padded.east(), 30.0);
        assert_relative_eq!(padded.center().lat(), bounds.center().lat());
        assert_relative_eq!(padded.center().lon(), bounds.center().lon());
    }

    #[test]
    fn pad_of_single_point_is_noop() {
        let bounds = GeoBounds::from_point(&latlon!(-6.0, -79.0));
        assert_eq!(bounds.pad(0.25), bounds);
    }

    #[test]
    fn corners() {
        let bounds = GeoBounds::from_points(&[latlon!(1.0, 2.0), latlon!(-3.0, 4.0)])
            .expect("points are not empty");

        assert_eq!(bounds.south_west(), latlon!(-3.0, 2.0));
        assert_eq!(bounds.north_east(), latlon!(1.0, 4.0));
        assert!(!bounds.contains(&latlon!(1.5, 3.0)));
    }
}
