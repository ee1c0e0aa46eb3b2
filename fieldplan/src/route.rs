use galileo_types::geo::impls::GeoPoint2d;
use serde::{Deserialize, Serialize};

/// Ordered path of waypoints edited by the user.
///
/// A route always has at least one point. Points can only be appended; duplicates are kept.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Vec<GeoPoint2d>", into = "Vec<GeoPoint2d>")]
pub struct Route {
    points: Vec<GeoPoint2d>,
}

impl Route {
    /// Route consisting of a single point.
    pub fn single(point: GeoPoint2d) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Creates a route from the given points, or returns `None` if there are none.
    pub fn from_points(points: Vec<GeoPoint2d>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    /// Appends a point to the end of the route and returns its index.
    pub fn push(&mut self, point: GeoPoint2d) -> usize {
        self.points.push(point);
        self.points.len() - 1
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[GeoPoint2d] {
        &self.points
    }

    /// Number of points. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The most recently appended point.
    pub fn last(&self) -> GeoPoint2d {
        self.points[self.points.len() - 1]
    }

    /// Iterates over the route points as labelled waypoints.
    pub fn waypoints(&self) -> impl Iterator<Item = Waypoint> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(index, position)| Waypoint {
                index,
                position: *position,
            })
    }
}

impl TryFrom<Vec<GeoPoint2d>> for Route {
    type Error = String;

    fn try_from(points: Vec<GeoPoint2d>) -> Result<Self, Self::Error> {
        Self::from_points(points).ok_or_else(|| "route must have at least one point".to_string())
    }
}

impl From<Route> for Vec<GeoPoint2d> {
    fn from(route: Route) -> Self {
        route.points
    }
}

/// A single route point together with its position in the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// 0-based index in the route.
    pub index: usize,
    /// Location of the point.
    pub position: GeoPoint2d,
}

impl Waypoint {
    /// Display label of the waypoint, see [`waypoint_label`].
    pub fn label(&self) -> String {
        waypoint_label(self.index)
    }
}

/// Label of the waypoint at the 0-based `index`: `WP-01` for the first point, `WP-02` for the
/// second and so on.
pub fn waypoint_label(index: usize) -> String {
    format!("WP-{:02}", index + 1)
}
