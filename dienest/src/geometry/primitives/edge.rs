use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    /// Returns the closest point which lies on the edge to the given point
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        //from https://stackoverflow.com/a/6853926
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x, y) = point;

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let mut param = -1.0;
        if len_sq != 0.0 {
            param = dot / len_sq;
        }
        let (xx, yy) = match param {
            p if p < 0.0 => (x1, y1),              //start is the closest point
            p if p > 1.0 => (x2, y2),              //end is the closest point
            _ => (x1 + param * c, y1 + param * d), //closest point is on the edge
        };

        Point(xx, yy)
    }

    pub fn sq_distance_to(&self, point: &Point) -> f64 {
        point.sq_distance_to(&self.closest_point_on_edge(point))
    }

    /// True if both edges cross each other at a single point interior to both,
    /// at least `epsilon` (in parameter space) away from all endpoints.
    /// Touching at an endpoint and collinear overlap do not count as crossing.
    pub fn crosses(&self, other: &Edge, epsilon: f64) -> bool {
        match edge_intersection(self, other) {
            Some((t, u)) => t > epsilon && t < 1.0 - epsilon && u > epsilon && u < 1.0 - epsilon,
            None => false,
        }
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        match edge_intersection(self, other) {
            Some((t, u)) => (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u),
            None => false,
        }
    }
}

/// Parameters `(t, u)` of the intersection of the lines through both edges,
/// with `t` measured along `e1` from its start and `u` along `e2` from its start.
/// `None` for parallel edges or when the bounding boxes are disjoint.
#[inline(always)]
fn edge_intersection(e1: &Edge, e2: &Edge) -> Option<(f64, f64)> {
    if f64::max(e1.x_min(), e2.x_min()) > f64::min(e1.x_max(), e2.x_max())
        || f64::max(e1.y_min(), e2.y_min()) > f64::min(e1.y_max(), e2.y_max())
    {
        //bounding boxes do not overlap
        return None;
    }

    //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
    let Point(x1, y1) = e1.start;
    let Point(x2, y2) = e1.end;
    let Point(x3, y3) = e2.start;
    let Point(x4, y4) = e2.end;

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        //parallel edges
        return None;
    }
    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;
    Some((t, u))
}
