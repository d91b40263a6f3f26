use std::borrow::Borrow;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::error::GeometryError;
use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::{Edge, Point, Rect};
use crate::util::FPA;

/// Closed outline of a die line: a simple polygon without holes.
/// Vertices are stored counterclockwise, without a repeated closing vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    /// Set of points that form the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Area of its interior
    pub area: f64,
}

impl Outline {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate(p.0, p.1));
        }
        //drop consecutive duplicates and an explicit closing vertex
        let mut points = points.into_iter().dedup().collect_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }

        let area = match Outline::calculate_signed_area(&points) {
            0.0 => return Err(GeometryError::ZeroArea),
            area if area < 0.0 => {
                //vertices should always be ordered counterclockwise (positive area)
                points.reverse();
                -area
            }
            area => area,
        };
        let bbox = Outline::generate_bounding_box(&points)?;

        Ok(Outline {
            vertices: points,
            bbox,
            area,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Copy of `self`, translated so that the min corner of its bounding box lies at the origin.
    pub fn normalized(&self) -> Self {
        let t = Transformation::from_translation((-self.bbox.x_min, -self.bbox.y_min));
        self.transform_clone(&t)
    }

    pub fn generate_bounding_box(points: &[Point]) -> Result<Rect, GeometryError> {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect::try_new(x_min, y_min, x_max, y_max).map_err(|_| GeometryError::ZeroArea)
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_signed_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let Point(x_i, y_i) = points[i];
            let Point(x_j, y_j) = points[j];

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// Shortest distance from `point` to any edge of the outline.
    pub fn distance_to_boundary(&self, point: &Point) -> f64 {
        self.edge_iter()
            .map(|edge| OrderedFloat(edge.sq_distance_to(point)))
            .min()
            .map_or(f64::INFINITY, |d| d.0.sqrt())
    }

    /// True if `point` lies inside the outline, more than `epsilon` away from its boundary.
    pub fn strictly_contains(&self, point: &Point, epsilon: f64) -> bool {
        self.collides_with(point) && self.distance_to_boundary(point) > epsilon
    }

    /// A point inside the outline.
    /// The centroid if it lies inside, otherwise the middle of the first interior
    /// span of a horizontal scanline through the centroid.
    pub fn interior_point(&self) -> Point {
        let centroid = self.centroid();
        if self.strictly_contains(&centroid, 0.0) {
            return centroid;
        }
        let y = centroid.1;
        let crossings = self
            .edge_iter()
            .filter(|e| (e.start.1 <= y) != (e.end.1 <= y))
            .map(|e| {
                let t = (y - e.start.1) / (e.end.1 - e.start.1);
                e.start.0 + t * (e.end.0 - e.start.0)
            })
            .sorted_by_key(|x| OrderedFloat(*x))
            .collect_vec();
        match crossings.as_slice() {
            [x0, x1, ..] => Point((x0 + x1) / 2.0, y),
            _ => centroid,
        }
    }
}

impl Shape for Outline {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area;
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = if i == self.n_vertices() - 1 { 0 } else { i + 1 };
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        Point(c_x, c_y)
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for Outline {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let Outline {
            vertices,
            bbox,
            area: _,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //rigid transformations keep the bounding box valid
        if let Ok(new_bbox) = Outline::generate_bounding_box(vertices) {
            *bbox = new_bbox;
        }

        self
    }
}

impl CollidesWith<Point> for Outline {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        if !self.bbox.collides_with(point) {
            return false;
        }
        //horizontal ray shot to the right.
        //Starting from the point to another point that is certainly outside the shape
        let point_outside = Point(self.bbox.x_max + self.bbox.width(), point.1);
        let ray = Edge {
            start: *point,
            end: point_outside,
        };

        let mut n_intersections = 0;
        for edge in self.edge_iter() {
            //Check if the ray does not go through (or almost through) a vertex
            //This can result in funky behaviour, which could incorrect results
            //Therefore we handle this case
            let (s_x, s_y) = (FPA(edge.start.0), FPA(edge.start.1));
            let (e_x, e_y) = (FPA(edge.end.0), FPA(edge.end.1));
            let (p_x, p_y) = (FPA(point.0), FPA(point.1));

            if (s_y == p_y && s_x > p_x) || (e_y == p_y && e_x > p_x) {
                //in this case, the ray passes through (or dangerously close to) a vertex
                //We handle this case by only counting an intersection if the edge is below the ray
                if s_y < p_y || e_y < p_y {
                    n_intersections += 1;
                }
            } else if ray.collides_with(&edge) {
                n_intersections += 1;
            }
        }
        n_intersections % 2 == 1
    }
}

impl<T> From<T> for Outline
where
    T: Borrow<Rect>,
{
    fn from(r: T) -> Self {
        let r = r.borrow();
        Outline {
            vertices: vec![
                Point(r.x_min, r.y_min),
                Point(r.x_max, r.y_min),
                Point(r.x_max, r.y_max),
                Point(r.x_min, r.y_max),
            ],
            bbox: *r,
            area: r.width() * r.height(),
        }
    }
}
