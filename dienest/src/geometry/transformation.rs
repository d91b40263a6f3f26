use crate::geometry::geo_enums::Rotation;
use crate::geometry::primitives::Point;

//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

/// Proper rigid transformation in matrix form, restricted to quarter-turn rotations and translations.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    matrix: [[f64; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            matrix: rot_m(rotation),
        }
    }

    pub fn rotate(mut self, rotation: Rotation) -> Self {
        self.matrix = dot_prod(&rot_m(rotation), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matrix == EMPTY_MATRIX
    }

    pub fn apply(&self, Point(x, y): Point) -> Point {
        let m = &self.matrix;
        let t_x = m[0][0] * x + m[0][1] * y + m[0][2];
        let t_y = m[1][0] * x + m[1][1] * y + m[1][2];
        Point(t_x, t_y)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::empty()
    }
}

const EMPTY_MATRIX: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn rot_m(rotation: Rotation) -> [[f64; 3]; 3] {
    let (cos, sin) = rotation.cos_sin();
    [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[f64; 3]; 3] {
    [[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]]
}

fn dot_prod(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut c = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                c[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    c
}
