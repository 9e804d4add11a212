use nalgebra::{Matrix3, Point3};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// One of the three coordinate axes a rigid rotation can be taken about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in the order rotation batches are generated.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid axis string")]
pub struct ParseAxisError;

impl FromStr for Axis {
    type Err = ParseAxisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(ParseAxisError),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::X => "X",
                Self::Y => "Y",
                Self::Z => "Z",
            }
        )
    }
}

pub fn degrees_to_radians(degrees: i32) -> f64 {
    f64::from(degrees) * PI / 180.0
}

/// A 3x3 transformation matrix applied to atom positions about the origin.
///
/// No translation component exists; composing rotations means applying
/// several matrices one after another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XformMatrix(Matrix3<f64>);

impl XformMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Wraps an arbitrary matrix. The caller is responsible for it being a rigid rotation
    /// if bond geometry is expected to keep its lengths.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self(matrix)
    }

    /// Builds the rotation of `degrees` about the X axis.
    ///
    /// Rows: `[1, 0, 0]`, `[0, cos, -sin]`, `[0, sin, cos]`.
    pub fn x_rotation(degrees: i32) -> Self {
        let (sin, cos) = degrees_to_radians(degrees).sin_cos();
        Self(Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, cos, -sin, //
            0.0, sin, cos,
        ))
    }

    /// Builds the rotation of `degrees` about the Y axis.
    ///
    /// Rows: `[cos, 0, sin]`, `[0, 1, 0]`, `[-sin, 0, cos]`.
    pub fn y_rotation(degrees: i32) -> Self {
        let (sin, cos) = degrees_to_radians(degrees).sin_cos();
        Self(Matrix3::new(
            cos, 0.0, sin, //
            0.0, 1.0, 0.0, //
            -sin, 0.0, cos,
        ))
    }

    /// Builds the rotation of `degrees` about the Z axis.
    ///
    /// Rows: `[cos, -sin, 0]`, `[sin, cos, 0]`, `[0, 0, 1]`.
    pub fn z_rotation(degrees: i32) -> Self {
        let (sin, cos) = degrees_to_radians(degrees).sin_cos();
        Self(Matrix3::new(
            cos, -sin, 0.0, //
            sin, cos, 0.0, //
            0.0, 0.0, 1.0,
        ))
    }

    pub fn rotation(axis: Axis, degrees: i32) -> Self {
        match axis {
            Axis::X => Self::x_rotation(degrees),
            Axis::Y => Self::y_rotation(degrees),
            Axis::Z => Self::z_rotation(degrees),
        }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.0
    }

    /// Returns the matrix-vector product of this matrix and `point`.
    ///
    /// All three output components are computed from the input coordinates,
    /// never from partially updated ones.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.0 * point.coords)
    }
}

impl Default for XformMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Geometry of a bond as seen when projected onto the XY plane.
///
/// `len`, `dx` and `dy` ignore z entirely; `z` is the mean depth of the two
/// endpoints and is what bonds are depth-sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BondGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Average z-coordinate of the two endpoints.
    pub z: f64,
    /// Planar (x, y only) distance between the endpoints.
    pub len: f64,
    /// Unit direction from the first endpoint to the second, x component.
    pub dx: f64,
    /// Unit direction from the first endpoint to the second, y component.
    pub dy: f64,
}

impl BondGeometry {
    /// True when both endpoints project onto the same XY point.
    ///
    /// The direction of such a bond is undefined and is reported as `(0, 0)`.
    pub fn is_degenerate(&self) -> bool {
        self.len == 0.0
    }
}

/// Computes the derived geometry of a bond from its two endpoint positions.
pub fn bond_geometry(p1: &Point3<f64>, p2: &Point3<f64>) -> BondGeometry {
    let len = ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt();
    let (dx, dy) = if len == 0.0 {
        trace!(x = p1.x, y = p1.y, "Bond endpoints coincide in the XY plane.");
        (0.0, 0.0)
    } else {
        ((p2.x - p1.x) / len, (p2.y - p1.y) / len)
    };

    BondGeometry {
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
        z: (p1.z + p2.z) / 2.0,
        len,
        dx,
        dy,
    }
}
