//! Sheets of the cross-section `z1^5 + z2^5 = 1`.
//!
//! Each sheet is the image of the parameter grid under
//!
//! ```text
//! z1 = exp(2πi·k1/5) · cosh(w)^(2/5)
//! z2 = exp(2πi·k2/5) · sinh(w)^(2/5)
//! ```
//!
//! for one pair of fifth-root indices `(k1, k2)`. The four real coordinates
//! of `(z1, z2)` are folded into three: `X = Re z1`, `Y = Re z2` and a depth
//! axis `Z = cos α · Im z1 + sin α · Im z2` controlled by the projection
//! angle α.
//!
//! Complex powers use the principal branch of [`Complex64::powf`]: the
//! argument lies in `(-π, π]` and `0^(2/5)` evaluates to `0`.

use std::f64::consts::TAU;

use num_complex::Complex64;

use super::core::Point3;
use super::grid::ParamGrid;

/// Degree of the surface and number of roots of unity per coordinate.
pub const ROOT_ORDER: u32 = 5;

/// Exponent applied to `cosh(w)` and `sinh(w)`.
pub const EXPONENT: f64 = 2.0 / ROOT_ORDER as f64;

/// Selects one branch combination via a pair of fifth roots of unity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetIndex {
    pub k1: u32,
    pub k2: u32,
}

impl SheetIndex {
    /// Returns `None` when either index is outside `[0, ROOT_ORDER)`.
    #[must_use]
    pub const fn new(k1: u32, k2: u32) -> Option<Self> {
        if k1 < ROOT_ORDER && k2 < ROOT_ORDER {
            Some(Self { k1, k2 })
        } else {
            None
        }
    }

    /// All index pairs, outer loop over `k1`, inner loop over `k2`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROOT_ORDER).flat_map(|k1| (0..ROOT_ORDER).map(move |k2| Self { k1, k2 }))
    }

    #[must_use]
    pub fn phase1(self) -> Complex64 {
        root_of_unity(self.k1)
    }

    #[must_use]
    pub fn phase2(self) -> Complex64 {
        root_of_unity(self.k2)
    }

    /// Lift a parameter `w` onto this sheet, returning `(z1, z2)`.
    #[must_use]
    pub fn lift(self, w: Complex64) -> (Complex64, Complex64) {
        let z1 = self.phase1() * w.cosh().powf(EXPONENT);
        let z2 = self.phase2() * w.sinh().powf(EXPONENT);
        (z1, z2)
    }
}

/// `exp(2πi·k/5)`.
#[must_use]
pub fn root_of_unity(k: u32) -> Complex64 {
    Complex64::new(0.0, TAU * f64::from(k) / f64::from(ROOT_ORDER)).exp()
}

/// Mixing weights of the depth axis for a projection angle in degrees.
///
/// Angles that are whole multiples of 90° get exact `0`/`±1` weights, so at
/// α = 0 the depth is exactly `Im z1` and at α = 90 exactly `Im z2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionAngle {
    pub degrees: f64,
    pub cos: f64,
    pub sin: f64,
}

impl ProjectionAngle {
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        let (sin, cos) = exact_sin_cos_degrees(degrees);
        Self { degrees, cos, sin }
    }

    /// Depth coordinate for a lifted pair.
    #[must_use]
    pub fn depth(self, z1: Complex64, z2: Complex64) -> f64 {
        self.cos * z1.im + self.sin * z2.im
    }

    #[must_use]
    pub fn project(self, z1: Complex64, z2: Complex64) -> Point3 {
        Point3::new(z1.re, z2.re, self.depth(z1, z2))
    }
}

fn exact_sin_cos_degrees(degrees: f64) -> (f64, f64) {
    if degrees.is_finite() && degrees % 90.0 == 0.0 {
        match degrees.rem_euclid(360.0) as u32 {
            0 => return (0.0, 1.0),
            90 => return (1.0, 0.0),
            180 => return (0.0, -1.0),
            270 => return (-1.0, 0.0),
            _ => {}
        }
    }
    degrees.to_radians().sin_cos()
}

/// One sheet of the surface sampled on a [`ParamGrid`].
///
/// Points are stored row-major with the grid's layout: rows follow θ and
/// columns follow ξ.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSheet {
    pub index: SheetIndex,
    rows: usize,
    cols: usize,
    points: Vec<Point3>,
}

impl MeshSheet {
    /// Wrap precomputed points; `None` unless `points.len() == rows * cols`.
    #[must_use]
    pub fn from_points(
        index: SheetIndex,
        rows: usize,
        cols: usize,
        points: Vec<Point3>,
    ) -> Option<Self> {
        (points.len() == rows * cols).then_some(Self {
            index,
            rows,
            cols,
            points,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> Point3 {
        self.points[row * self.cols + col]
    }

    /// Points with fixed θ, ordered by ξ.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Point3] {
        let start = row * self.cols;
        &self.points[start..start + self.cols]
    }

    /// Points with fixed ξ, ordered by θ.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Point3> + '_ {
        self.points.iter().skip(col).step_by(self.cols.max(1)).copied()
    }
}

#[must_use]
pub fn generate_sheet(grid: &ParamGrid, index: SheetIndex, angle: ProjectionAngle) -> MeshSheet {
    let points = grid
        .iter()
        .map(|w| {
            let (z1, z2) = index.lift(w);
            angle.project(z1, z2)
        })
        .collect();

    MeshSheet {
        index,
        rows: grid.rows(),
        cols: grid.cols(),
        points,
    }
}

/// Every sheet of the surface for projection angle `alpha_deg`, in
/// [`SheetIndex::all`] order.
#[must_use]
pub fn generate_sheets(grid: &ParamGrid, alpha_deg: f64) -> Vec<MeshSheet> {
    let angle = ProjectionAngle::from_degrees(alpha_deg);
    log::debug!(
        "generating {} sheets on a {}x{} grid (alpha={alpha_deg})",
        ROOT_ORDER * ROOT_ORDER,
        grid.rows(),
        grid.cols()
    );
    SheetIndex::all()
        .map(|index| generate_sheet(grid, index, angle))
        .collect()
}
