use super::core::{BBox, Point3, Vec3};
use super::sheet::MeshSheet;

/// Closed interval on one axis.
pub type AxisLimits = (f64, f64);

/// Equal-aspect axis limits around a point cloud.
///
/// All three axes share the same half-range (half of the largest raw range
/// of the cloud) and each is centred on its own midpoint, so the view box is
/// a cube and the surface is drawn without distortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCube {
    pub center: Point3,
    pub half_range: f64,
}

impl BoundingCube {
    /// Cube around the finite points of `bbox`.
    #[must_use]
    pub fn from_bbox(bbox: BBox) -> Self {
        Self {
            center: bbox.center(),
            half_range: bbox.size().max_component() / 2.0,
        }
    }

    /// Cube around every finite point of every sheet.
    ///
    /// Returns `None` if the sheets hold no finite point at all.
    #[must_use]
    pub fn from_sheets(sheets: &[MeshSheet]) -> Option<Self> {
        let points = sheets.iter().flat_map(|s| s.points().iter().copied());
        BBox::from_finite_points(points).map(Self::from_bbox)
    }

    #[must_use]
    pub fn xlim(&self) -> AxisLimits {
        self.limits(self.center.x)
    }

    #[must_use]
    pub fn ylim(&self) -> AxisLimits {
        self.limits(self.center.y)
    }

    #[must_use]
    pub fn zlim(&self) -> AxisLimits {
        self.limits(self.center.z)
    }

    /// Edge length of the cube.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.half_range * 2.0
    }

    /// Map a point into the unit cube `[-0.5, 0.5]^3` centred on the origin.
    ///
    /// A zero-sized cube (single point cloud) maps everything to the origin.
    #[must_use]
    pub fn normalize(&self, p: Point3) -> Vec3 {
        let offset = p - self.center;
        let width = self.width();
        if width > 0.0 {
            offset.mul_scalar(1.0 / width)
        } else {
            Vec3::ZERO
        }
    }

    fn limits(&self, mid: f64) -> AxisLimits {
        (mid - self.half_range, mid + self.half_range)
    }
}
