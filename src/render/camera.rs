use crate::geom::Vec3;

/// Distance from the eye to the centre of the view cube, in cube widths.
pub const DEFAULT_DISTANCE: f64 = 10.0;

/// Fraction of the shorter image edge spanned by one unit of screen space.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Position on the image plane; `depth` grows toward the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Perspective camera orbiting the origin.
///
/// The eye sits at elevation/azimuth (degrees) on a sphere of radius
/// `distance`, looking at the origin with the +Z axis pointing up. Azimuth is
/// measured in the XY plane from +X toward +Y; elevation from the XY plane
/// toward +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    elevation: f64,
    azimuth: f64,
    distance: f64,
    eye_dir: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    #[must_use]
    pub fn new(elevation: f64, azimuth: f64) -> Self {
        Self::with_distance(elevation, azimuth, DEFAULT_DISTANCE)
    }

    #[must_use]
    pub fn with_distance(elevation: f64, azimuth: f64, distance: f64) -> Self {
        let (sin_e, cos_e) = elevation.to_radians().sin_cos();
        let (sin_a, cos_a) = azimuth.to_radians().sin_cos();

        let eye_dir = Vec3::new(cos_e * cos_a, cos_e * sin_a, sin_e);
        let right = Vec3::new(-sin_a, cos_a, 0.0);
        let up = eye_dir.cross(right);

        Self {
            elevation,
            azimuth,
            distance,
            eye_dir,
            right,
            up,
        }
    }

    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Unit vector from the origin toward the eye.
    #[must_use]
    pub fn eye_dir(&self) -> Vec3 {
        self.eye_dir
    }

    /// Project a point given in view-cube coordinates.
    #[must_use]
    pub fn project(&self, v: Vec3) -> ScreenPoint {
        let depth = v.dot(self.eye_dir);
        let factor = self.distance / (self.distance - depth);
        ScreenPoint {
            x: v.dot(self.right) * factor,
            y: v.dot(self.up) * factor,
            depth,
        }
    }
}

/// Maps screen space onto pixel coordinates of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
        }
    }

    /// Pixel position with the origin at the top-left corner and y pointing
    /// down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_pixel(&self, p: ScreenPoint) -> (i32, i32) {
        let unit = f64::from(self.width.min(self.height)) * self.scale;
        let cx = f64::from(self.width) * 0.5;
        let cy = f64::from(self.height) * 0.5;
        (
            (cx + p.x * unit).round() as i32,
            (cy - p.y * unit).round() as i32,
        )
    }
}
