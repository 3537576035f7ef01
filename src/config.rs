//! Render parameters, figure options and the batch plan.
//!
//! There are no configuration files: every knob has a typed default here and
//! the command line overrides the few that are exposed.

use std::path::PathBuf;

use crate::error::{RenderError, RenderResult};

/// Directory images are written to when none is given.
pub const DEFAULT_OUT_DIR: &str = "images";

/// File name prefix of every rendering.
pub const FILE_PREFIX: &str = "calabi_yau";

/// Camera and projection angles of one rendering, all in degrees.
///
/// Every angle must be finite; see [`RenderParams::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub elevation: f64,
    pub azimuth: f64,
    pub alpha: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            elevation: 32.0,
            azimuth: 45.0,
            alpha: 45.0,
        }
    }
}

impl RenderParams {
    #[must_use]
    pub const fn new(elevation: f64, azimuth: f64, alpha: f64) -> Self {
        Self {
            elevation,
            azimuth,
            alpha,
        }
    }

    /// Reject NaN and infinite angles, which have no file name and no view.
    pub fn validate(&self) -> RenderResult<()> {
        for (name, value) in [
            ("elevation", self.elevation),
            ("azimuth", self.azimuth),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() {
                return Err(RenderError::NonFiniteAngle { name, value });
            }
        }
        Ok(())
    }

    /// `calabi_yau_elev<E>_azim<A>_alpha<P>.png`, each angle truncated
    /// toward zero.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{FILE_PREFIX}_elev{}_azim{}_alpha{}.png",
            truncate(self.elevation),
            truncate(self.azimuth),
            truncate(self.alpha)
        )
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Raster and stroke settings of the output figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureOptions {
    /// Edge length of the square figure in inches.
    pub size_inches: f64,
    pub dpi: u32,
    pub background: [u8; 3],
    pub stroke: [u8; 3],
    pub stroke_opacity: f64,
    /// Stroke width in pixels.
    pub stroke_width: u32,
    /// Stamp the equation and parameter text blocks.
    pub annotate: bool,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            size_inches: 12.0,
            dpi: 100,
            background: [0, 0, 0],
            stroke: [255, 255, 255],
            stroke_opacity: 0.15,
            stroke_width: 1,
            annotate: true,
        }
    }
}

impl FigureOptions {
    /// Edge length of the image in pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> u32 {
        (self.size_inches * f64::from(self.dpi)).round().max(1.0) as u32
    }
}

/// Parameter sweep rendered by `--all`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub elevation: f64,
    pub azimuths: Vec<i32>,
    pub alphas: Vec<i32>,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            elevation: 32.0,
            azimuths: (0..360).step_by(15).collect(),
            alphas: (0..120).step_by(30).collect(),
        }
    }
}

impl BatchPlan {
    /// Every combination, outer loop over azimuth, inner loop over alpha.
    #[must_use]
    pub fn params(&self) -> Vec<RenderParams> {
        self.azimuths
            .iter()
            .flat_map(|&azim| {
                self.alphas.iter().map(move |&alpha| {
                    RenderParams::new(self.elevation, f64::from(azim), f64::from(alpha))
                })
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.azimuths.len() * self.alphas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a rendering goes and which side files accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub out_dir: PathBuf,
    pub obj: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            obj: None,
            snapshot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchPlan, FigureOptions, RenderParams};
    use crate::error::RenderError;
    use std::collections::HashSet;

    #[test]
    fn default_params_name_matches_convention() {
        let params = RenderParams::default();
        assert_eq!(params.file_name(), "calabi_yau_elev32_azim45_alpha45.png");
    }

    #[test]
    fn file_name_truncates_toward_zero() {
        let params = RenderParams::new(32.9, -15.7, 0.4);
        assert_eq!(params.file_name(), "calabi_yau_elev32_azim-15_alpha0.png");

        let params = RenderParams::new(-0.5, 359.99, 89.999);
        assert_eq!(params.file_name(), "calabi_yau_elev0_azim359_alpha89.png");
    }

    #[test]
    fn non_finite_angles_are_rejected() {
        assert!(RenderParams::default().validate().is_ok());
        assert!(RenderParams::new(-90.0, 720.0, 1e6).validate().is_ok());

        let err = RenderParams::new(f64::NAN, 45.0, 45.0)
            .validate()
            .expect_err("nan elevation");
        assert!(matches!(
            err,
            RenderError::NonFiniteAngle {
                name: "elevation",
                ..
            }
        ));

        let err = RenderParams::new(32.0, 45.0, f64::NEG_INFINITY)
            .validate()
            .expect_err("infinite alpha");
        assert!(matches!(err, RenderError::NonFiniteAngle { name: "alpha", .. }));
        assert!(err.to_string().contains("alpha"));
    }

    #[test]
    fn default_figure_is_1200_pixels() {
        assert_eq!(FigureOptions::default().pixel_size(), 1200);
    }

    #[test]
    fn batch_plan_covers_96_combinations() {
        let plan = BatchPlan::default();
        let params = plan.params();
        assert_eq!(plan.len(), 96);
        assert_eq!(params.len(), 96);
        assert!(params.iter().all(|p| p.elevation == 32.0));

        assert_eq!(params[0], RenderParams::new(32.0, 0.0, 0.0));
        assert_eq!(params[1], RenderParams::new(32.0, 0.0, 30.0));
        assert_eq!(params[4], RenderParams::new(32.0, 15.0, 0.0));
        assert_eq!(params[95], RenderParams::new(32.0, 345.0, 90.0));

        let names: HashSet<_> = params.iter().map(RenderParams::file_name).collect();
        assert_eq!(names.len(), 96);
    }
}
