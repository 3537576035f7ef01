//! Text blocks stamped onto the top-left corner of every image.
//!
//! `plotters` rasterises text through `ab_glyph`, which needs the font bytes
//! registered up front. The face is looked up once per process: the file
//! named by [`FONT_ENV`] first, then a few well-known monospace fonts. When
//! none can be loaded the images are written without text.

use std::path::PathBuf;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use crate::config::{FigureOptions, RenderParams};
use crate::error::{RenderError, RenderResult};

/// Environment variable naming a TrueType/OpenType font for the text blocks.
pub const FONT_ENV: &str = "CALABI_YAU_FONT";

const FONT_FAMILY: &str = "calabi-yau-annotation";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Andale Mono.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Baseline-to-baseline distance as a multiple of the font size.
const LINE_SPACING: f64 = 1.2;

/// Lines of text anchored at a fraction of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Top-left corner as `(x, y)` figure fractions, `y` measured upward
    /// from the bottom edge.
    pub anchor: (f64, f64),
    /// Font size in points.
    pub size_pt: f64,
    pub color: [u8; 3],
    pub lines: Vec<String>,
}

impl TextBlock {
    /// Pixel position of the first line's top-left corner.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn origin(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (self.anchor.0 * f64::from(width)).round() as i32,
            ((1.0 - self.anchor.1) * f64::from(height)).round() as i32,
        )
    }

    #[must_use]
    pub fn size_px(&self, dpi: u32) -> f64 {
        self.size_pt * f64::from(dpi) / 72.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn line_step(&self, dpi: u32) -> i32 {
        (self.size_px(dpi) * LINE_SPACING).round() as i32
    }
}

/// Title, defining equation and projection formula, in white.
#[must_use]
pub fn equation_block() -> TextBlock {
    TextBlock {
        anchor: (0.02, 0.92),
        size_pt: 14.0,
        color: [255, 255, 255],
        lines: vec![
            "Calabi-Yau Cross Section".to_string(),
            "z₁⁵ + z₂⁵ = 1".to_string(),
            "Proj: Z = cos(α)·Im(z₁) + sin(α)·Im(z₂)".to_string(),
        ],
    }
}

/// The three angles of `params`, in cyan below the equation block.
#[must_use]
pub fn parameter_block(params: RenderParams) -> TextBlock {
    TextBlock {
        anchor: (0.02, 0.82),
        size_pt: 12.0,
        color: [0, 255, 255],
        lines: parameter_lines(params).to_vec(),
    }
}

/// Angles right-aligned to six characters with one decimal.
#[must_use]
pub fn parameter_lines(params: RenderParams) -> [String; 3] {
    [
        format!("Projection Alpha: {:>6.1}°", params.alpha),
        format!("Camera Azimuth:   {:>6.1}°", params.azimuth),
        format!("Camera Elevation: {:>6.1}°", params.elevation),
    ]
}

/// Family name of the registered annotation font, if one could be loaded.
pub fn annotation_font() -> Option<&'static str> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    REGISTERED
        .get_or_init(register_annotation_font)
        .then_some(FONT_FAMILY)
}

fn register_annotation_font() -> bool {
    let from_env = std::env::var_os(FONT_ENV).map(PathBuf::from);
    let candidates = from_env
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // ab_glyph keeps a reference to the face for the rest of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        if register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok() {
            log::debug!("annotation font: {}", path.display());
            return true;
        }
        log::warn!("{} is not a usable font", path.display());
    }

    log::warn!("no annotation font found (set {FONT_ENV}); images carry no text");
    false
}

/// Draw the equation and parameter blocks onto `area`.
pub fn draw_annotations<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    params: RenderParams,
    figure: &FigureOptions,
) -> RenderResult<()> {
    let Some(family) = annotation_font() else {
        return Ok(());
    };
    let (width, height) = area.dim_in_pixel();

    for block in [equation_block(), parameter_block(params)] {
        let [r, g, b] = block.color;
        let style = (family, block.size_px(figure.dpi))
            .into_font()
            .color(&RGBColor(r, g, b));
        let (x, mut y) = block.origin(width, height);
        let step = block.line_step(figure.dpi);
        for line in &block.lines {
            area.draw(&Text::new(line.as_str(), (x, y), style.clone()))
                .map_err(RenderError::backend)?;
            y += step;
        }
    }
    Ok(())
}
