//! Wireframe rendering of the surface to PNG.
//!
//! A render is a single pass:
//!
//! 1. build the 25 sheets for the requested projection angle ([`Scene::build`]),
//! 2. normalise them into the bounding cube and project each grid line
//!    through the elevation/azimuth [`Camera`],
//! 3. stroke the lines onto a `plotters` bitmap, stamp the equation and
//!    parameter text, and encode it as PNG.
//!
//! Every call opens its own drawing area and releases it once the file is
//! written, so batch renders share no canvas state.

mod annotation;
mod camera;
mod wireframe;

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::{BatchPlan, FigureOptions, RenderParams};
use crate::error::{RenderError, RenderResult};
use crate::geom::{BoundingCube, CloudDiagnostics, MeshSheet, ParamGrid, generate_sheets};

pub use annotation::{
    FONT_ENV, TextBlock, annotation_font, draw_annotations, equation_block, parameter_block,
    parameter_lines,
};
pub use camera::{Camera, DEFAULT_DISTANCE, DEFAULT_SCALE, ScreenPoint, Viewport};
pub use wireframe::{finite_runs, sheet_polylines};

/// Generated geometry of one rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    pub params: RenderParams,
    pub sheets: Vec<MeshSheet>,
    pub cube: BoundingCube,
    pub diagnostics: CloudDiagnostics,
}

impl Scene {
    /// Sheets on the standard 25×25 grid.
    pub fn build(params: RenderParams) -> RenderResult<Self> {
        Self::build_on(&ParamGrid::standard(), params)
    }

    pub fn build_on(grid: &ParamGrid, params: RenderParams) -> RenderResult<Self> {
        params.validate()?;
        let sheets = generate_sheets(grid, params.alpha);
        let diagnostics = CloudDiagnostics::from_sheets(&sheets);
        if !diagnostics.is_clean() {
            log::warn!("non-finite points left out of the view: {diagnostics}");
        }
        let cube = BoundingCube::from_sheets(&sheets).ok_or(RenderError::EmptyPointCloud)?;
        log::debug!(
            "bounding cube: x={:?} y={:?} z={:?}",
            cube.xlim(),
            cube.ylim(),
            cube.zlim()
        );

        Ok(Self {
            params,
            sheets,
            cube,
            diagnostics,
        })
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::new(self.params.elevation, self.params.azimuth)
    }

    /// Every grid line of every sheet in pixel coordinates, split at
    /// non-finite points.
    #[must_use]
    pub fn pixel_polylines(&self, viewport: &Viewport) -> Vec<Vec<(i32, i32)>> {
        let camera = self.camera();
        let mut out = Vec::new();
        for sheet in &self.sheets {
            for line in sheet_polylines(sheet) {
                for run in finite_runs(&line) {
                    out.push(
                        run.iter()
                            .map(|&p| viewport.to_pixel(camera.project(self.cube.normalize(p))))
                            .collect(),
                    );
                }
            }
        }
        out
    }
}

/// Paint `scene` onto `area`: background, wireframe, then the text blocks
/// unless `figure.annotate` is off.
pub fn paint_scene<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
    figure: &FigureOptions,
) -> RenderResult<()> {
    let [r, g, b] = figure.background;
    area.fill(&RGBColor(r, g, b)).map_err(RenderError::backend)?;

    let [r, g, b] = figure.stroke;
    let style = RGBColor(r, g, b)
        .mix(figure.stroke_opacity)
        .stroke_width(figure.stroke_width);

    let (width, height) = area.dim_in_pixel();
    let lines = scene.pixel_polylines(&Viewport::new(width, height));
    log::debug!("stroking {} polylines", lines.len());
    for line in lines {
        area.draw(&PathElement::new(line, style))
            .map_err(RenderError::backend)?;
    }

    if figure.annotate {
        draw_annotations(area, scene.params, figure)?;
    }
    Ok(())
}

/// Paint `scene` onto a square bitmap and save it at `path`.
///
/// The image format follows the file extension; an existing file is
/// replaced.
pub fn draw_scene(scene: &Scene, figure: &FigureOptions, path: &Path) -> RenderResult<()> {
    let size = figure.pixel_size();
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    paint_scene(&root, scene, figure)?;
    root.present().map_err(RenderError::backend)
}

/// Paint `scene` into memory; three bytes (RGB) per pixel, row-major.
pub fn draw_to_buffer(scene: &Scene, figure: &FigureOptions) -> RenderResult<Vec<u8>> {
    let size = figure.pixel_size();
    let side = usize::try_from(size).map_err(RenderError::backend)?;
    let mut buffer = vec![0; side * side * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (size, size)).into_drawing_area();
        paint_scene(&root, scene, figure)?;
        root.present().map_err(RenderError::backend)?;
    }
    Ok(buffer)
}

/// Render one view into `out_dir` and return the written path.
///
/// The directory must exist already; it is not created.
pub fn render_to_dir(
    params: RenderParams,
    figure: &FigureOptions,
    out_dir: &Path,
) -> RenderResult<PathBuf> {
    let scene = Scene::build(params)?;
    render_scene_to_dir(&scene, figure, out_dir)
}

/// Like [`render_to_dir`] for a scene that is already built.
pub fn render_scene_to_dir(
    scene: &Scene,
    figure: &FigureOptions,
    out_dir: &Path,
) -> RenderResult<PathBuf> {
    if !out_dir.is_dir() {
        return Err(RenderError::MissingOutputDir(out_dir.to_path_buf()));
    }
    let params = scene.params;
    log::info!(
        "generating: elev={} azim={} alpha={}",
        params.elevation,
        params.azimuth,
        params.alpha
    );

    let path = out_dir.join(params.file_name());
    draw_scene(scene, figure, &path)?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Render every combination of `plan` sequentially; stops at the first
/// failure.
pub fn render_batch(
    plan: &BatchPlan,
    figure: &FigureOptions,
    out_dir: &Path,
) -> RenderResult<Vec<PathBuf>> {
    if !out_dir.is_dir() {
        return Err(RenderError::MissingOutputDir(out_dir.to_path_buf()));
    }
    log::info!("batch: {} renderings into {}", plan.len(), out_dir.display());
    plan.params()
        .into_iter()
        .map(|params| render_to_dir(params, figure, out_dir))
        .collect()
}
