//! Side outputs of a rendering: OBJ wireframe and text snapshot.
//!
//! The snapshot is a quantised, line-oriented dump of the scene intended for
//! golden comparisons: identical inputs always give byte-identical text.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::geom::{MeshSheet, Point3};
use crate::render::Scene;

const SNAPSHOT_QUANTIZE: f64 = 1e-6;
const SNAPSHOT_DECIMALS: usize = 6;

/// Write every sheet as an OBJ object made of `l` line elements.
///
/// Vertices are numbered globally across objects. Non-finite vertices are
/// still emitted to keep the numbering aligned with the grid, but no line
/// element references them.
pub fn write_obj<W: Write>(w: &mut W, sheets: &[MeshSheet]) -> io::Result<()> {
    writeln!(w, "# calabi-yau wireframe")?;
    let mut base = 1usize;
    for sheet in sheets {
        writeln!(w, "o sheet_{}_{}", sheet.index.k1, sheet.index.k2)?;
        for p in sheet.points() {
            writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
        }

        let cols = sheet.cols();
        let index_of = |row: usize, col: usize| base + row * cols + col;

        for col in 0..cols {
            let ids: Vec<usize> = (0..sheet.rows()).map(|row| index_of(row, col)).collect();
            write_line_elements(w, &sheet.column(col).collect::<Vec<_>>(), &ids)?;
        }
        for row in 0..sheet.rows() {
            let ids: Vec<usize> = (0..cols).map(|col| index_of(row, col)).collect();
            write_line_elements(w, sheet.row(row), &ids)?;
        }

        base += sheet.points().len();
    }
    Ok(())
}

fn write_line_elements<W: Write>(w: &mut W, points: &[Point3], ids: &[usize]) -> io::Result<()> {
    let mut start = 0;
    while start < points.len() {
        if !points[start].is_finite() {
            start += 1;
            continue;
        }
        let end = points[start..]
            .iter()
            .position(|p| !p.is_finite())
            .map_or(points.len(), |offset| start + offset);
        if end - start >= 2 {
            write!(w, "l")?;
            for id in &ids[start..end] {
                write!(w, " {id}")?;
            }
            writeln!(w)?;
        }
        start = end;
    }
    Ok(())
}

pub fn write_obj_file(path: &Path, sheets: &[MeshSheet]) -> RenderResult<()> {
    let file = File::create(path).map_err(|e| RenderError::io(path, e))?;
    let mut w = BufWriter::new(file);
    write_obj(&mut w, sheets).map_err(|e| RenderError::io(path, e))?;
    w.flush().map_err(|e| RenderError::io(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Quantised text dump of a scene.
#[must_use]
pub fn snapshot(scene: &Scene) -> String {
    let mut out = String::new();
    let params = scene.params;
    let _ = writeln!(out, "# calabi-yau snapshot v1");
    let _ = writeln!(
        out,
        "params elev={} azim={} alpha={}",
        params.elevation, params.azimuth, params.alpha
    );
    let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");

    let (rows, cols) = scene
        .sheets
        .first()
        .map_or((0, 0), |s| (s.rows(), s.cols()));
    let _ = writeln!(out, "grid {rows} {cols}");
    let _ = writeln!(out, "sheets {}", scene.sheets.len());

    write_point_line(&mut out, "cube.center", scene.cube.center);
    let _ = write!(out, "cube.half_range ");
    write_f64(&mut out, scene.cube.half_range);
    out.push('\n');
    let _ = writeln!(
        out,
        "diag.non_finite {}",
        scene.diagnostics.non_finite_point_count
    );

    for sheet in &scene.sheets {
        let _ = writeln!(out, "sheet {} {}", sheet.index.k1, sheet.index.k2);
        for p in sheet.points() {
            write_point_line(&mut out, "p", *p);
        }
    }

    out
}

pub fn write_snapshot_file(path: &Path, scene: &Scene) -> RenderResult<()> {
    fs::write(path, snapshot(scene)).map_err(|e| RenderError::io(path, e))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn quantize_f64(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
    if q == 0.0 { 0.0 } else { q }
}

fn write_f64(out: &mut String, value: f64) {
    let value = quantize_f64(value);
    let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
}

fn write_point_line(out: &mut String, prefix: &str, p: Point3) {
    let _ = write!(out, "{prefix} ");
    write_f64(out, p.x);
    out.push(' ');
    write_f64(out, p.y);
    out.push(' ');
    write_f64(out, p.z);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{quantize_f64, snapshot, write_obj};
    use crate::config::RenderParams;
    use crate::geom::{MeshSheet, ParamGrid, Point3, SheetIndex};
    use crate::render::Scene;

    #[test]
    fn quantize_normalizes_negative_zero() {
        assert_eq!(quantize_f64(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(quantize_f64(-1e-9).to_bits(), 0.0f64.to_bits());
        assert!(quantize_f64(f64::NAN).is_nan());
        assert!((quantize_f64(0.123_456_789) - 0.123_457).abs() < 1e-12);
    }

    #[test]
    fn snapshot_is_deterministic() {
        let grid = ParamGrid::new(5, 5);
        let params = RenderParams::default();
        let a = snapshot(&Scene::build_on(&grid, params).unwrap());
        let b = snapshot(&Scene::build_on(&grid, params).unwrap());
        assert_eq!(a, b);

        let lines: Vec<_> = a.lines().collect();
        assert_eq!(lines[0], "# calabi-yau snapshot v1");
        assert_eq!(lines[1], "params elev=32 azim=45 alpha=45");
        assert_eq!(lines[2], "quantize 1.0e-6");
        assert_eq!(lines[3], "grid 5 5");
        assert_eq!(lines[4], "sheets 25");
        assert_eq!(a.lines().filter(|l| l.starts_with("p ")).count(), 25 * 25);
        assert_eq!(a.lines().filter(|l| l.starts_with("sheet ")).count(), 25);
    }

    #[test]
    fn obj_lists_vertices_and_grid_lines() {
        let grid = ParamGrid::new(3, 2);
        let scene = Scene::build_on(&grid, RenderParams::default()).unwrap();
        let mut buf = Vec::new();
        write_obj(&mut buf, &scene.sheets).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("o ")).count(), 25);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 25 * 6);
        // 3 columns + 2 rows per sheet.
        assert_eq!(text.lines().filter(|l| l.starts_with("l ")).count(), 25 * 5);

        let first_sheet: Vec<_> = text
            .lines()
            .skip_while(|l| *l != "o sheet_0_0")
            .skip(1)
            .take_while(|l| !l.starts_with("o "))
            .filter(|l| l.starts_with("l "))
            .collect();
        assert_eq!(first_sheet, vec!["l 1 4", "l 2 5", "l 3 6", "l 1 2 3", "l 4 5 6"]);
        assert!(text.contains("o sheet_0_1\n"));
        assert!(text.contains("l 7 10\n"));
    }

    #[test]
    fn obj_skips_non_finite_vertices_in_lines() {
        let sheet = MeshSheet::from_points(
            SheetIndex::new(0, 0).unwrap(),
            1,
            4,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(f64::NAN, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
            ],
        )
        .unwrap();

        let mut buf = Vec::new();
        write_obj(&mut buf, &[sheet]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().filter(|l| l.starts_with("l ")).collect();
        assert_eq!(lines, vec!["l 1 2"]);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
    }
}
