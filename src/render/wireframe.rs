use crate::geom::{MeshSheet, Point3};

/// Grid lines of a sheet: one polyline per column (through all rows), then
/// one per row (through all columns).
#[must_use]
pub fn sheet_polylines(sheet: &MeshSheet) -> Vec<Vec<Point3>> {
    let mut lines = Vec::with_capacity(sheet.rows() + sheet.cols());
    for col in 0..sheet.cols() {
        lines.push(sheet.column(col).collect());
    }
    for row in 0..sheet.rows() {
        lines.push(sheet.row(row).to_vec());
    }
    lines
}

/// Maximal runs of finite points with at least two vertices.
///
/// A non-finite point breaks the line, leaving a gap where it would have
/// been drawn.
#[must_use]
pub fn finite_runs(line: &[Point3]) -> Vec<&[Point3]> {
    line.split(|p| !p.is_finite())
        .filter(|run| run.len() >= 2)
        .collect()
}
