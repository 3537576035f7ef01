//! Point-cloud diagnostics.
//!
//! The sheet map is evaluated without guards, so a degenerate parameter
//! (e.g. a zero base raised to a fractional power on a different complex
//! library) may yield NaN or infinite coordinates. Those points are kept in
//! the sheets, drawn as gaps and left out of the bounding cube. This module
//! counts them so the caller can report what was dropped.

use std::fmt;

use super::sheet::{MeshSheet, SheetIndex};

/// Summary of a generated point cloud.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CloudDiagnostics {
    /// Number of sheets inspected.
    pub sheet_count: usize,

    /// Total number of points across all sheets.
    pub point_count: usize,

    /// Points with at least one NaN or infinite coordinate.
    pub non_finite_point_count: usize,

    /// Sheets containing non-finite points, with their counts.
    pub non_finite_sheets: Vec<(SheetIndex, usize)>,
}

impl CloudDiagnostics {
    #[must_use]
    pub fn from_sheets(sheets: &[MeshSheet]) -> Self {
        let mut diag = Self {
            sheet_count: sheets.len(),
            ..Self::default()
        };

        for sheet in sheets {
            diag.point_count += sheet.points().len();
            let bad = sheet.points().iter().filter(|p| !p.is_finite()).count();
            if bad > 0 {
                diag.non_finite_point_count += bad;
                diag.non_finite_sheets.push((sheet.index, bad));
            }
        }

        diag
    }

    /// True when every point is finite.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.non_finite_point_count == 0
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CloudDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sheets={} points={} non_finite={}",
            self.sheet_count, self.point_count, self.non_finite_point_count
        )?;
        for (index, count) in &self.non_finite_sheets {
            write!(f, " [k1={} k2={}: {count}]", index.k1, index.k2)?;
        }
        Ok(())
    }
}
