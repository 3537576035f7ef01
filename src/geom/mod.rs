mod bounds;
mod core;
mod diagnostics;
mod grid;
mod sheet;

pub use bounds::{AxisLimits, BoundingCube};
pub use self::core::{BBox, Point3, Vec3};
pub use diagnostics::CloudDiagnostics;
pub use grid::{ParamGrid, THETA_RANGE, THETA_STEPS, XI_RANGE, XI_STEPS, linspace};
pub use sheet::{
    EXPONENT, MeshSheet, ProjectionAngle, ROOT_ORDER, SheetIndex, generate_sheet,
    generate_sheets, root_of_unity,
};
