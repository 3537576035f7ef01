//! Wireframe renderings of a Calabi-Yau cross-section.
//!
//! The surface `z1^5 + z2^5 = 1` is sampled as 25 sheets over a 25×25 grid
//! of complex parameters, folded to three real coordinates by a projection
//! angle, fitted into an equal-aspect bounding cube and drawn as a
//! translucent wireframe seen from a given elevation/azimuth.
//!
//! ```no_run
//! use calabi_yau::{config::{FigureOptions, RenderParams}, render};
//!
//! let path = render::render_to_dir(
//!     RenderParams::default(),
//!     &FigureOptions::default(),
//!     std::path::Path::new("images"),
//! )?;
//! println!("{}", path.display());
//! # Ok::<(), calabi_yau::RenderError>(())
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

pub mod config;
pub mod error;
pub mod export;
pub mod geom;
pub mod render;

pub use error::{RenderError, RenderResult};

/// Install the process-wide logger.
///
/// Logs at `info` unless `RUST_LOG` says otherwise. Calling it again is a
/// no-op.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}
