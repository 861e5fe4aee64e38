//! # Autofig
//!
//! Figure-construction toolkit with automatic axis layout for
//! plotly-compatible rendering.
//!
//! Autofig assembles a complete declarative figure description — trace
//! list plus nested layout tree — from chart series. It computes axis
//! ranges and "nice" tick intervals automatically, synthesizes mirror and
//! minor companion axes (forced to render via invisible placeholder
//! traces), arranges subplot grids with optional range alignment, and
//! manages legends and titles. Rendering itself is delegated to the
//! external engine via the emitted JSON/HTML document.
//!
//! ## Quick Start
//!
//! ```rust
//! use autofig::prelude::*;
//!
//! # fn main() -> autofig::Result<()> {
//! let mut figure = Figure::new();
//! figure.add_scatter(
//!     Scatter::new()
//!         .x(&[0.0, 1.0, 2.0, 3.0])
//!         .y(&[0.0, 1.0, 4.0, 9.0])
//!         .name("squares")
//!         .build()?,
//! );
//! figure.set_x_title(&AxisTitle::new().name("Time").symbol("t").unit("s"));
//! figure.set_legend(LegendPosition::UpperLeft, &LegendOptions::default());
//!
//! figure.finalize()?;
//! let json = figure.to_json();
//! figure.cleanup()?;
//! # assert!(json["layout"]["xaxis"].is_object());
//! # Ok(())
//! # }
//! ```
//!
//! ## Subplots
//!
//! ```rust
//! use autofig::prelude::*;
//!
//! # fn main() -> autofig::Result<()> {
//! let cell = |k: f64| -> autofig::Result<SubplotCell> {
//!     Ok(Some(vec![Scatter::new().x(&[0.0, 1.0]).y(&[0.0, k]).build()?.into()]))
//! };
//!
//! let mut figure = Figure::new();
//! figure.subplots(
//!     vec![
//!         vec![cell(1.0)?, cell(2.0)?],
//!         vec![cell(3.0)?, cell(4.0)?],
//!     ],
//!     &SubplotOptions {
//!         align: Align { x: Some(AlignScheme::Each), y: None },
//!         ..SubplotOptions::default()
//!     },
//! )?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// ============================================================================
// Core Modules
// ============================================================================

/// Axis identifiers, selectors and per-axis style records.
pub mod axis;

/// Recursive deep-merge of nested JSON configuration trees.
pub mod merge;

/// Style presets for figure and axis appearance.
pub mod style;

/// Tick-interval heuristics.
pub mod ticks;

// ============================================================================
// Figure Modules
// ============================================================================

/// Chart trace types (scatter, heatmap).
pub mod traces;

/// The figure wrapper: layout tree, axis map, trace list, subplots.
pub mod figure;

/// Figure JSON assembly and HTML handoff.
pub mod render;

// ============================================================================
// Data Ingestion
// ============================================================================

/// Tabular column reader and quick plotting.
pub mod reader;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for autofig operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use autofig::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axis::{Axes, AxisId, Direction};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{
        Align, AlignScheme, AxisTitle, Figure, LegendOptions, LegendPosition, Share, SubplotCell,
        SubplotOptions,
    };
    pub use crate::reader::{ColumnFile, ReaderOptions, Series};
    pub use crate::render::{ExportConfig, ImageFormat};
    pub use crate::style::{Margin, Style, TickDirection};
    pub use crate::ticks::{LinearTicks, LogTicks};
    pub use crate::traces::{Heatmap, Scatter, Trace, TraceKind};
}
