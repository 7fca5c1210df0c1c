//! # volviz_render: Figure Specifications for an External Renderer
//!
//! The rendering collaborator is treated as a black box. This crate builds
//! the data handed to it: plotly-compatible figure JSON, with all styling
//! carried in an explicit [`FigureStyle`] value rather than process-wide
//! state. Nothing flows back from the renderer.
//!
//! ## Modules
//!
//! - [`style`]: Themes and figure dimensions
//! - [`figure`]: Serialisable figure, trace and layout types
//! - [`charts`]: Line, regression and surface chart builders
//! - [`sink`]: Figure destinations (JSON/HTML files, memory)
//! - [`error`]: `RenderError`
//!
//! ## Usage
//!
//! ```
//! use volviz_render::prelude::*;
//!
//! let x = AxisValues::Numbers(vec![0.0, 1.0, 2.0]);
//! let series = [
//!     NamedSeries::primary("level", vec![1.0, 1.1, 1.2]),
//!     NamedSeries::secondary("vol", vec![0.2, 0.19, 0.21]),
//! ];
//! let figure = line_chart("Levels", x, &series, &FigureStyle::default()).unwrap();
//! assert_eq!(figure.data.len(), 2);
//!
//! let sink = MemorySink::new();
//! sink.send("levels", &figure).unwrap();
//! assert_eq!(sink.len(), 1);
//! ```

pub mod charts;
pub mod error;
pub mod figure;
pub mod sink;
pub mod style;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::charts::{line_chart, regression_chart, surface_chart, AxisTitles, NamedSeries};
    pub use crate::error::{RenderError, RenderResult};
    pub use crate::figure::{Annotation, AxisSide, AxisValues, Figure, Layout, Trace};
    pub use crate::sink::{FigureFormat, FigureSink, FileSink, MemorySink, WrittenFigure};
    pub use crate::style::{ChartTheme, FigureStyle};
}
