//! Chart builders.
//!
//! Each builder validates that its inputs line up, then assembles a
//! [`Figure`] for the external renderer.

use tracing::debug;
use volviz_core::market_data::VolSurfaceTable;
use volviz_core::math::LinearFit;
use volviz_core::StatsError;

use crate::error::RenderResult;
use crate::figure::{Annotation, AxisLayout, AxisSide, AxisValues, Figure, Layout, Scene, SurfaceTrace, Trace};
use crate::style::FigureStyle;

/// A named series assigned to a y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    /// Legend name
    pub name: String,
    /// Values aligned with the x axis
    pub values: Vec<f64>,
    /// Target axis
    pub axis: AxisSide,
}

impl NamedSeries {
    /// Series on the primary axis.
    pub fn primary(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            axis: AxisSide::Primary,
        }
    }

    /// Series on the secondary axis.
    pub fn secondary(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            axis: AxisSide::Secondary,
        }
    }
}

/// Axis titles for a 2-D or 3-D chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisTitles {
    /// X axis title
    pub x: String,
    /// Y axis title
    pub y: String,
    /// Secondary y (2-D) or z (3-D) axis title
    pub extra: String,
}

impl AxisTitles {
    /// Build from three titles.
    pub fn new(x: impl Into<String>, y: impl Into<String>, extra: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            extra: extra.into(),
        }
    }
}

/// Line chart of one or more series over a shared x axis.
///
/// A secondary y axis is added when any series is assigned to it; its title
/// is that series' name.
///
/// # Errors
///
/// `StatsError::ShapeMismatch` if any series length differs from `x`.
pub fn line_chart(
    title: &str,
    x: AxisValues,
    series: &[NamedSeries],
    style: &FigureStyle,
) -> RenderResult<Figure> {
    for s in series {
        if s.values.len() != x.len() {
            return Err(StatsError::shape(format!("line series '{}'", s.name), x.len(), s.values.len()).into());
        }
    }

    let mut layout = Layout::new(title, style);
    if let Some(primary) = series.iter().find(|s| s.axis == AxisSide::Primary) {
        layout.yaxis = Some(AxisLayout::titled(primary.name.clone()));
    }
    if let Some(secondary) = series.iter().find(|s| s.axis == AxisSide::Secondary) {
        layout.yaxis2 = Some(AxisLayout::secondary(secondary.name.clone()));
    }

    let mut figure = Figure::new(layout);
    for s in series {
        figure.add_trace(Trace::line(s.name.clone(), x.clone(), s.values.clone(), s.axis));
    }

    debug!(title, traces = figure.data.len(), points = x.len(), "Built line chart");
    Ok(figure)
}

/// Scatter of `(x, y)` with the fitted line drawn across the x range.
///
/// The annotation, if any, is placed at caller-chosen plot coordinates.
///
/// # Errors
///
/// `StatsError::ShapeMismatch` if `x` and `y` differ in length.
pub fn regression_chart(
    title: &str,
    x: &[f64],
    y: &[f64],
    fit: &LinearFit,
    titles: &AxisTitles,
    annotation: Option<Annotation>,
    style: &FigureStyle,
) -> RenderResult<Figure> {
    if x.len() != y.len() {
        return Err(StatsError::shape("regression chart", x.len(), y.len()).into());
    }

    let mut layout = Layout::new(title, style);
    layout.xaxis = Some(AxisLayout::titled(titles.x.clone()));
    layout.yaxis = Some(AxisLayout::titled(titles.y.clone()));

    let mut figure = Figure::new(layout);
    figure.add_trace(Trace::markers("observations", x.to_vec(), y.to_vec()));

    let finite = x.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo <= hi {
        let line_x = vec![lo, hi];
        let line_y = fit.fitted_line(&line_x);
        figure.add_trace(Trace::line(
            format!("fit: {}", fit.equation(4)),
            AxisValues::Numbers(line_x),
            line_y,
            AxisSide::Primary,
        ));
    }

    if let Some(annotation) = annotation {
        figure.add_annotation(annotation);
    }

    debug!(title, points = x.len(), slope = fit.slope, "Built regression chart");
    Ok(figure)
}

/// 3-D surface of a volatility table: moneyness across, dates deep.
///
/// Infallible: a [`VolSurfaceTable`] is rectangular by construction.
pub fn surface_chart(
    title: &str,
    table: &VolSurfaceTable,
    titles: &AxisTitles,
    style: &FigureStyle,
) -> Figure {
    let mut layout = Layout::new(title, style);
    layout.scene = Some(Scene {
        xaxis: AxisLayout::titled(titles.x.clone()),
        yaxis: AxisLayout::titled(titles.y.clone()),
        zaxis: AxisLayout::titled(titles.extra.clone()),
    });

    let mut figure = Figure::new(layout);
    figure.add_trace(Trace::Surface(SurfaceTrace {
        name: title.to_string(),
        x: AxisValues::Numbers(table.column_labels().to_vec()),
        y: AxisValues::Labels(table.row_label_strings()),
        z: table.values().to_vec(),
        colorscale: "Viridis".to_string(),
    }));

    let (rows, cols) = table.shape();
    debug!(title, rows, cols, "Built surface chart");
    figure
}
