//! Plotly-compatible figure structures.
//!
//! A [`Figure`] serialises to the `{"data": [...], "layout": {...}}` object
//! accepted by `Plotly.newPlot`. Only the attributes used by the chart
//! builders are modelled.

use serde::Serialize;

use crate::style::FigureStyle;

/// Values along an axis: numbers or category/date labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    /// Numeric coordinates
    Numbers(Vec<f64>),
    /// Text labels (e.g. ISO dates)
    Labels(Vec<String>),
}

impl AxisValues {
    /// Number of points.
    pub fn len(&self) -> usize {
        match self {
            AxisValues::Numbers(v) => v.len(),
            AxisValues::Labels(v) => v.len(),
        }
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Y axis a trace is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisSide {
    /// Left-hand axis
    #[default]
    Primary,
    /// Right-hand axis overlaying the primary one
    Secondary,
}

impl AxisSide {
    fn axis_ref(&self) -> Option<&'static str> {
        match self {
            AxisSide::Primary => None,
            AxisSide::Secondary => Some("y2"),
        }
    }
}

/// 2-D scatter/line trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    /// Trace name shown in the legend
    pub name: String,
    /// X coordinates
    pub x: AxisValues,
    /// Y coordinates
    pub y: Vec<f64>,
    /// `lines`, `markers` or `lines+markers`
    pub mode: String,
    /// `y2` for the secondary axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

/// 3-D surface trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceTrace {
    /// Trace name
    pub name: String,
    /// Column coordinates
    pub x: AxisValues,
    /// Row coordinates
    pub y: AxisValues,
    /// Grid values `z[row][column]`
    pub z: Vec<Vec<f64>>,
    /// Plotly colour scale name
    pub colorscale: String,
}

/// A single trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// 2-D scatter or line
    Scatter(ScatterTrace),
    /// 3-D surface
    Surface(SurfaceTrace),
}

impl Trace {
    /// Line trace.
    pub fn line(name: impl Into<String>, x: AxisValues, y: Vec<f64>, side: AxisSide) -> Self {
        Trace::Scatter(ScatterTrace {
            name: name.into(),
            x,
            y,
            mode: "lines".to_string(),
            yaxis: side.axis_ref().map(str::to_string),
        })
    }

    /// Marker-only trace.
    pub fn markers(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Trace::Scatter(ScatterTrace {
            name: name.into(),
            x: AxisValues::Numbers(x),
            y,
            mode: "markers".to_string(),
            yaxis: None,
        })
    }

    /// Trace name.
    pub fn name(&self) -> &str {
        match self {
            Trace::Scatter(t) => &t.name,
            Trace::Surface(t) => &t.name,
        }
    }
}

/// Text placed at plot coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// X position in data coordinates
    pub x: f64,
    /// Y position in data coordinates
    pub y: f64,
    /// Annotation text
    pub text: String,
    /// Whether to draw an arrow to the point
    pub showarrow: bool,
}

impl Annotation {
    /// Arrow-less annotation at `(x, y)`.
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            showarrow: false,
        }
    }
}

/// Title object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    /// Title text
    pub text: String,
}

impl Title {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisLayout {
    /// Axis title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Axis this one is drawn over (`y` for a secondary axis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    /// `left` or `right`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl AxisLayout {
    /// Axis with a title.
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            ..Self::default()
        }
    }

    /// Secondary y axis on the right, overlaying the primary.
    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            overlaying: Some("y".to_string()),
            side: Some("right".to_string()),
        }
    }
}

/// 3-D scene axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// X axis
    pub xaxis: AxisLayout,
    /// Y axis
    pub yaxis: AxisLayout,
    /// Z axis
    pub zaxis: AxisLayout,
}

/// Font settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    /// Size in points
    pub size: u32,
}

/// Figure layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Figure title
    pub title: Title,
    /// Plotly template name
    pub template: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Base font
    pub font: Font,
    /// Legend visibility
    pub showlegend: bool,
    /// X axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    /// Primary y axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    /// Secondary y axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisLayout>,
    /// 3-D scene
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    /// Text annotations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    /// Layout carrying the given title and style.
    pub fn new(title: impl Into<String>, style: &FigureStyle) -> Self {
        Self {
            title: Title::new(title),
            template: style.theme.template_name().to_string(),
            width: style.width,
            height: style.height,
            font: Font {
                size: style.font_size,
            },
            showlegend: style.show_legend,
            xaxis: None,
            yaxis: None,
            yaxis2: None,
            scene: None,
            annotations: Vec::new(),
        }
    }
}

/// A complete figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Traces in drawing order
    pub data: Vec<Trace>,
    /// Layout
    pub layout: Layout,
}

impl Figure {
    /// Empty figure with the given layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    /// Append a trace.
    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    /// Append an annotation.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }

    /// Plotly JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Standalone HTML page that renders the figure with plotly.js.
    pub fn to_html(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!(
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
                "<title>{title}</title>\n",
                "<script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\"></script>\n",
                "</head>\n<body>\n<div id=\"figure\"></div>\n<script>\n",
                "const fig = {json};\n",
                "Plotly.newPlot(\"figure\", fig.data, fig.layout);\n",
                "</script>\n</body>\n</html>\n"
            ),
            title = html_escape(&self.layout.title.text),
            json = json.replace("</", "<\\/"),
        ))
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_trace_json() {
        let trace = Trace::line(
            "vol",
            AxisValues::Labels(vec!["2024-01-02".to_string()]),
            vec![0.2],
            AxisSide::Secondary,
        );
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "scatter",
                "name": "vol",
                "x": ["2024-01-02"],
                "y": [0.2],
                "mode": "lines",
                "yaxis": "y2"
            })
        );
    }

    #[test]
    fn test_primary_axis_omitted() {
        let trace = Trace::line("a", AxisValues::Numbers(vec![1.0]), vec![1.0], AxisSide::Primary);
        let value = serde_json::to_value(&trace).unwrap();
        assert!(value.get("yaxis").is_none());
    }

    #[test]
    fn test_layout_carries_style() {
        let style = FigureStyle::default().with_size(640, 480);
        let layout = Layout::new("T", &style);
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["title"]["text"], "T");
        assert_eq!(value["template"], "plotly");
        assert_eq!(value["width"], 640);
        assert!(value.get("annotations").is_none());
        assert!(value.get("scene").is_none());
    }

    #[test]
    fn test_html_embeds_figure() {
        let mut fig = Figure::new(Layout::new("A <b> & c", &FigureStyle::default()));
        fig.add_trace(Trace::markers("m", vec![1.0], vec![2.0]));
        let html = fig.to_html().unwrap();
        assert!(html.contains("<title>A &lt;b&gt; &amp; c</title>"));
        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("\"markers\""));
    }

    #[test]
    fn test_non_finite_values_become_null() {
        let trace = Trace::markers("m", vec![1.0], vec![f64::NAN]);
        let value = serde_json::to_value(&trace).unwrap();
        assert!(value["y"][0].is_null());
    }
}
