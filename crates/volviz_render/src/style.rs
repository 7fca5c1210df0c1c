//! Figure styling.
//!
//! Styling is a plain value passed to every chart builder. Two figures built
//! with different styles in the same process never affect each other.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Named chart theme, mapped onto a plotly template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartTheme {
    /// Plotly default
    #[default]
    Plotly,
    /// ggplot-like grey background
    Ggplot,
    /// seaborn-like styling
    Seaborn,
    /// Dark background
    Dark,
    /// Minimal white background
    White,
}

impl ChartTheme {
    /// Plotly template name.
    pub fn template_name(&self) -> &'static str {
        match self {
            ChartTheme::Plotly => "plotly",
            ChartTheme::Ggplot => "ggplot2",
            ChartTheme::Seaborn => "seaborn",
            ChartTheme::Dark => "plotly_dark",
            ChartTheme::White => "simple_white",
        }
    }
}

impl FromStr for ChartTheme {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plotly" | "default" => Ok(ChartTheme::Plotly),
            "ggplot" | "ggplot2" => Ok(ChartTheme::Ggplot),
            "seaborn" => Ok(ChartTheme::Seaborn),
            "dark" | "plotly_dark" => Ok(ChartTheme::Dark),
            "white" | "simple_white" => Ok(ChartTheme::White),
            _ => Err(RenderError::UnknownTheme(s.to_string())),
        }
    }
}

impl std::fmt::Display for ChartTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// Explicit style configuration handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    /// Theme
    pub theme: ChartTheme,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Base font size
    pub font_size: u32,
    /// Whether to show the legend
    pub show_legend: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            theme: ChartTheme::default(),
            width: 1000,
            height: 600,
            font_size: 12,
            show_legend: true,
        }
    }
}

impl FigureStyle {
    /// Replace the theme.
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the figure size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
