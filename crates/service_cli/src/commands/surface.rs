//! Surface command implementation
//!
//! Loads an implied volatility grid, validates its shape and emits the 3-D
//! surface figure.

use std::path::Path;

use tracing::info;
use volviz_core::market_data::VolSurfaceTable;
use volviz_render::charts::{surface_chart, AxisTitles};
use volviz_render::figure::Figure;
use volviz_render::sink::FileSink;
use volviz_render::style::FigureStyle;

use crate::config::VolvizConfig;
use crate::{CliError, Result};

const DEMO_SURFACE_CSV: &str = include_str!("../../data/demo_surface.csv");

/// Built-in demonstration grid: 15 weekly dates by 36 moneyness columns.
pub fn demo_surface() -> Result<VolSurfaceTable> {
    Ok(VolSurfaceTable::from_csv_reader(DEMO_SURFACE_CSV.as_bytes())?)
}

/// Load the table at `input`, or the demo grid when `None`.
pub fn load_surface(input: Option<&Path>) -> Result<VolSurfaceTable> {
    match input {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            Ok(VolSurfaceTable::from_csv_path(path)?)
        }
        None => demo_surface(),
    }
}

/// Surface figure with the standard axis titles.
pub fn build_surface_figure(table: &VolSurfaceTable, style: &FigureStyle) -> Figure {
    let titles = AxisTitles::new("Moneyness", "Date", "Implied Volatility");
    surface_chart("Implied Volatility Surface", table, &titles, style)
}

/// Run the surface command.
pub fn run(config: &VolvizConfig, input: Option<&Path>, output_dir: &Path) -> Result<()> {
    let table = load_surface(input)?;
    let (rows, cols) = table.shape();
    info!(
        source = input.map(|p| p.display().to_string()).unwrap_or_else(|| "demo".to_string()),
        rows,
        cols,
        "Surface table validated"
    );

    let figure = build_surface_figure(&table, &config.render.style);
    let sink = FileSink::new(output_dir, config.render.format)?;
    let path = sink.write("vol_surface", &figure)?;
    println!("{}", path.display());
    Ok(())
}
