//! Render command implementation
//!
//! Runs the full study and emits every figure: the two level paths on twin
//! axes, the regression of level changes and the volatility surface.

use std::path::Path;

use tracing::info;
use volviz_core::math::LinearFit;
use volviz_models::study::{SeriesStudy, StudyResult};
use volviz_render::charts::{line_chart, regression_chart, AxisTitles, NamedSeries};
use volviz_render::figure::{Annotation, AxisValues};
use volviz_render::sink::{FigureSink, FileSink};

use crate::commands::surface::{build_surface_figure, demo_surface};
use crate::config::VolvizConfig;
use crate::Result;

/// Figure names in emission order.
pub const FIGURE_NAMES: [&str; 3] = ["levels", "level_change_fit", "vol_surface"];

/// Run the render command.
pub fn run(config: &VolvizConfig, seed: u64, output_dir: &Path) -> Result<()> {
    info!("Rendering study figures...");
    info!("  Seed: {}", seed);
    info!("  Output directory: {}", output_dir.display());
    info!("  Theme: {}", config.render.style.theme);

    let sink = FileSink::new(output_dir, config.render.format)?;
    run_workflow(config, seed, &sink)?;

    for written in sink.written_files() {
        println!("{}", written.path.display());
    }
    Ok(())
}

/// Build all figures for one study and hand them to `sink`.
pub fn run_workflow(config: &VolvizConfig, seed: u64, sink: &dyn FigureSink) -> Result<StudyResult> {
    let study = SeriesStudy::new(config.study.clone())?;
    let result = study.run_seeded(seed)?;
    let style = &config.render.style;
    let [first_label, second_label] = &config.study.labels;

    let dates = result
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let series = [
        NamedSeries::primary(first_label.clone(), result.levels.first.clone()),
        NamedSeries::secondary(second_label.clone(), result.levels.second.clone()),
    ];
    let levels = line_chart(
        &format!("{} and {}", first_label, second_label),
        AxisValues::Labels(dates),
        &series,
        style,
    )?;
    sink.send(FIGURE_NAMES[0], &levels)?;

    let annotation = fit_annotation(&result, config.render.annotation);
    let titles = AxisTitles::new(
        format!("Change in {}", first_label),
        format!("Change in {}", second_label),
        "",
    );
    let regression = regression_chart(
        &format!("Daily Changes: {} vs {}", second_label, first_label),
        &result.diff_first,
        &result.diff_second,
        &result.fit,
        &titles,
        Some(annotation),
        style,
    )?;
    sink.send(FIGURE_NAMES[1], &regression)?;

    let surface = build_surface_figure(&demo_surface()?, style);
    sink.send(FIGURE_NAMES[2], &surface)?;

    info!(seed, figures = FIGURE_NAMES.len(), "Study figures emitted");
    Ok(result)
}

/// Annotation text for a fit.
pub fn fit_label(fit: &LinearFit) -> String {
    format!("{}<br>R² = {:.4}", fit.equation(4), fit.r_squared)
}

/// Place the fit label at `position`, or at the top-left corner of the
/// scatter when unset.
fn fit_annotation(result: &StudyResult, position: Option<[f64; 2]>) -> Annotation {
    let [x, y] = position.unwrap_or_else(|| {
        let x_min = finite_extreme(&result.diff_first, f64::min, f64::INFINITY);
        let y_max = finite_extreme(&result.diff_second, f64::max, f64::NEG_INFINITY);
        [x_min, y_max]
    });
    Annotation::new(x, y, fit_label(&result.fit))
}

fn finite_extreme(values: &[f64], pick: fn(f64, f64) -> f64, init: f64) -> f64 {
    let extreme = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(init, pick);
    if extreme.is_finite() {
        extreme
    } else {
        0.0
    }
}
