//! Fit command implementation
//!
//! Runs one series study and reports the regression of the second series'
//! level changes on the first's.

use tracing::info;
use volviz_core::math::LinearFit;
use volviz_models::study::SeriesStudy;

use crate::config::VolvizConfig;
use crate::{CliError, Result};

/// Run the fit command.
pub fn run(config: &VolvizConfig, seed: u64, format: &str) -> Result<()> {
    let study = SeriesStudy::new(config.study.clone())?;
    let result = study.run_seeded(seed)?;
    info!("Fitted {} level changes", result.fit.n);

    println!("{}", format_fit(&result.fit, format)?);
    Ok(())
}

/// Render a fit as `table` or `json`.
pub fn format_fit(fit: &LinearFit, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(fit)?),
        "table" => {
            let se = fit
                .standard_error
                .map(|v| format!("{:.6}", v))
                .unwrap_or_else(|| "n/a".to_string());
            let rows = [
                ("slope", format!("{:.6}", fit.slope)),
                ("intercept", format!("{:.6}", fit.intercept)),
                ("r", format!("{:.6}", fit.r)),
                ("r_squared", format!("{:.6}", fit.r_squared)),
                ("std_error", se),
                ("n", fit.n.to_string()),
            ];

            let mut out = String::new();
            out.push_str("┌────────────┬────────────────┐\n");
            out.push_str("│ Statistic  │ Value          │\n");
            out.push_str("├────────────┼────────────────┤\n");
            for (name, value) in rows {
                out.push_str(&format!("│ {:<10} │ {:>14} │\n", name, value));
            }
            out.push_str("└────────────┴────────────────┘\n");
            out.push_str(&fit.equation(4));
            Ok(out)
        }
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            other
        ))),
    }
}
