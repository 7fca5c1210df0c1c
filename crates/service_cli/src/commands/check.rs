//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use tracing::info;
use volviz_models::generator::CorrelatedSeriesGenerator;

use crate::config::VolvizConfig;
use crate::Result;

/// Run the check command.
pub fn run(config: &VolvizConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    let generator = CorrelatedSeriesGenerator::new(config.study.series)?;
    let [v0, v1] = generator.covariance().daily_vols();
    info!(
        daily_vol_0 = v0,
        daily_vol_1 = v1,
        correlation = generator.covariance().correlation(),
        "Covariance matrix built"
    );

    println!("{}", effective_config(config)?);
    info!("Configuration OK");
    Ok(())
}

/// Effective configuration as TOML.
pub fn effective_config(config: &VolvizConfig) -> Result<String> {
    toml::to_string_pretty(config)
        .map_err(|e| crate::CliError::InvalidArgument(format!("config not serialisable: {}", e)))
}
