use anyhow::{ensure, Context};
use clap::ArgMatches;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
/// Resolved run settings - defaults already applied by the argument parser
pub struct Settings {
    pub psm_file: String,
    pub fdr_threshold: f64,
    pub decoy_prefix: String,
}

impl Settings {
    pub fn from_arguments(matches: ArgMatches) -> anyhow::Result<Settings> {
        let psm_file = matches
            .get_one::<String>("psm_file")
            .cloned()
            .context("no PSM file supplied")?;
        let fdr_threshold = matches.get_one::<f64>("fdr").copied().unwrap_or(0.05);
        let decoy_prefix = matches
            .get_one::<String>("decoy-prefix")
            .cloned()
            .unwrap_or_else(|| String::from("DECOY_"));

        ensure!(
            fdr_threshold.is_finite() && fdr_threshold > 0.0,
            "--fdr must be a positive number, got {}",
            fdr_threshold
        );
        if fdr_threshold > 1.0 {
            log::warn!("--fdr is set to {}, is this correct?", fdr_threshold);
        }

        Ok(Settings {
            psm_file,
            fdr_threshold,
            decoy_prefix,
        })
    }
}
