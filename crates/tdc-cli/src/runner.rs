use crate::input::Settings;
use anyhow::Context;
use log::info;
use std::time::Instant;
use tdc_core::{decoy, fdr, PsmTable, TableFormat, IS_DECOY_COLUMN, SCORE_COLUMN};

pub struct Runner {
    settings: Settings,
    start: Instant,
}

impl Runner {
    pub fn new(settings: Settings) -> Self {
        Runner {
            settings,
            start: Instant::now(),
        }
    }

    /// Run the filtering pipeline and rewrite the PSM file in place.
    ///
    /// Decoys stay in the table through the threshold step and are only
    /// removed from the reported set afterwards.
    pub fn run(self) -> anyhow::Result<()> {
        log::debug!("settings: {}", serde_json::to_string(&self.settings)?);

        let table = PsmTable::load(&self.settings.psm_file, TableFormat::default())
            .with_context(|| format!("failed to read {}", self.settings.psm_file))?;
        info!("- read {} PSMs from {}", table.len(), self.settings.psm_file);

        let table = table.sort_descending_by(SCORE_COLUMN)?;
        let table = decoy::mark_decoys(table, &self.settings.decoy_prefix)?;

        let decoys = count_decoys(&table);
        info!("- {} decoys / {} targets", decoys, table.len() - decoys);

        let table = fdr::calc_fdr(table)?;
        let scored = table.len();
        let table = fdr::filter_by_fdr(table, self.settings.fdr_threshold)?;
        info!(
            "- {} of {} PSMs at FDR <= {}",
            table.len(),
            scored,
            self.settings.fdr_threshold
        );

        let table = fdr::remove_decoys(table)?;
        table
            .save(&self.settings.psm_file)
            .with_context(|| format!("failed to rewrite {}", self.settings.psm_file))?;
        info!(
            "- wrote {} target PSMs in {} ms",
            table.len(),
            self.start.elapsed().as_millis()
        );

        Ok(())
    }
}

fn count_decoys(table: &PsmTable) -> usize {
    match table.column(IS_DECOY_COLUMN) {
        Some(ix) => table
            .rows()
            .iter()
            .filter(|row| row.get(ix) == Some(&b"1"[..]))
            .count(),
        None => 0,
    }
}
