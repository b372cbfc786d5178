//! Running FDR estimation by target/decoy competition
//!
//! At every score rank the estimate is the number of decoys accumulated so
//! far divided by the rank: the fraction of decoys among all matches at or
//! above a score approximates the fraction of false targets there. The raw
//! ratio is reported as-is; it is not clamped and no cumulative-minimum
//! correction is applied, so the estimate can dip and rise again with rank.

use crate::dataset::{parse_numeric, PsmTable};
use crate::decoy::is_decoy;
use crate::{Error, FDR_COLUMN, IS_DECOY_COLUMN};

/// Annotate every row with the running FDR estimate at its rank.
///
/// # Invariants
/// * rows must already be sorted by score, descending (best PSM first);
///   the estimate is a pure function of that order and the decoy labels
pub fn calc_fdr(table: PsmTable) -> Result<PsmTable, Error> {
    let ix = table.column(IS_DECOY_COLUMN).ok_or(Error::PrecedenceViolation(
        "PSMs must be decoy-labeled before FDR can be computed",
    ))?;

    let mut decoys = 0u64;
    let mut estimates = Vec::with_capacity(table.len());
    for (rank, row) in table.rows().iter().enumerate() {
        if is_decoy(row.get(ix)) {
            decoys += 1;
        }
        let fdr = decoys as f64 / (rank + 1) as f64;
        estimates.push(ryu::Buffer::new().format(fdr).as_bytes().to_vec());
    }

    Ok(table.with_column(FDR_COLUMN, estimates))
}

/// Keep only rows whose FDR estimate is at or below `threshold`.
///
/// The boundary is inclusive: a row sitting exactly at the threshold passes.
pub fn filter_by_fdr(table: PsmTable, threshold: f64) -> Result<PsmTable, Error> {
    let ix = table.column(FDR_COLUMN).ok_or(Error::PrecedenceViolation(
        "PSMs must have an FDR estimate before they can be filtered",
    ))?;

    let mut keep = Vec::with_capacity(table.len());
    for (line, row) in table.rows().iter().enumerate() {
        keep.push(parse_numeric(row, ix, FDR_COLUMN, line)? <= threshold);
    }

    let mut keep = keep.into_iter();
    Ok(table.retain(|_| keep.next().unwrap_or(false)))
}

/// Drop decoy rows, then drop the `is_decoy` column itself; the label is
/// pipeline state, not output.
pub fn remove_decoys(table: PsmTable) -> Result<PsmTable, Error> {
    let ix = table.column(IS_DECOY_COLUMN).ok_or(Error::PrecedenceViolation(
        "PSMs must be decoy-labeled before decoys can be removed",
    ))?;

    let targets = table.retain(|row| !is_decoy(row.get(ix)));
    Ok(targets.drop_column(IS_DECOY_COLUMN))
}
