//! Decoy/target classification of PSM rows

use crate::dataset::PsmTable;
use crate::{Error, IS_DECOY_COLUMN, PROTEIN_COLUMN};

/// Label every row with an `is_decoy` column derived from its protein
/// assignment.
///
/// A PSM counts as a decoy only when *every* comma-separated protein it maps
/// to starts with `decoy_prefix`. A single real protein in the group keeps
/// the row a target, so matches that could be explained by a real protein
/// are never penalized as decoys.
pub fn mark_decoys(table: PsmTable, decoy_prefix: &str) -> Result<PsmTable, Error> {
    let ix = table
        .column(PROTEIN_COLUMN)
        .ok_or(Error::MissingColumn(PROTEIN_COLUMN))?;

    let labels = table
        .rows()
        .iter()
        .map(|row| {
            let proteins = row.get(ix).unwrap_or_default();
            let decoy = proteins
                .split(|b| *b == b',')
                .all(|protein| protein.starts_with(decoy_prefix.as_bytes()));
            if decoy { b"1".to_vec() } else { b"0".to_vec() }
        })
        .collect();

    Ok(table.with_column(IS_DECOY_COLUMN, labels))
}

/// Does a serialized `is_decoy` field mark a decoy?
pub(crate) fn is_decoy(field: Option<&[u8]>) -> bool {
    field == Some(&b"1"[..])
}
