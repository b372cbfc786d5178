pub mod dataset;
pub mod decoy;
pub mod fdr;

pub use dataset::{PsmTable, TableFormat};

/// Column holding the search engine score used for ranking (higher is better)
pub const SCORE_COLUMN: &str = "xcorr";

/// Column holding the comma-separated protein assignment of a PSM
pub const PROTEIN_COLUMN: &str = "protein";

/// Derived column: `1` if the PSM matched only decoy proteins, `0` otherwise
pub const IS_DECOY_COLUMN: &str = "is_decoy";

/// Derived column: running decoy/rank FDR estimate
pub const FDR_COLUMN: &str = "fdr";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    #[error("{0}")]
    PrecedenceViolation(&'static str),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
