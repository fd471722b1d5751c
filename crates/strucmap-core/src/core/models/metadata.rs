use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scalar publication and experiment metadata for an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    /// Publication title of the entry.
    pub title: String,
    /// Experimental method, e.g. "X-RAY DIFFRACTION".
    pub method: String,
    /// High resolution limit in Angstroms.
    pub resolution: f64,
    /// Initial deposition date.
    pub deposition_date: NaiveDate,
}
