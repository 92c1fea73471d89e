use serde::{Deserialize, Serialize};

use crate::core::attributes::Attributes;
use crate::core::types::{FeatureType, Strand, Tool};

/// Attribute key holding the functional label compared across tools
pub const LABEL_KEY: &str = "COG";

/// Sentinel written for a tool that assigned no label
pub const UNASSIGNED: &str = "-";

/// Column names of the nine-column feature table
pub const COLUMNS: [&str; 9] = [
    "seqname",
    "source",
    "type",
    "start",
    "end",
    "score",
    "strand",
    "frame",
    "attribute",
];

/// One row of a nine-column (GFF-like) feature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GffRecord {
    pub seqname: String,
    pub source: String,
    pub feature_type: FeatureType,
    pub start: u64,
    pub end: u64,
    /// Kept verbatim; tools write `.` or a floating point score
    pub score: String,
    pub strand: Strand,
    /// Kept verbatim; `.` or `0`/`1`/`2`
    pub frame: String,
    pub attributes: Attributes,
}

impl std::fmt::Display for GffRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqname,
            self.source,
            self.feature_type,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.frame,
            self.attributes
        )
    }
}

/// A tool's prediction for one feature, normalized to the shared table shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub tool: Tool,
    pub row: GffRecord,
}

impl FeatureRecord {
    pub fn new(tool: Tool, row: GffRecord) -> Self {
        Self { tool, row }
    }

    /// Join key across tools
    pub fn start(&self) -> u64 {
        self.row.start
    }

    /// The functional label this tool assigned, or `None` when unassigned
    pub fn label(&self) -> Option<&str> {
        self.row
            .attributes
            .get(LABEL_KEY)
            .map(str::trim)
            .filter(|label| !label.is_empty() && *label != UNASSIGNED)
    }
}

#[cfg(test)]
pub(crate) fn test_row(start: u64, end: u64, attributes: &str) -> GffRecord {
    GffRecord {
        seqname: "NC_000913.3".to_string(),
        source: "test".to_string(),
        feature_type: FeatureType::Cds,
        start,
        end,
        score: ".".to_string(),
        strand: Strand::Forward,
        frame: "0".to_string(),
        attributes: Attributes::parse(attributes),
    }
}
