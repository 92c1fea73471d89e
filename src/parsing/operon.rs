//! Adapter for Operon-mapper.
//!
//! Operon-mapper reports every predicted ORF in a nine-column coordinates file
//! and the COG assignments of a subset of them in a separate three-column
//! table:
//!
//! ```text
//! ORF_1	COG0001	[J] Translation, ribosomal structure and biogenesis
//! ORF_7	ROG1234	Unknown function
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

use crate::core::attributes::Attributes;
use crate::core::feature::{FeatureRecord, UNASSIGNED};
use crate::core::types::Tool;
use crate::parsing::{gff, read_text, ParseError, ToolAdapter};

/// Reads `<organism>_orf_operon.txt` together with `<organism>_cog_operon.txt`
#[derive(Debug, Clone)]
pub struct OperonMapper {
    pub orf_coordinates: PathBuf,
    pub predicted_cogs: PathBuf,
}

impl OperonMapper {
    pub fn new(orf_coordinates: impl Into<PathBuf>, predicted_cogs: impl Into<PathBuf>) -> Self {
        Self {
            orf_coordinates: orf_coordinates.into(),
            predicted_cogs: predicted_cogs.into(),
        }
    }
}

impl ToolAdapter for OperonMapper {
    fn tool(&self) -> Tool {
        Tool::OperonMapper
    }

    fn load(&self) -> Result<Vec<FeatureRecord>, ParseError> {
        let cog_text = read_text(&self.predicted_cogs)?;
        let cogs = parse_cog_table(&cog_text).map_err(|e| e.in_file(&self.predicted_cogs))?;
        let orf_text = read_text(&self.orf_coordinates)?;
        parse_operon_text(&orf_text, &cogs).map_err(|e| e.in_file(&self.orf_coordinates))
    }
}

/// One row of the predicted COG table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CogAssignment {
    pub cog: String,
    /// `[X] description`, or empty when the table has no third column
    pub category: String,
}

impl CogAssignment {
    /// Category letter and description.
    ///
    /// `ROG` identifiers have no COG category and read as function unknown.
    /// Returns `None` when the category column is not of the form `[X] text`.
    pub fn category_and_description(&self) -> Option<(String, String)> {
        if self.cog.contains("ROG") {
            return Some(("S".to_string(), UNASSIGNED.to_string()));
        }
        let letter = self.category.chars().nth(1)?;
        let (_, description) = self.category.split_once("] ")?;
        Some((letter.to_string(), description.to_string()))
    }
}

/// Parse the predicted COG table. The first row for an ORF wins.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if a row has fewer than two fields.
pub fn parse_cog_table(text: &str) -> Result<HashMap<String, CogAssignment>, ParseError> {
    let mut assignments = HashMap::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(ParseError::malformed(
                format!("line {}", i + 1),
                "expected ORF id and COG columns",
            ));
        }

        assignments
            .entry(fields[0].trim().to_string())
            .or_insert_with(|| CogAssignment {
                cog: fields[1].trim().to_string(),
                category: fields.get(2).map(|c| c.trim().to_string()).unwrap_or_default(),
            });
    }

    Ok(assignments)
}

/// Normalize the ORF coordinates file using the COG table.
///
/// ORFs with a usable COG assignment get `ID=..;COG=..;CAT=..;desc=..`; all
/// others get `ID=..;COG=-;CAT=-`.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if a row is malformed, has no strand or
/// has no `ID`.
pub fn parse_operon_text(
    orf_text: &str,
    cogs: &HashMap<String, CogAssignment>,
) -> Result<Vec<FeatureRecord>, ParseError> {
    let rows = gff::parse_gff_text(orf_text)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut unreadable = 0usize;

    for mut row in rows {
        gff::require_strand(&row)?;
        let raw = row.attributes.to_string();
        let id = gff::loose_attribute(&raw, "ID")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ParseError::malformed(format!("start {}", row.start), "attribute column has no ID")
            })?;

        let assigned = cogs.get(id).and_then(|assignment| {
            let category = assignment.category_and_description();
            if category.is_none() {
                unreadable += 1;
            }
            category.map(|(category, description)| (assignment.cog.as_str(), category, description))
        });

        let attributes = Attributes::new().with("ID", id);
        row.attributes = match assigned {
            Some((cog, category, description)) => attributes
                .with("COG", cog)
                .with("CAT", category)
                .with("desc", description),
            None => attributes.with("COG", UNASSIGNED).with("CAT", UNASSIGNED),
        };

        records.push(FeatureRecord::new(Tool::OperonMapper, row));
    }

    if unreadable > 0 {
        warn!(
            unreadable,
            "Operon-mapper COG rows with an unreadable category were treated as unassigned"
        );
    }

    Ok(records)
}
