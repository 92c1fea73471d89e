//! Adapter for NCBI Batch CD-Search.
//!
//! The hitdata report lists domain hits per query after a short preamble. Each
//! hit line starts with the query number and echoes the CDS definition line:
//!
//! ```text
//! Q#1 - >lcl|NC_000913.3_cds_NP_414542.1_1 [gene=thrL] [location=190..255]	specific	223279	5	60	1.2e-10	48.6	COG0001	...
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

use crate::core::attributes::Attributes;
use crate::core::feature::{FeatureRecord, GffRecord, LABEL_KEY, UNASSIGNED};
use crate::core::types::{FeatureType, Tool};
use crate::parsing::location::{accession, definition_id, parse_location};
use crate::parsing::{read_text, ParseError, ToolAdapter};
use crate::utils::validation::check_feature_limit;

static QUERY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q#\d+").expect("valid regex"));
static COG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"COG\d+").expect("valid regex"));

/// Marker of the first query in a hitdata report
const FIRST_QUERY: &str = "Q#1";

/// Reads `<organism>_batch.txt`
#[derive(Debug, Clone)]
pub struct CdSearch {
    pub hitdata: PathBuf,
}

impl CdSearch {
    pub fn new(hitdata: impl Into<PathBuf>) -> Self {
        Self {
            hitdata: hitdata.into(),
        }
    }
}

impl ToolAdapter for CdSearch {
    fn tool(&self) -> Tool {
        Tool::CdSearch
    }

    fn load(&self) -> Result<Vec<FeatureRecord>, ParseError> {
        let text = read_text(&self.hitdata)?;
        parse_hitdata_text(&text).map_err(|e| e.in_file(&self.hitdata))
    }
}

/// Normalize a hitdata report.
///
/// Only the first `specific` hit of each query is kept. Its attribute column
/// is `COG=<first COGnnnn on the line>`, or `COG=-` when the hit is not a COG
/// domain.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` if the report has no queries, a
/// line has no query number, or a kept hit has no recognizable identifier or
/// location.
pub fn parse_hitdata_text(text: &str) -> Result<Vec<FeatureRecord>, ParseError> {
    let offset = text
        .find("Q#")
        .ok_or_else(|| ParseError::unrecognized("line 1", "no query lines found"))?;
    let first_line = text[..offset].matches('\n').count() + 1;

    let mut records = Vec::new();
    let mut previous_query: Option<&str> = None;

    for (i, line) in text[offset..].lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let at = format!("line {}", first_line + i);

        let query = QUERY_RE
            .find(line)
            .ok_or_else(|| ParseError::unrecognized(at.as_str(), "no query number"))?
            .as_str();

        if !line.contains("specific") || previous_query == Some(query) {
            continue;
        }
        previous_query = Some(query);

        if check_feature_limit(records.len()).is_some() {
            return Err(ParseError::TooManyFeatures(records.len()));
        }
        records.push(FeatureRecord::new(Tool::CdSearch, hit_row(line, &at)?));
    }

    debug!(hits = records.len(), "Read Batch CD-Search hits");
    Ok(records)
}

fn hit_row(line: &str, at: &str) -> Result<GffRecord, ParseError> {
    let definition = line.split_once('>').map_or(line, |(_, rest)| rest);
    let seqname = accession(definition_id(definition))
        .ok_or_else(|| ParseError::unrecognized(at, "no sequence identifier"))?;
    let location = parse_location(line)
        .ok_or_else(|| ParseError::unrecognized(at, "no recognizable location"))?;
    let cog = COG_RE.find(line).map_or(UNASSIGNED, |m| m.as_str());

    Ok(GffRecord {
        seqname: seqname.to_string(),
        source: "unknown".to_string(),
        feature_type: FeatureType::Cds,
        start: location.start,
        end: location.end,
        score: ".".to_string(),
        strand: location.strand,
        frame: "0".to_string(),
        attributes: Attributes::new().with(LABEL_KEY, cog),
    })
}

/// Concatenate hitdata reports, dropping each preamble.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` naming the report that has no
/// `Q#1` line.
pub fn merge_hitdata(reports: &[String]) -> Result<String, ParseError> {
    let mut merged = String::new();

    for (i, report) in reports.iter().enumerate() {
        let offset = report.find(FIRST_QUERY).ok_or_else(|| {
            ParseError::unrecognized(format!("report {}", i + 1), "no Q#1 line found")
        })?;
        merged.push_str(&report[offset..]);
        if !merged.ends_with('\n') {
            merged.push('\n');
        }
    }

    Ok(merged)
}
