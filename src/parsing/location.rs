//! Extraction of coordinates and identifiers from NCBI-style CDS definition
//! lines, as found in CDS FASTA files and echoed in CD-Search reports:
//!
//! ```text
//! lcl|NC_000913.3_cds_NP_414543.1_2 [gene=thrA] [location=337..2799] [gbkey=CDS]
//! lcl|NC_000913.3_cds_NP_414557.1_16 [gene=mog] [location=complement(9306..9893)]
//! lcl|NC_000913.3_cds_NP_417367.1_2843 [location=join(3023..3134,3136..3420)]
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::types::Strand;

static COMPLEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"complement\((.*?)\)").expect("valid regex"));
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"location=(.*?)\]").expect("valid regex"));

/// Span and strand of a CDS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

/// Find the location of a CDS in a definition line.
///
/// `complement(...)` marks the reverse strand. A `join(...)` spans from its
/// first to its last coordinate. Partial-end markers (`<`, `>`) are dropped.
/// Returns `None` if no location can be recognized.
pub fn parse_location(line: &str) -> Option<Location> {
    let (span, strand) = if line.contains("complement") {
        (COMPLEMENT_RE.captures(line)?.get(1)?.as_str(), Strand::Reverse)
    } else {
        (LOCATION_RE.captures(line)?.get(1)?.as_str(), Strand::Forward)
    };

    let span = match span.strip_prefix("join(") {
        Some(joined) => joined.strip_suffix(')').unwrap_or(joined),
        None => span,
    };

    let bounds: Vec<&str> = span.split("..").collect();
    if bounds.len() < 2 {
        return None;
    }

    let start = parse_bound(bounds[0])?;
    let end = parse_bound(bounds[bounds.len() - 1])?;
    Some(Location { start, end, strand })
}

fn parse_bound(bound: &str) -> Option<u64> {
    bound
        .trim()
        .trim_start_matches(['<', '>'])
        .parse()
        .ok()
}

/// The sequence identifier of a definition line: everything before the first ` [`
pub fn definition_id(line: &str) -> &str {
    let line = line.trim_start_matches('>');
    line.split(" [").next().unwrap_or(line).trim()
}

/// The nucleotide accession inside a CDS identifier.
///
/// `lcl|NC_000913.3_cds_NP_414542.1_1` yields `NC_000913.3`. Identifiers
/// without a `_cds_` marker are cut at the first `_` after the `|`.
/// Returns `None` if there is no `|`.
pub fn accession(id: &str) -> Option<&str> {
    let (_, rest) = id.split_once('|')?;
    let end = rest
        .find("_cds_")
        .or_else(|| rest.find('_'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
