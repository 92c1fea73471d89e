//! FASTA handling using noodles.
//!
//! - CDS FASTA definition lines feed the eggNOG-mapper adapter
//! - The genome FASTA is checked and summarized before it is appended to the
//!   consensus table
//! - CDS FASTA files too large for one web CD-Search submission are split

use std::io::Write;

use noodles::fasta;

use crate::parsing::ParseError;
use crate::utils::validation::check_feature_limit;

/// Web Batch CD-Search accepts at most this many queries per submission
pub const CD_SEARCH_QUERY_LIMIT: usize = 4000;

/// Number of records placed in the first file when splitting
pub const CD_SEARCH_FIRST_CHUNK: usize = 3500;

/// Summary of a genome FASTA
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GenomeSummary {
    pub sequences: usize,
    pub total_length: u64,
}

/// Read all records from FASTA text
///
/// # Errors
///
/// Returns `ParseError::Noodles` if a record cannot be parsed or
/// `ParseError::TooManyFeatures` if the limit is exceeded.
pub fn read_records(text: &str) -> Result<Vec<fasta::Record>, ParseError> {
    let mut reader = fasta::io::Reader::new(text.as_bytes());
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_feature_limit(records.len()).is_some() {
            return Err(ParseError::TooManyFeatures(records.len()));
        }

        records.push(record);
    }

    Ok(records)
}

/// Full definition lines (name and description, without `>`) in file order
///
/// # Errors
///
/// Propagates errors from [`read_records`].
pub fn read_definitions(text: &str) -> Result<Vec<String>, ParseError> {
    Ok(read_records(text)?.iter().map(definition_line).collect())
}

fn definition_line(record: &fasta::Record) -> String {
    let name = String::from_utf8_lossy(record.name());
    match record.description() {
        Some(description) => format!("{name} {}", String::from_utf8_lossy(description)),
        None => name.into_owned(),
    }
}

/// Count sequences and bases in a genome FASTA
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` if the text holds no FASTA records,
/// or propagates errors from [`read_records`].
pub fn summarize_genome(text: &str) -> Result<GenomeSummary, ParseError> {
    let records = read_records(text)?;
    if records.is_empty() {
        return Err(ParseError::unrecognized(
            "line 1",
            "no sequences found in genome FASTA",
        ));
    }

    Ok(GenomeSummary {
        sequences: records.len(),
        total_length: records.iter().map(|r| r.sequence().len() as u64).sum(),
    })
}

/// Split CDS records for web CD-Search submission.
///
/// Returns `None` when the records already fit in one submission.
pub fn split_for_cd_search(
    mut records: Vec<fasta::Record>,
) -> Option<(Vec<fasta::Record>, Vec<fasta::Record>)> {
    if records.len() <= CD_SEARCH_QUERY_LIMIT {
        return None;
    }
    let rest = records.split_off(CD_SEARCH_FIRST_CHUNK);
    Some((records, rest))
}

/// Write records as FASTA
///
/// # Errors
///
/// Returns any IO error from the underlying writer.
pub fn write_records<W: Write>(writer: W, records: &[fasta::Record]) -> std::io::Result<()> {
    let mut writer = fasta::io::Writer::new(writer);
    for record in records {
        writer.write_record(record)?;
    }
    Ok(())
}
