use noodles::gff;
use noodles::gff::record_buf::attributes::field::Value;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::attributes::Attributes;
use crate::core::feature::{GffRecord, COLUMNS};
use crate::core::types::{FeatureType, Strand};
use crate::parsing::ParseError;
use crate::utils::validation::check_feature_limit;

/// Parse a nine-column, tab-separated feature table.
///
/// Blank lines and `#` comments are skipped, a leading `seqname ...` header row
/// is ignored, and parsing stops at a `##FASTA` directive.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if a row has fewer than nine fields or
/// lacks a usable start, end or strand, or `ParseError::TooManyFeatures` if the
/// limit is exceeded.
pub fn parse_gff_text(text: &str) -> Result<Vec<GffRecord>, ParseError> {
    let mut records = Vec::new();

    for (line_num, fields) in data_rows(text) {
        if check_feature_limit(records.len()).is_some() {
            return Err(ParseError::TooManyFeatures(records.len()));
        }
        records.push(record_from_fields(line_num, &fields)?);
    }

    Ok(records)
}

/// Parse a reference GFF3 with noodles, keeping only pseudogene and ncRNA
/// features.
///
/// Reading stops at a `##FASTA` directive. Rows of other types are read but
/// not kept, and an unstranded reference feature is accepted.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if a record cannot be parsed or
/// `ParseError::TooManyFeatures` if the limit is exceeded.
pub fn parse_reference_text(text: &str) -> Result<Vec<GffRecord>, ParseError> {
    let mut reader = gff::io::Reader::new(text.as_bytes());
    let mut records = Vec::new();

    for (i, result) in reader.record_bufs().enumerate() {
        let record = result.map_err(|e| {
            ParseError::Noodles(format!("Failed to parse GFF3 record {}: {e}", i + 1))
        })?;

        let feature_type = FeatureType::parse(&record.ty().to_string());
        if feature_type != FeatureType::Pseudogene && !feature_type.is_ncrna() {
            continue;
        }
        if check_feature_limit(records.len()).is_some() {
            return Err(ParseError::TooManyFeatures(records.len()));
        }
        records.push(reference_record(&record, feature_type));
    }

    Ok(records)
}

fn reference_record(record: &gff::RecordBuf, feature_type: FeatureType) -> GffRecord {
    let attributes = record
        .attributes()
        .iter()
        .fold(Attributes::new(), |attributes, (tag, value)| {
            let value = match value {
                Value::String(value) => value.to_string(),
                Value::Array(values) => values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            };
            attributes.with(tag.to_string(), value)
        });

    GffRecord {
        seqname: record.reference_sequence_name().to_string(),
        source: record.source().to_string(),
        feature_type,
        start: record.start().get() as u64,
        end: record.end().get() as u64,
        score: record
            .score()
            .map_or_else(|| ".".to_string(), |score| score.to_string()),
        // `?` (relevant but unknown) reads the same as `.`
        strand: Strand::parse(record.strand().as_ref()).unwrap_or(Strand::Unknown),
        frame: record
            .phase()
            .map_or_else(|| ".".to_string(), |phase| phase.to_string()),
        attributes,
    }
}

/// Reject a tool record that has no strand.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` naming the record's start if its
/// strand is `.`.
pub fn require_strand(row: &GffRecord) -> Result<(), ParseError> {
    if row.strand == Strand::Unknown {
        return Err(ParseError::malformed(
            format!("start {}", row.start),
            "record has no strand",
        ));
    }
    Ok(())
}

static LOOSE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[=,;]").expect("valid regex"));

/// Look up `key` in an attribute column split on `=`, `,` and `;`.
///
/// This is how tool reports are read: a value ends at the first `,`, so for
/// `em_OGs=COG0001@1|root,COG0001@2|Bacteria` only `COG0001@1|root` is
/// returned.
pub fn loose_attribute<'a>(column: &'a str, key: &str) -> Option<&'a str> {
    let mut tokens = LOOSE_SPLIT_RE.split(column);
    tokens.find(|token| *token == key)?;
    tokens.next().map(str::trim)
}

/// Data rows with their 1-based line numbers
fn data_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .take_while(|(_, line)| !line.starts_with("##FASTA"))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|(i, line)| (i + 1, line.split('\t').collect::<Vec<_>>()))
        .filter(|(_, fields)| fields.first().map(|f| f.trim()) != Some(COLUMNS[0]))
}

fn record_from_fields(line_num: usize, fields: &[&str]) -> Result<GffRecord, ParseError> {
    let at = format!("line {line_num}");

    if fields.len() < COLUMNS.len() {
        return Err(ParseError::malformed(
            at,
            format!("expected {} fields, found {}", COLUMNS.len(), fields.len()),
        ));
    }

    let coordinate = |idx: usize| -> Result<u64, ParseError> {
        fields[idx].trim().parse().map_err(|_| {
            ParseError::malformed(
                format!("line {line_num}"),
                format!("invalid {} '{}'", COLUMNS[idx], fields[idx]),
            )
        })
    };
    let start = coordinate(3)?;
    let end = coordinate(4)?;

    let strand = Strand::parse(fields[6])
        .ok_or_else(|| ParseError::malformed(at, format!("invalid strand '{}'", fields[6])))?;

    Ok(GffRecord {
        seqname: fields[0].trim().to_string(),
        source: fields[1].trim().to_string(),
        feature_type: FeatureType::parse(fields[2]),
        start,
        end,
        score: fields[5].trim().to_string(),
        strand,
        frame: fields[7].trim().to_string(),
        // The attribute column may itself contain tabs in sloppy files
        attributes: Attributes::parse(&fields[8..].join("\t")),
    })
}
