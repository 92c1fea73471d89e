//! Parsers that turn each annotation tool's raw output into
//! [`FeatureRecord`]s keyed by start coordinate.
//!
//! This module provides:
//!
//! - **eggNOG-mapper**: decorated GFF plus the CDS FASTA it was run on
//! - **Operon-mapper**: ORF coordinates plus predicted COG table
//! - **Batch CD-Search**: hitdata report
//! - **Reference GFF3**: pseudogene and ncRNA features
//! - **FASTA**: CDS definition lines, genome summary and batch splitting
//!
//! Every tool sits behind [`ToolAdapter`], so the consensus step only ever sees
//! normalized records.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cogor::parsing::{cd_search::CdSearch, ToolAdapter};
//!
//! let adapter = CdSearch::new("ecoli_batch.txt");
//! let records = adapter.load().unwrap();
//! println!("{}: {} records", adapter.tool(), records.len());
//! ```
//!
//! ## Normalized attribute columns
//!
//! | Tool | Attribute column |
//! |------|------------------|
//! | eggNOG-mapper | `ID=..;COG=..;CAT=..;name=..;desc=..` |
//! | Operon-mapper | `ID=..;COG=..;CAT=..;desc=..` or `ID=..;COG=-;CAT=-` |
//! | Batch CD-Search | `COG=..` |

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::feature::FeatureRecord;
use crate::core::types::Tool;
use crate::utils::validation::MAX_FEATURES;

pub mod cd_search;
pub mod eggnog;
pub mod fasta;
pub mod gff;
pub mod location;
pub mod operon;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at {at}: {message}")]
    MalformedInput { at: String, message: String },

    #[error("Unrecognized format at {at}: {message}")]
    UnrecognizedFormat { at: String, message: String },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many features: {0} exceeds maximum allowed ({MAX_FEATURES})")]
    TooManyFeatures(usize),

    #[error("Failed to parse {}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub fn malformed(at: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            at: at.into(),
            message: message.into(),
        }
    }

    pub fn unrecognized(at: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnrecognizedFormat {
            at: at.into(),
            message: message.into(),
        }
    }

    /// Attach the file the error came from
    #[must_use]
    pub fn in_file(self, path: &Path) -> Self {
        Self::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }
}

/// A parser for one annotation tool's output
pub trait ToolAdapter {
    /// The tool this adapter reads
    fn tool(&self) -> Tool;

    /// Read the tool's raw output and normalize it
    ///
    /// # Errors
    ///
    /// Returns a `ParseError::InFile` wrapping the first failure, naming the
    /// offending file.
    fn load(&self) -> Result<Vec<FeatureRecord>, ParseError>;
}

/// Read a whole text file, transparently decompressing `.gz` files.
///
/// # Errors
///
/// Returns `ParseError::InFile` wrapping the IO error if the file cannot be read.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    read_text_inner(path).map_err(|e| ParseError::from(e).in_file(path))
}

fn read_text_inner(path: &Path) -> std::io::Result<String> {
    if is_gzipped(path) {
        let mut text = String::new();
        flate2::read::GzDecoder::new(std::fs::File::open(path)?).read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}
