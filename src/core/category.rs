//! COG functional categories and the display palette used for the track
//! template and legend.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Failed to read category table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse category table: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Category table version for compatibility checking
pub const CATEGORY_TABLE_VERSION: &str = "1.0.0";

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// `r:g:b`, the form the track template expects
    pub fn colon_separated(self) -> String {
        format!("{}:{}:{}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Single-letter COG code, or `-` for unassigned
    pub code: String,
    pub description: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RnaClass {
    pub kind: String,
    pub description: String,
    pub color: Rgb,
}

/// Serializable table format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryData {
    version: String,
    categories: Vec<Category>,
    unassigned: Category,
    rna: Vec<RnaClass>,
}

/// The COG categories in display order plus the unassigned and RNA entries
#[derive(Debug, Clone)]
pub struct CategoryTable {
    pub categories: Vec<Category>,
    pub unassigned: Category,
    pub rna: Vec<RnaClass>,
}

impl CategoryTable {
    /// Load the embedded default table
    pub fn load_embedded() -> Result<Self, CategoryError> {
        // Validated at compile time by build.rs
        const EMBEDDED_TABLE: &str = include_str!("../../data/cog_categories.json");
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Load a table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CategoryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, CategoryError> {
        let data: CategoryData = serde_json::from_str(json)?;

        if data.version != CATEGORY_TABLE_VERSION {
            tracing::warn!(
                expected = CATEGORY_TABLE_VERSION,
                found = %data.version,
                "Category table version mismatch"
            );
        }

        Ok(Self {
            categories: data.categories,
            unassigned: data.unassigned,
            rna: data.rna,
        })
    }

    /// Categories followed by the unassigned entry, the order used by the track template
    pub fn with_unassigned(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().chain(std::iter::once(&self.unassigned))
    }
}
