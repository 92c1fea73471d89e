//! DNAPlotter track manager template.
//!
//! One row per display rule, tab-separated:
//!
//! ```text
//! position  size  forward  reverse  not  any  key  qualifier  value  r:g:b
//! ```
//!
//! CDS rules come in forward/reverse pairs per category, followed by one
//! pseudogene rule per category and one rule per RNA class.

use std::io::Write;

use crate::core::category::{CategoryTable, Rgb};

/// Name of the track template written to the output directory
pub const TRACK_FILE: &str = "track_template";

/// Qualifier whose value selects the CDS and pseudogene rules
const CATEGORY_QUALIFIER: &str = "CAT";

/// Placeholder for RNA rules, which match on feature key only
const NULL: &str = "null";

/// Radial positions and feature size of the plotted tracks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub cds_forward: f64,
    pub cds_reverse: f64,
    pub pseudogene: f64,
    pub rna: f64,
    pub size: f64,
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self {
            cds_forward: 0.95,
            cds_reverse: 0.90,
            pseudogene: 0.85,
            rna: 0.80,
            size: 10.0,
        }
    }
}

impl TrackLayout {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

/// One display rule of the template
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub position: f64,
    pub size: f64,
    pub forward: bool,
    pub reverse: bool,
    pub key: String,
    pub qualifier: String,
    pub value: String,
    pub color: Rgb,
}

impl std::fmt::Display for TrackRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `{:?}` keeps the decimal point on whole numbers (10.0, not 10)
        write!(
            f,
            "{:?}\t{:?}\t{}\t{}\tfalse\tfalse\t{}\t{}\t{}\t{}",
            self.position,
            self.size,
            self.forward,
            self.reverse,
            self.key,
            self.qualifier,
            self.value,
            self.color.colon_separated()
        )
    }
}

/// Build the template rules for every category, the unassigned entry and the
/// RNA classes.
pub fn track_rows(categories: &CategoryTable, layout: &TrackLayout) -> Vec<TrackRow> {
    let category_row = |position, forward, reverse, key: &str, code: &str, color| TrackRow {
        position,
        size: layout.size,
        forward,
        reverse,
        key: key.to_string(),
        qualifier: CATEGORY_QUALIFIER.to_string(),
        value: code.to_string(),
        color,
    };

    let mut rows = Vec::new();

    for category in categories.with_unassigned() {
        rows.push(category_row(
            layout.cds_forward,
            true,
            false,
            "CDS",
            &category.code,
            category.color,
        ));
        rows.push(category_row(
            layout.cds_reverse,
            false,
            true,
            "CDS",
            &category.code,
            category.color,
        ));
    }

    for category in categories.with_unassigned() {
        rows.push(category_row(
            layout.pseudogene,
            true,
            true,
            "pseudogene",
            &category.code,
            category.color,
        ));
    }

    rows.extend(categories.rna.iter().map(|rna| TrackRow {
        position: layout.rna,
        size: layout.size,
        forward: true,
        reverse: true,
        key: rna.kind.clone(),
        qualifier: NULL.to_string(),
        value: NULL.to_string(),
        color: rna.color,
    }));

    rows
}

/// Write the track template
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_track_template(
    writer: &mut dyn Write,
    categories: &CategoryTable,
    layout: &TrackLayout,
) -> std::io::Result<()> {
    for row in track_rows(categories, layout) {
        writeln!(writer, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(layout: &TrackLayout) -> Vec<String> {
        let categories = CategoryTable::load_embedded().unwrap();
        let mut buffer = Vec::new();
        write_track_template(&mut buffer, &categories, layout).unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_default_template() {
        let lines = template(&TrackLayout::default());
        assert_eq!(lines.len(), 84);

        assert_eq!(lines[0], "0.95\t10.0\ttrue\tfalse\tfalse\tfalse\tCDS\tCAT\tJ\t30:117:176");
        assert_eq!(lines[1], "0.9\t10.0\tfalse\ttrue\tfalse\tfalse\tCDS\tCAT\tJ\t30:117:176");
        // Unassigned CDS pair in black
        assert_eq!(lines[52], "0.95\t10.0\ttrue\tfalse\tfalse\tfalse\tCDS\tCAT\t-\t0:0:0");
        assert_eq!(lines[53], "0.9\t10.0\tfalse\ttrue\tfalse\tfalse\tCDS\tCAT\t-\t0:0:0");
        assert_eq!(
            lines[54],
            "0.85\t10.0\ttrue\ttrue\tfalse\tfalse\tpseudogene\tCAT\tJ\t30:117:176"
        );
        assert_eq!(
            lines[80],
            "0.85\t10.0\ttrue\ttrue\tfalse\tfalse\tpseudogene\tCAT\t-\t0:0:0"
        );
        assert_eq!(
            lines[81..],
            [
                "0.8\t10.0\ttrue\ttrue\tfalse\tfalse\ttRNA\tnull\tnull\t217:3:104",
                "0.8\t10.0\ttrue\ttrue\tfalse\tfalse\trRNA\tnull\tnull\t250:243:62",
                "0.8\t10.0\ttrue\ttrue\tfalse\tfalse\tncRNA\tnull\tnull\t30:252:30",
            ]
        );
    }

    #[test]
    fn test_every_category_has_both_strands() {
        let categories = CategoryTable::load_embedded().unwrap();
        let rows = track_rows(&categories, &TrackLayout::default());

        for category in categories.with_unassigned() {
            let cds: Vec<&TrackRow> = rows
                .iter()
                .filter(|r| r.key == "CDS" && r.value == category.code)
                .collect();
            assert_eq!(cds.len(), 2, "category {}", category.code);
            assert!(cds[0].forward && !cds[0].reverse);
            assert!(!cds[1].forward && cds[1].reverse);
        }
    }

    #[test]
    fn test_custom_size() {
        let lines = template(&TrackLayout::default().with_size(12.0));
        assert!(lines.iter().all(|line| line.split('\t').nth(1) == Some("12.0")));
    }
}
