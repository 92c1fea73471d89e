//! SVG legend for the genome map: one color swatch per COG category, the
//! unassigned entry and each RNA class.

use std::io::Write;

use crate::core::category::{CategoryTable, Rgb};

/// Name of the legend written to the output directory
pub const LEGEND_FILE: &str = "legend.svg";

const WIDTH: u32 = 1700;
const HEIGHT: u32 = 2500;
const MARGIN: u32 = 50;
const SWATCH: u32 = 80;
const TEXT_X: u32 = 150;
const FONT_SIZE: u32 = 50;

/// One legend line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Legend lines in display order: categories, unassigned, RNA classes
pub fn legend_entries(categories: &CategoryTable) -> Vec<LegendEntry> {
    categories
        .with_unassigned()
        .map(|c| LegendEntry {
            label: format!("[{}] {}", c.code, c.description),
            color: c.color,
        })
        .chain(categories.rna.iter().map(|r| LegendEntry {
            label: format!("{} ({})", r.description, r.kind),
            color: r.color,
        }))
        .collect()
}

/// Write the legend as a standalone SVG document
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_legend_svg(writer: &mut dyn Write, categories: &CategoryTable) -> std::io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    )?;
    writeln!(writer, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

    for (i, entry) in legend_entries(categories).iter().enumerate() {
        // usize -> u32: the table is a few dozen entries at most
        #[allow(clippy::cast_possible_truncation)]
        let y = MARGIN + SWATCH * i as u32;
        let Rgb(r, g, b) = entry.color;
        writeln!(
            writer,
            r#"  <rect x="{MARGIN}" y="{y}" width="{SWATCH}" height="{SWATCH}" fill="rgb({r},{g},{b})"/>"#
        )?;
        writeln!(
            writer,
            r#"  <text x="{TEXT_X}" y="{}" font-family="Arial, sans-serif" font-size="{FONT_SIZE}">{}</text>"#,
            y + SWATCH - 20,
            escape_xml(&entry.label)
        )?;
    }

    writeln!(writer, "</svg>")
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_entries_order() {
        let categories = CategoryTable::load_embedded().unwrap();
        let entries = legend_entries(&categories);
        assert_eq!(entries.len(), 30);
        assert_eq!(
            entries[0].label,
            "[J] Translation, ribosomal structure and biogenesis"
        );
        assert_eq!(entries[26].color, Rgb::BLACK);
        assert_eq!(entries[29].label, "Non-coding RNA (ncRNA)");
    }

    #[test]
    fn test_legend_svg() {
        let categories = CategoryTable::load_embedded().unwrap();
        let mut buffer = Vec::new();
        write_legend_svg(&mut buffer, &categories).unwrap();
        let svg = String::from_utf8(buffer).unwrap();

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<text ").count(), 30);
        assert!(svg.contains(r#"<rect x="50" y="50" width="80" height="80" fill="rgb(30,117,176)"/>"#));
        // Last swatch row
        assert!(svg.contains(r#"y="2370""#));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }
}
