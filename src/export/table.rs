use std::io::{BufWriter, Write};
use std::path::Path;

use crate::consensus::ResolvedFeature;
use crate::core::feature::{FeatureRecord, GffRecord, COLUMNS};

/// Name of the consensus table written to the output directory
pub const CONSENSUS_FILE: &str = "file_to_plot.txt";

/// Write `path` by filling a temporary file in the same directory and renaming
/// it into place once `fill` succeeds.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, `fill` fails, or
/// the rename fails. The destination is left untouched in every case.
pub fn write_atomically<F>(path: &Path, fill: F) -> std::io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        fill(&mut writer as &mut dyn Write)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write the consensus table: one header-less row per feature, then a blank
/// line and the genome FASTA text unchanged.
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_consensus_table(
    writer: &mut dyn Write,
    features: &[ResolvedFeature],
    genome_fasta: &str,
) -> std::io::Result<()> {
    write_rows(writer, features.iter().map(|f| &f.row))?;
    writeln!(writer)?;
    writer.write_all(genome_fasta.as_bytes())
}

/// Write one tool's normalized records as a nine-column table with a header row
///
/// # Errors
///
/// Returns any IO error from the writer.
pub fn write_tool_table(writer: &mut dyn Write, records: &[FeatureRecord]) -> std::io::Result<()> {
    writeln!(writer, "{}", COLUMNS.join("\t"))?;
    write_rows(writer, records.iter().map(|r| &r.row))
}

fn write_rows<'a>(
    writer: &mut dyn Write,
    rows: impl Iterator<Item = &'a GffRecord>,
) -> std::io::Result<()> {
    for row in rows {
        writeln!(writer, "{row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::Origin;
    use crate::core::feature::test_row;
    use crate::core::types::Tool;
    use crate::parsing::gff::parse_gff_text;

    fn reference_feature(start: u64) -> ResolvedFeature {
        ResolvedFeature {
            row: test_row(start, start + 99, "ID=rna-1"),
            origin: Origin::Reference,
        }
    }

    #[test]
    fn test_consensus_table_layout() {
        let features = vec![reference_feature(100), reference_feature(500)];
        let mut buffer = Vec::new();
        write_consensus_table(&mut buffer, &features, ">chr\nACGT\n").unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "NC_000913.3\ttest\tCDS\t100\t199\t.\t+\t0\tID=rna-1\n\
             NC_000913.3\ttest\tCDS\t500\t599\t.\t+\t0\tID=rna-1\n\
             \n>chr\nACGT\n"
        );
    }

    #[test]
    fn test_tool_table_reads_back() {
        let records = vec![FeatureRecord::new(
            Tool::CdSearch,
            test_row(190, 255, "COG=COG0001"),
        )];
        let mut buffer = Vec::new();
        write_tool_table(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("seqname\tsource\ttype\tstart"));
        let rows = parse_gff_text(&text).unwrap();
        assert_eq!(rows, vec![records[0].row.clone()]);
    }

    #[test]
    fn test_write_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_atomically(&path, |w| w.write_all(b"first")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        let failed = write_atomically(&path, |w| {
            w.write_all(b"partial")?;
            Err(std::io::Error::other("interrupted"))
        });
        assert!(failed.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
