//! Adapter for eggNOG-mapper.
//!
//! eggNOG-mapper is run on the CDS FASTA of the genome and reports its hits in
//! a decorated GFF whose seqnames are the CDS identifiers. Genomic coordinates
//! are therefore recovered from the CDS definition lines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::attributes::Attributes;
use crate::core::feature::{FeatureRecord, UNASSIGNED};
use crate::core::types::Tool;
use crate::parsing::location::{accession, definition_id, parse_location, Location};
use crate::parsing::{fasta, gff, read_text, ParseError, ToolAdapter};

/// Reads `<organism>_eggnog.gff` together with `<organism>_cds.txt`
#[derive(Debug, Clone)]
pub struct EggnogMapper {
    pub decorated_gff: PathBuf,
    pub cds_fasta: PathBuf,
}

impl EggnogMapper {
    pub fn new(decorated_gff: impl Into<PathBuf>, cds_fasta: impl Into<PathBuf>) -> Self {
        Self {
            decorated_gff: decorated_gff.into(),
            cds_fasta: cds_fasta.into(),
        }
    }
}

impl ToolAdapter for EggnogMapper {
    fn tool(&self) -> Tool {
        Tool::EggnogMapper
    }

    fn load(&self) -> Result<Vec<FeatureRecord>, ParseError> {
        let cds = load_cds_locations(&self.cds_fasta)?;
        let gff_text = read_text(&self.decorated_gff)?;
        parse_eggnog_text(&gff_text, &cds).map_err(|e| e.in_file(&self.decorated_gff))
    }
}

/// Genomic placement of one CDS, taken from its definition line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdsPlacement {
    pub accession: String,
    pub location: Location,
}

fn load_cds_locations(path: &Path) -> Result<HashMap<String, CdsPlacement>, ParseError> {
    let text = read_text(path)?;
    let definitions = fasta::read_definitions(&text).map_err(|e| e.in_file(path))?;
    cds_locations(&definitions).map_err(|e| e.in_file(path))
}

/// Map each CDS identifier to its accession and location.
///
/// # Errors
///
/// Returns `ParseError::UnrecognizedFormat` if a definition line has no
/// recognizable location.
pub fn cds_locations(definitions: &[String]) -> Result<HashMap<String, CdsPlacement>, ParseError> {
    let mut placements = HashMap::with_capacity(definitions.len());

    for (i, definition) in definitions.iter().enumerate() {
        let at = format!("record {}", i + 1);
        let id = definition_id(definition);
        let location = parse_location(definition).ok_or_else(|| {
            ParseError::unrecognized(at.as_str(), format!("no location in '{definition}'"))
        })?;
        let accession = accession(id)
            .or_else(|| id.split('_').next())
            .unwrap_or(id)
            .to_string();

        placements.insert(
            id.to_string(),
            CdsPlacement {
                accession,
                location,
            },
        );
    }

    Ok(placements)
}

/// Normalize a decorated GFF using the CDS placements.
///
/// Rows are relocated to the genomic coordinates of their CDS and their
/// attribute column is rewritten as `ID=..;COG=..;CAT=..;name=..;desc=..`.
/// Rows whose seqname matches no CDS keep their own coordinates.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if a row is malformed, has no `ID`, or
/// is still unstranded after relocation.
pub fn parse_eggnog_text(
    gff_text: &str,
    cds: &HashMap<String, CdsPlacement>,
) -> Result<Vec<FeatureRecord>, ParseError> {
    let rows = gff::parse_gff_text(gff_text)?;
    let mut records = Vec::with_capacity(rows.len());
    let mut unplaced = 0usize;

    for mut row in rows {
        let raw = row.attributes.to_string();
        let value = |key: &str| gff::loose_attribute(&raw, key);

        let id = value("ID").filter(|id| !id.is_empty()).ok_or_else(|| {
            ParseError::malformed(
                format!("start {}", row.start),
                "attribute column has no ID",
            )
        })?;
        let cog = value("em_OGs")
            .and_then(|ogs| ogs.split('@').next())
            .filter(|cog| !cog.is_empty())
            .unwrap_or(UNASSIGNED);
        let category = match value("em_COG_cat") {
            Some("None") => "S",
            Some(category) if !category.is_empty() => category,
            _ => UNASSIGNED,
        };
        let name = value("em_Preferred_name")
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED);
        let description = value("em_desc").unwrap_or(UNASSIGNED);

        let attributes = Attributes::new()
            .with("ID", id)
            .with("COG", cog)
            .with("CAT", category)
            .with("name", name)
            .with("desc", description);

        match cds.get(&row.seqname) {
            Some(placement) => {
                row.seqname.clone_from(&placement.accession);
                row.strand = placement.location.strand;
                row.start = placement.location.start;
                row.end = placement.location.end;
            }
            None => {
                debug!(seqname = %row.seqname, "No CDS definition for eggNOG-mapper row");
                unplaced += 1;
            }
        }

        gff::require_strand(&row)?;
        row.attributes = attributes;
        records.push(FeatureRecord::new(Tool::EggnogMapper, row));
    }

    if unplaced > 0 {
        warn!(
            unplaced,
            "eggNOG-mapper rows without a CDS definition keep their own coordinates"
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Strand;

    const CDS: &str = ">lcl|NC_000913.3_cds_NP_414542.1_1 [gene=thrL] [locus_tag=b0001] [location=190..255] [gbkey=CDS]
ATGAAACGCATTAGCACCACCATTACCACCACCATCACCATTACCACAGGTAACGGTGCGGGCTGA
>lcl|NC_000913.3_cds_NP_414557.1_16 [gene=mog] [location=complement(9306..9893)] [gbkey=CDS]
ATGAATACTTTACGTATTGGCTTAGTTTCCATCTCTGA
";

    const DECORATED: &str = "##gff-version 3
lcl|NC_000913.3_cds_NP_414542.1_1\teggNOG-mapper\tCDS\t1\t66\t40.5\t+\t0\tID=thrL_1;em_target=511145.b0001;em_OGs=COG0001@1|root,COG0001@2|Bacteria;em_COG_cat=E;em_desc=thr operon leader peptide;em_Preferred_name=thrL
lcl|NC_000913.3_cds_NP_414557.1_16\teggNOG-mapper\tCDS\t1\t588\t300.1\t+\t0\tID=mog_16;em_OGs=COG0521@1|root;em_COG_cat=None;em_desc=molybdopterin
";

    fn placements() -> HashMap<String, CdsPlacement> {
        cds_locations(&fasta::read_definitions(CDS).unwrap()).unwrap()
    }

    #[test]
    fn test_cds_locations() {
        let cds = placements();
        assert_eq!(cds.len(), 2);
        let mog = &cds["lcl|NC_000913.3_cds_NP_414557.1_16"];
        assert_eq!(mog.accession, "NC_000913.3");
        assert_eq!(mog.location.strand, Strand::Reverse);
        assert_eq!((mog.location.start, mog.location.end), (9306, 9893));
    }

    #[test]
    fn test_parse_eggnog_relocates_and_rewrites_attributes() {
        let records = parse_eggnog_text(DECORATED, &placements()).unwrap();
        assert_eq!(records.len(), 2);

        let thrl = &records[0];
        assert_eq!(thrl.tool, Tool::EggnogMapper);
        assert_eq!(thrl.row.seqname, "NC_000913.3");
        assert_eq!((thrl.row.start, thrl.row.end), (190, 255));
        assert_eq!(thrl.label(), Some("COG0001"));
        assert_eq!(
            thrl.row.attributes.to_string(),
            "ID=thrL_1;COG=COG0001;CAT=E;name=thrL;desc=thr operon leader peptide"
        );

        let mog = &records[1];
        assert_eq!(mog.row.strand, Strand::Reverse);
        assert_eq!(mog.row.start, 9306);
        // 'None' category is read as function unknown, missing name as '-'
        assert_eq!(mog.row.attributes.get("CAT"), Some("S"));
        assert_eq!(mog.row.attributes.get("name"), Some("-"));
    }

    #[test]
    fn test_row_without_cds_keeps_coordinates() {
        let gff = "orphan\teggNOG-mapper\tCDS\t5\t50\t.\t+\t0\tID=o1;em_OGs=COG9@1\n";
        let records = parse_eggnog_text(gff, &placements()).unwrap();
        assert_eq!(records[0].row.seqname, "orphan");
        assert_eq!(records[0].row.start, 5);
    }

    #[test]
    fn test_unstranded_row_takes_strand_from_cds() {
        let gff = "lcl|NC_000913.3_cds_NP_414542.1_1\teggNOG-mapper\tCDS\t1\t66\t.\t.\t0\tID=thrL_1\n";
        let records = parse_eggnog_text(gff, &placements()).unwrap();
        assert_eq!(records[0].row.strand, Strand::Forward);
    }

    #[test]
    fn test_unstranded_row_without_cds_is_malformed() {
        let gff = "x\teggNOG-mapper\tCDS\t5\t50\t.\t.\t0\tID=o1;em_OGs=COG9@1\n";
        let err = parse_eggnog_text(gff, &placements()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput { ref at, .. } if at == "start 5"));
    }

    #[test]
    fn test_missing_ogs_is_unassigned() {
        let gff = "x\teggNOG-mapper\tCDS\t5\t50\t.\t+\t0\tID=o1\n";
        let records = parse_eggnog_text(gff, &HashMap::new()).unwrap();
        assert_eq!(records[0].label(), None);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let gff = "x\teggNOG-mapper\tCDS\t5\t50\t.\t+\t0\tem_OGs=COG9@1\n";
        let err = parse_eggnog_text(gff, &HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("start 5"));
    }

    #[test]
    fn test_definition_without_location_is_unrecognized() {
        let definitions = vec!["lcl|NC_1_cds_X_1 [gene=abc]".to_string()];
        assert!(matches!(
            cds_locations(&definitions),
            Err(ParseError::UnrecognizedFormat { .. })
        ));
    }
}
