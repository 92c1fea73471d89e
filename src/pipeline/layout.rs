use std::path::{Path, PathBuf};

use crate::parsing::cd_search::CdSearch;
use crate::parsing::eggnog::EggnogMapper;
use crate::parsing::operon::OperonMapper;
use crate::pipeline::PipelineError;

/// Paths of every input file for one organism.
///
/// Files are named after the organism inside the input directory. A gzipped
/// copy (`<name>.gz`) is used when the plain file is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    pub eggnog_gff: PathBuf,
    pub cds_fasta: PathBuf,
    pub orf_coordinates: PathBuf,
    pub predicted_cogs: PathBuf,
    pub hitdata: PathBuf,
    pub genome_fasta: PathBuf,
    pub reference_gff: PathBuf,
}

impl InputLayout {
    pub fn new(input_dir: &Path, organism: &str) -> Self {
        let file = |suffix: &str| locate(input_dir, &format!("{organism}{suffix}"));
        Self {
            eggnog_gff: file("_eggnog.gff"),
            cds_fasta: file("_cds.txt"),
            orf_coordinates: file("_orf_operon.txt"),
            predicted_cogs: file("_cog_operon.txt"),
            hitdata: file("_batch.txt"),
            genome_fasta: file(".fasta"),
            reference_gff: file(".gff3"),
        }
    }

    /// Files read by the tool adapters and the exporter
    pub fn required(&self) -> [&Path; 6] {
        [
            self.eggnog_gff.as_path(),
            self.cds_fasta.as_path(),
            self.orf_coordinates.as_path(),
            self.predicted_cogs.as_path(),
            self.hitdata.as_path(),
            self.genome_fasta.as_path(),
        ]
    }

    /// Fail on the first missing file, before anything is parsed.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::MissingFile` naming the missing path.
    pub fn check(&self, with_reference: bool) -> Result<(), PipelineError> {
        let reference = with_reference.then_some(self.reference_gff.as_path());
        match self
            .required()
            .into_iter()
            .chain(reference)
            .find(|path| !path.is_file())
        {
            Some(missing) => Err(PipelineError::MissingFile(missing.to_path_buf())),
            None => Ok(()),
        }
    }

    pub fn eggnog(&self) -> EggnogMapper {
        EggnogMapper::new(&self.eggnog_gff, &self.cds_fasta)
    }

    pub fn operon(&self) -> OperonMapper {
        OperonMapper::new(&self.orf_coordinates, &self.predicted_cogs)
    }

    pub fn cd_search(&self) -> CdSearch {
        CdSearch::new(&self.hitdata)
    }
}

fn locate(dir: &Path, name: &str) -> PathBuf {
    let plain = dir.join(name);
    if !plain.exists() {
        let gzipped = dir.join(format!("{name}.gz"));
        if gzipped.exists() {
            return gzipped;
        }
    }
    plain
}
