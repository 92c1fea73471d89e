//! One end-to-end annotation run for a single organism.
//!
//! Stages, in order:
//!
//! 1. Check that every input file exists
//! 2. Load the three tools' outputs through their adapters
//! 3. Resolve the consensus
//! 4. Augment with reference pseudogenes and ncRNAs
//! 5. Write the consensus table and, if requested, the intermediate tables,
//!    track template and legend
//!
//! Nothing is written until every input has been parsed and resolved.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::consensus::{
    augment, resolve_sets, AugmentOptions, AugmentStats, ConsensusError, Origin, ResolvedFeature,
    ToolSets,
};
use crate::core::category::{CategoryError, CategoryTable};
use crate::core::types::Tool;
use crate::export::legend::{write_legend_svg, LEGEND_FILE};
use crate::export::table::{write_consensus_table, write_tool_table, CONSENSUS_FILE};
use crate::export::track::{write_track_template, TrackLayout, TRACK_FILE};
use crate::export::write_atomically;
use crate::parsing::fasta::{summarize_genome, GenomeSummary};
use crate::parsing::{gff, read_text, ParseError, ToolAdapter};
use crate::utils::validation::{validate_organism_name, ValidationError};

pub mod layout;

pub use layout::InputLayout;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing input file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    InvalidOrganism(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Consensus failed: {0}")]
    Consensus(#[from] ConsensusError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub organism: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub augment: AugmentOptions,
    /// Also write the track template and legend
    pub track: bool,
    pub track_layout: TrackLayout,
    /// Also write the normalized per-tool tables
    pub keep_intermediate: bool,
    /// Category table to use instead of the embedded one
    pub categories: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            organism: String::new(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            augment: AugmentOptions::default(),
            track: false,
            track_layout: TrackLayout::default(),
            keep_intermediate: false,
            categories: None,
        }
    }
}

impl PipelineConfig {
    /// Whether the reference GFF3 has to be read
    pub fn needs_reference(&self) -> bool {
        self.augment.reclassify_pseudogenes || self.augment.include_ncrna
    }
}

/// Per-tool counts
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub tool: Tool,
    /// Records read from the tool's output
    pub records: usize,
    /// Resolved features that kept this tool's record
    pub chosen: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub organism: String,
    pub tools: Vec<ToolSummary>,
    /// Rows in the consensus table
    pub features: usize,
    /// Resolved coordinates per agreement class
    pub agreements: BTreeMap<&'static str, usize>,
    pub augment: AugmentStats,
    pub genome: GenomeSummary,
    pub outputs: Vec<PathBuf>,
}

/// Run the whole pipeline for `config.organism`.
///
/// # Errors
///
/// Returns the first failure: an invalid organism name, a missing input file, a
/// parse or consensus error naming the offending file or coordinate, or an
/// output that could not be written.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let organism = validate_organism_name(&config.organism)?;
    let layout = InputLayout::new(&config.input_dir, &organism);
    layout.check(config.needs_reference())?;

    info!(%organism, input_dir = %config.input_dir.display(), "Loading tool outputs");
    let sets = load_tool_sets(&layout)?;

    let resolved = resolve_sets(&sets)?;
    info!(features = resolved.len(), "Resolved consensus");

    let reference = if config.needs_reference() {
        let text = read_text(&layout.reference_gff)?;
        gff::parse_reference_text(&text).map_err(|e| e.in_file(&layout.reference_gff))?
    } else {
        Vec::new()
    };
    let (features, augment_stats) = augment(resolved, &reference, config.augment);

    let genome_text = read_text(&layout.genome_fasta)?;
    let genome = summarize_genome(&genome_text).map_err(|e| e.in_file(&layout.genome_fasta))?;
    info!(
        sequences = genome.sequences,
        length = genome.total_length,
        "Read genome"
    );

    let categories = if config.track {
        Some(match &config.categories {
            Some(path) => CategoryTable::load_from_file(path)?,
            None => CategoryTable::load_embedded()?,
        })
    } else {
        None
    };

    std::fs::create_dir_all(&config.output_dir).map_err(|source| PipelineError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let mut outputs = Vec::new();

    if config.keep_intermediate {
        for tool in Tool::ALL {
            let path = config
                .output_dir
                .join(format!("{}_{organism}.gff", tool.file_prefix()));
            write_output(&path, |w| write_tool_table(w, sets.get(tool)))?;
            outputs.push(path);
        }
    }

    let path = config.output_dir.join(CONSENSUS_FILE);
    write_output(&path, |w| write_consensus_table(w, &features, &genome_text))?;
    outputs.push(path);

    if let Some(categories) = &categories {
        let path = config.output_dir.join(TRACK_FILE);
        write_output(&path, |w| {
            write_track_template(w, categories, &config.track_layout)
        })?;
        outputs.push(path);

        let path = config.output_dir.join(LEGEND_FILE);
        write_output(&path, |w| write_legend_svg(w, categories))?;
        outputs.push(path);
    }

    Ok(PipelineReport {
        organism,
        tools: tool_summaries(&sets, &features),
        features: features.len(),
        agreements: count_agreements(&features),
        augment: augment_stats,
        genome,
        outputs,
    })
}

fn load_tool_sets(layout: &InputLayout) -> Result<ToolSets, PipelineError> {
    let mut sets = ToolSets::default();
    let (eggnog, operon, cd_search) = (layout.eggnog(), layout.operon(), layout.cd_search());
    let adapters: [&dyn ToolAdapter; 3] = [&eggnog, &operon, &cd_search];

    for adapter in adapters {
        let records = adapter.load()?;
        info!(tool = %adapter.tool(), records = records.len(), "Loaded tool output");
        sets.set(adapter.tool(), records);
    }

    Ok(sets)
}

fn write_output<F>(path: &Path, fill: F) -> Result<(), PipelineError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    write_atomically(path, fill).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Wrote output");
    Ok(())
}

fn tool_summaries(sets: &ToolSets, features: &[ResolvedFeature]) -> Vec<ToolSummary> {
    Tool::ALL
        .into_iter()
        .map(|tool| ToolSummary {
            tool,
            records: sets.get(tool).len(),
            chosen: features
                .iter()
                .filter(|f| f.chosen_tool() == Some(tool))
                .count(),
        })
        .collect()
}

fn count_agreements(features: &[ResolvedFeature]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for feature in features {
        if let Origin::Consensus { agreement, .. } = feature.origin {
            *counts.entry(agreement.name()).or_insert(0) += 1;
        }
    }
    counts
}
