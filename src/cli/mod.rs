//! Command-line interface for COGor.
//!
//! Available commands:
//!
//! - **annotate**: Build the consensus annotation of one organism
//! - **track**: Write the DNAPlotter track template and legend only
//! - **split-cds**: Split a CDS FASTA for web Batch CD-Search submission
//! - **merge-hits**: Merge several Batch CD-Search hitdata reports
//!
//! ## Usage
//!
//! ```text
//! # Consensus for files named ecoli_* in ./data, writing to ./results
//! cogor annotate -n ecoli -i data -o results
//!
//! # Also write track_template and legend.svg
//! cogor annotate -n ecoli -i data -o results --track
//!
//! # Summary as JSON for scripting
//! cogor --format json annotate -n ecoli -i data
//!
//! # Prepare CD-Search input and merge its results
//! cogor split-cds -n ecoli ecoli_cds.txt
//! cogor merge-hits -n ecoli hitdata1.txt hitdata2.txt
//! ```

use clap::{Parser, Subcommand};

pub mod annotate;
pub mod prepare;
pub mod track;

#[derive(Parser)]
#[command(name = "cogor")]
#[command(author = "COGor developers")]
#[command(version)]
#[command(about = "Consensus COG annotation of bacterial genomes")]
#[command(
    long_about = "COGor reconciles the functional annotations of eggNOG-mapper, Operon-mapper and Batch CD-Search into one consensus annotation per gene.\n\nFor every gene start coordinate it:\n- Compares the COG assigned by each tool\n- Keeps the record of the most trusted agreeing tool\n- Marks reference pseudogenes and adds reference ncRNAs\n- Writes a table ready for plotting with DNAPlotter"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the consensus annotation of one organism
    Annotate(annotate::AnnotateArgs),

    /// Write the track template and legend
    Track(track::TrackArgs),

    /// Split a CDS FASTA that is too large for one web CD-Search submission
    SplitCds(prepare::SplitCdsArgs),

    /// Merge Batch CD-Search hitdata reports into one
    MergeHits(prepare::MergeHitsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
