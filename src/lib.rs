//! # cogor
//!
//! Consensus functional annotation of bacterial genomes.
//!
//! eggNOG-mapper, Operon-mapper and NCBI Batch CD-Search each assign COG
//! identifiers to the genes of a genome, and they often disagree. `cogor` joins
//! their predictions on gene start coordinate, keeps one record per gene using
//! a fixed trust order, and writes a table ready for plotting with DNAPlotter.
//!
//! ## Features
//!
//! - **Tool adapters**: Normalize each tool's report into nine-column records
//! - **Consensus**: Classify how the three labels agree and keep the most
//!   trusted tool's record
//! - **Reference augmentation**: Mark pseudogenes and add ncRNAs from a GFF3
//! - **Plotting outputs**: Consensus table with the genome appended, track
//!   template and SVG legend
//!
//! ## Example
//!
//! ```rust,no_run
//! use cogor::{PipelineConfig, Tool};
//!
//! let config = PipelineConfig {
//!     organism: "ecoli".to_string(),
//!     input_dir: "data".into(),
//!     output_dir: "results".into(),
//!     track: true,
//!     ..PipelineConfig::default()
//! };
//!
//! let report = cogor::pipeline::run(&config).unwrap();
//! for summary in &report.tools {
//!     println!("{}: kept {} of {}", summary.tool, summary.chosen, summary.records);
//! }
//! assert_eq!(report.tools[0].tool, Tool::EggnogMapper);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Feature records, tools and COG categories
//! - [`parsing`]: Tool adapters and file readers
//! - [`consensus`]: Agreement classification, resolution and augmentation
//! - [`export`]: Consensus table, track template and legend writers
//! - [`pipeline`]: One complete run for an organism
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod consensus;
pub mod core;
pub mod export;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use consensus::{Agreement, ResolvedFeature};
pub use core::feature::{FeatureRecord, GffRecord};
pub use core::types::*;
pub use parsing::ToolAdapter;
pub use pipeline::{PipelineConfig, PipelineReport};
