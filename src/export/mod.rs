//! Writers for the consensus table and the auxiliary plotting files.
//!
//! - [`table`]: `file_to_plot.txt` and the per-tool intermediate tables
//! - [`track`]: DNAPlotter track manager template
//! - [`legend`]: SVG legend mapping categories to their colors
//!
//! Every file is first written to a temporary file in the destination
//! directory and only renamed into place once complete, so a failed run never
//! leaves a half-written output behind.

pub mod legend;
pub mod table;
pub mod track;

pub use table::write_atomically;
