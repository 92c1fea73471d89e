use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::category::CategoryTable;
use crate::export::legend::{write_legend_svg, LEGEND_FILE};
use crate::export::track::{write_track_template, TrackLayout, TRACK_FILE};
use crate::export::write_atomically;

#[derive(Args)]
pub struct TrackArgs {
    /// Directory to write track_template and legend.svg to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Feature size in the track template
    #[arg(long, default_value = "10.0")]
    pub track_size: f64,

    /// Custom category table (JSON)
    #[arg(long)]
    pub categories: Option<PathBuf>,
}

/// Execute track subcommand
///
/// # Errors
///
/// Returns an error if the category table cannot be loaded or the files cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TrackArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let categories = match &args.categories {
        Some(path) => CategoryTable::load_from_file(path)?,
        None => CategoryTable::load_embedded()?,
    };
    if verbose {
        eprintln!("Loaded {} categories", categories.categories.len());
    }

    let layout = TrackLayout::default().with_size(args.track_size);
    std::fs::create_dir_all(&args.output_dir)?;

    let track_path = args.output_dir.join(TRACK_FILE);
    write_atomically(&track_path, |w| {
        write_track_template(w, &categories, &layout)
    })?;
    let legend_path = args.output_dir.join(LEGEND_FILE);
    write_atomically(&legend_path, |w| write_legend_svg(w, &categories))?;

    match format {
        OutputFormat::Text => {
            println!("Track template: {}", track_path.display());
            println!("Legend:         {}", legend_path.display());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "track_template": track_path,
                "legend": legend_path,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("track_template\tlegend");
            println!("{}\t{}", track_path.display(), legend_path.display());
        }
    }

    Ok(())
}
