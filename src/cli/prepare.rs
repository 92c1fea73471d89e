//! Helpers around web Batch CD-Search, which accepts a limited number of
//! queries per submission.

use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::export::write_atomically;
use crate::parsing::cd_search::merge_hitdata;
use crate::parsing::fasta::{
    read_records, split_for_cd_search, write_records, CD_SEARCH_QUERY_LIMIT,
};
use crate::parsing::read_text;
use crate::utils::validation::validate_organism_name;

#[derive(Args)]
pub struct SplitCdsArgs {
    /// CDS FASTA to split
    #[arg(required = true)]
    pub input: PathBuf,

    /// Organism name; output files are <NAME>_genes1.fasta and <NAME>_genes2.fasta
    #[arg(short = 'n', long)]
    pub name: String,

    /// Directory to write the parts to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Args)]
pub struct MergeHitsArgs {
    /// Hitdata reports, in submission order
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<PathBuf>,

    /// Organism name; the output file is <NAME>_merged_hitdata.txt
    #[arg(short = 'n', long)]
    pub name: String,

    /// Directory to write the merged report to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Execute split-cds subcommand
///
/// # Errors
///
/// Returns an error if the FASTA cannot be read or the parts cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_split(args: SplitCdsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let name = validate_organism_name(&args.name)?;
    let text = read_text(&args.input)?;
    let records = read_records(&text).map_err(|e| e.in_file(&args.input))?;
    let total = records.len();

    if verbose {
        eprintln!("Read {total} CDS records from {}", args.input.display());
    }

    let Some((first, second)) = split_for_cd_search(records) else {
        eprintln!(
            "{} holds {total} sequences, within the limit of {CD_SEARCH_QUERY_LIMIT}; no split is needed.",
            args.input.display()
        );
        return Ok(());
    };

    std::fs::create_dir_all(&args.output_dir)?;
    let mut parts = Vec::new();
    for (i, records) in [first, second].iter().enumerate() {
        let path = args.output_dir.join(format!("{name}_genes{}.fasta", i + 1));
        write_atomically(&path, |w| write_records(w, records))?;
        parts.push((path, records.len()));
    }

    match format {
        OutputFormat::Text => {
            for (path, count) in &parts {
                println!("{}: {count} sequences", path.display());
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = parts
                .iter()
                .map(|(path, count)| serde_json::json!({ "path": path, "sequences": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("path\tsequences");
            for (path, count) in &parts {
                println!("{}\t{count}", path.display());
            }
        }
    }

    Ok(())
}

/// Execute merge-hits subcommand
///
/// # Errors
///
/// Returns an error if a report cannot be read or has no queries, or the merged
/// report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_merge(args: MergeHitsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let name = validate_organism_name(&args.name)?;
    let reports = args
        .inputs
        .iter()
        .map(|path| read_text(path))
        .collect::<Result<Vec<_>, _>>()?;

    let merged = merge_hitdata(&reports)?;
    let lines = merged.lines().count();
    if verbose {
        eprintln!("Merged {} reports into {lines} lines", reports.len());
    }

    std::fs::create_dir_all(&args.output_dir)?;
    let path = args.output_dir.join(format!("{name}_merged_hitdata.txt"));
    write_atomically(&path, |w| w.write_all(merged.as_bytes()))?;

    match format {
        OutputFormat::Text => println!("{}: {lines} lines", path.display()),
        OutputFormat::Json => {
            let output = serde_json::json!({ "path": path, "reports": reports.len(), "lines": lines });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("path\treports\tlines");
            println!("{}\t{}\t{lines}", path.display(), reports.len());
        }
    }

    Ok(())
}
