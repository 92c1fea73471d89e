use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::consensus::AugmentOptions;
use crate::export::track::TrackLayout;
use crate::pipeline::{self, PipelineConfig, PipelineReport};

#[derive(Args)]
pub struct AnnotateArgs {
    /// Organism name; input files are looked up as <NAME>_eggnog.gff, <NAME>_cds.txt,
    /// <NAME>_orf_operon.txt, <NAME>_cog_operon.txt, <NAME>_batch.txt, <NAME>.fasta
    /// and <NAME>.gff3
    #[arg(short = 'n', long)]
    pub name: String,

    /// Directory holding the input files
    #[arg(short, long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory to write results to (created if missing)
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write track_template and legend.svg for DNAPlotter
    #[arg(short, long)]
    pub track: bool,

    /// Do not mark reference pseudogenes
    #[arg(long)]
    pub no_pseudogenes: bool,

    /// Do not add reference ncRNAs
    #[arg(long)]
    pub no_ncrna: bool,

    /// Also write the normalized per-tool tables (em_, om_ and batch_<NAME>.gff)
    #[arg(long)]
    pub keep_intermediate: bool,

    /// Feature size in the track template
    #[arg(long, default_value = "10.0")]
    pub track_size: f64,

    /// Custom category table (JSON) for the track template and legend
    #[arg(long)]
    pub categories: Option<PathBuf>,
}

impl AnnotateArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            organism: self.name.clone(),
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            augment: AugmentOptions {
                reclassify_pseudogenes: !self.no_pseudogenes,
                include_ncrna: !self.no_ncrna,
            },
            track: self.track,
            track_layout: TrackLayout::default().with_size(self.track_size),
            keep_intermediate: self.keep_intermediate,
            categories: self.categories.clone(),
        }
    }
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if an input is missing or malformed, or if the outputs
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.to_config();

    if verbose {
        eprintln!(
            "Annotating '{}' from {} into {}",
            config.organism,
            config.input_dir.display(),
            config.output_dir.display()
        );
    }

    let report = pipeline::run(&config)?;

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &PipelineReport) {
    println!("COGor consensus for {}", report.organism);
    println!("{}", "=".repeat(60));
    println!(
        "Genome: {} sequence(s), {} bp",
        report.genome.sequences, report.genome.total_length
    );

    println!("\nTool records (kept in consensus):");
    for summary in &report.tools {
        println!(
            "  {:<18} {:>7} ({})",
            summary.tool.to_string(),
            summary.records,
            summary.chosen
        );
    }

    println!("\nAgreement:");
    for (agreement, count) in &report.agreements {
        println!("  {agreement:<22} {count:>7}");
    }

    println!(
        "\nReference: {} pseudogene(s) marked, {} ncRNA(s) added",
        report.augment.pseudogenes_reclassified, report.augment.ncrna_added
    );
    println!("Features written: {}", report.features);

    println!("\nOutputs:");
    for path in &report.outputs {
        println!("  {}", path.display());
    }
}

fn print_tsv_report(report: &PipelineReport) {
    println!("organism\tfeatures\ttool\trecords\tchosen\tpseudogenes\tncrna\tsequences\tgenome_length");
    for summary in &report.tools {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            report.organism,
            report.features,
            summary.tool,
            summary.records,
            summary.chosen,
            report.augment.pseudogenes_reclassified,
            report.augment.ncrna_added,
            report.genome.sequences,
            report.genome.total_length
        );
    }
}
