use std::path::PathBuf;
use std::process;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use sqm_aggregate::{aggregate_orf_table, read_orf_names, OrfTableOptions};

/// Aggregate a SqueezeMeta ORF table into per-function abundance tables.
#[derive(Parser)]
#[command(name = "sqm-aggregate", version, about)]
struct Cli {
    /// ORF table (plain or .gz)
    orf_table: PathBuf,

    /// Directory for the output tables
    #[arg(short, long, default_value = "sqm_tables")]
    out_dir: PathBuf,

    /// Skip KEGG aggregation
    #[arg(long)]
    no_kegg: bool,

    /// Skip COG aggregation (also disables copy numbers)
    #[arg(long)]
    no_cog: bool,

    /// Skip PFAM aggregation
    #[arg(long)]
    no_pfam: bool,

    /// Only use annotations confirmed by the bestaver algorithm
    #[arg(long)]
    trusted_only: bool,

    /// Drop ORFs without annotation instead of pooling them as "Unclassified"
    #[arg(long)]
    ignore_unclassified: bool,

    /// Custom annotation method (column name); can be repeated
    #[arg(long = "custom", value_name = "METHOD")]
    custom_methods: Vec<String>,

    /// Only aggregate ORFs listed in this ORF table
    #[arg(long, value_name = "TABLE")]
    orf_list: Option<PathBuf>,
}

fn spinner(color: &str, msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let template = format!("{{spinner:.{}}} {{msg}}", color);
    match ProgressStyle::default_spinner().template(&template) {
        Ok(style) => spinner.set_style(
            style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        ),
        Err(e) => log::debug!("Invalid spinner template: {}", e),
    }
    spinner.set_message(msg.to_string());
    spinner
}

fn run(cli: Cli) -> sqm_aggregate::Result<()> {
    let mut options = OrfTableOptions::default()
        .trusted_only(cli.trusted_only)
        .ignore_unclassified(cli.ignore_unclassified);
    if cli.no_kegg {
        options = options.without_kegg();
    }
    if cli.no_cog {
        options = options.without_cog();
    }
    if cli.no_pfam {
        options = options.without_pfam();
    }
    for method in &cli.custom_methods {
        options = options.with_custom_scheme(method);
    }

    if let Some(orf_list) = &cli.orf_list {
        let spinner = spinner("blue", "Reading ORF list...");
        let orfs = read_orf_names(orf_list)?;
        spinner.finish_with_message(format!("Restricting to {} ORF(s).", orfs.len()));
        options = options.restrict_to(orfs);
    }

    let spinner = spinner("green", "Aggregating ORF table...");
    let (output, written) = aggregate_orf_table(&cli.orf_table, &cli.out_dir, &options)?;
    spinner.finish_with_message(format!(
        "Aggregated {} ORF(s) across {} sample(s) into {} table(s).",
        output.orfs.stats.len(),
        output.sample_names.len(),
        written.len()
    ));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        process::exit(1);
    }
}
