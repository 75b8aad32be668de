// src/lib.rs
pub mod error;
pub mod types;
pub mod taxonomy;
pub mod normalize;
pub mod functional;
pub mod table;
pub mod orf_table;
pub mod readers;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

pub use crate::error::{AggregateError, Result};
pub use crate::orf_table::{parse_orf_table, read_orf_names, OrfTableOptions, MARKER_COG};
pub use crate::readers::{parse_bin_table, parse_contig_table, parse_tax_table};
pub use crate::taxonomy::{aggregate_tax_abunds, parse_tax_string, TAXRANKS, TAXRANKS_SHORT};
pub use crate::types::{
    EntityStats, EntityVectors, FunctionInfo, OrfTableOutput, SchemeAggregate, Statistic, TaxTable,
};

use crate::report::{render_info_table, write_row_table};

/// Write every table of one level: the five statistics, TPM, copy numbers
/// (when computed) and the function info table (when non-empty).
///
/// Files are named `<prefix>.<label>.tsv`. Returns the paths written.
pub fn write_aggregate(
    out_dir: &Path,
    prefix: &str,
    sample_names: &[String],
    aggregate: &SchemeAggregate,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let path_for = |label: &str| out_dir.join(format!("{}.{}.tsv", prefix, label));

    for stat in Statistic::ALL {
        let path = path_for(stat.label());
        write_row_table(&path, sample_names, &aggregate.column(stat))?;
        written.push(path);
    }

    let path = path_for("tpm");
    write_row_table(&path, sample_names, &aggregate.tpm)?;
    written.push(path);

    if let Some(copy_number) = &aggregate.copy_number {
        let path = path_for("copyNumber");
        write_row_table(&path, sample_names, copy_number)?;
        written.push(path);
    }

    if !aggregate.info.is_empty() {
        let path = path_for("info");
        fs::write(&path, render_info_table(&aggregate.info))?;
        written.push(path);
    }
    Ok(written)
}

/// Aggregate an ORF table and write all levels under `out_dir`:
/// `orfs.*.tsv` plus one set per enabled scheme (`KEGG.*.tsv`, `COG.*.tsv`, ...).
pub fn aggregate_orf_table<P: AsRef<Path>>(
    orf_table: P,
    out_dir: &Path,
    options: &OrfTableOptions,
) -> Result<(OrfTableOutput, Vec<PathBuf>)> {
    let output = parse_orf_table(orf_table, options)?;
    fs::create_dir_all(out_dir)?;

    let mut written = write_aggregate(out_dir, "orfs", &output.sample_names, &output.orfs)?;
    for (name, aggregate) in &output.schemes {
        written.extend(write_aggregate(out_dir, name, &output.sample_names, aggregate)?);
    }
    log::info!("Wrote {} tables to {}", written.len(), out_dir.display());
    Ok((output, written))
}
