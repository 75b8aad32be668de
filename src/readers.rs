//src/readers.rs

use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;
use crate::table::{cell, open_table, parse_count, parse_float, read_record, split_cells, TableHeader};
use crate::taxonomy::{parse_tax_string, UNCLASSIFIED_TAX};
use crate::types::{EntityVectors, TaxTable};

/// Taxonomy written by the consensus step when no consensus was reached.
pub const NO_CONSENSUS: &str = "No consensus";

fn tax_or_unclassified(tax: &str) -> &str {
    if tax.is_empty() || tax == NO_CONSENSUS {
        UNCLASSIFIED_TAX
    } else {
        tax
    }
}

fn insert_tax(table: &mut TaxTable, entity: &str, tax: &str) {
    let (tax_list, tax_list_wranks) = parse_tax_string(tax_or_unclassified(tax));
    table.tax.insert(entity.to_string(), tax_list);
    table.tax_wranks.insert(entity.to_string(), tax_list_wranks);
}

/// Parses a fun3 taxonomy file:
/// ```text
/// # comment
/// <orf>\t<taxonomy string>
/// ```
/// An ORF with no second cell is fully unclassified.
pub fn parse_tax_table<P: AsRef<Path>>(tax_table: P) -> Result<TaxTable> {
    let mut reader = open_table(tax_table)?;
    let mut table = TaxTable::default();
    let mut line = String::new();

    // Burn comment.
    read_record(&mut *reader, &mut line)?;
    while read_record(&mut *reader, &mut line)? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (orf, tax) = trimmed.split_once('\t').unwrap_or((trimmed, ""));
        insert_tax(&mut table, orf, tax);
    }
    Ok(table)
}

/// Shared pass over contig and bin tables: one ID column, one `Tax` column
/// and one value column per sample.
fn parse_entity_table(
    path: &Path,
    id_column: &str,
    sample_label: &str,
    parse: fn(&str, &str, usize) -> Result<f64>,
) -> Result<(Vec<String>, EntityVectors, TaxTable)> {
    let mut reader = open_table(path)?;
    let header = TableHeader::read(&mut *reader, path)?;
    let id_idx = header.require(id_column)?;
    let tax_idx = header.require("Tax")?;
    let samples = header.matching(sample_label);
    let sample_names = header.sample_names(sample_label);

    let mut abunds: EntityVectors = AHashMap::new();
    let mut table = TaxTable::default();
    let mut line = String::new();
    let mut line_no = 2;
    while read_record(&mut *reader, &mut line)? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_cells(&line);
        let entity = cell(&cells, id_idx);
        insert_tax(&mut table, entity, cell(&cells, tax_idx).trim());
        let values = samples
            .iter()
            .map(|&(i, name)| parse(cell(&cells, i), name, line_no))
            .collect::<Result<Vec<f64>>>()?;
        abunds.insert(entity.to_string(), values);
    }
    log::info!("Read {} entries from {}", abunds.len(), path.display());

    Ok((sample_names, abunds, table))
}

/// Parse a contig table: per-sample raw read counts and taxonomy per contig.
pub fn parse_contig_table<P: AsRef<Path>>(
    contig_table: P,
) -> Result<(Vec<String>, EntityVectors, TaxTable)> {
    parse_entity_table(contig_table.as_ref(), "Contig ID", "Raw read count", parse_count)
}

/// Parse a bin table: per-sample TPM and consensus taxonomy per bin.
pub fn parse_bin_table<P: AsRef<Path>>(
    bin_table: P,
) -> Result<(Vec<String>, EntityVectors, TaxTable)> {
    parse_entity_table(bin_table.as_ref(), "Bin ID", "TPM", parse_float)
}
