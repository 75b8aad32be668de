//src/taxonomy.rs

use ahash::AHashMap;
use crate::types::EntityVectors;

/// Full rank names, superkingdom first.
pub const TAXRANKS: [&str; 7] = [
    "superkingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
];

/// Rank symbols used as prefixes in taxonomy strings (`k_`, `p_`, ...).
pub const TAXRANKS_SHORT: [&str; 7] = ["k", "p", "c", "o", "f", "g", "s"];

/// Taxonomy string assigned to entities that carry none.
pub const UNCLASSIFIED_TAX: &str = "n_Unclassified";

/// Parses a taxonomy string as reported by the fun3 algorithm, e.g.
/// ```text
/// k_Bacteria;p_Proteobacteria;c_Gammaproteobacteria
/// ```
/// Returns:
/// - the 7 names from superkingdom to species
/// - the same 7 entries as cumulative rank-prefixed strings
///   (`k_Bacteria`, `k_Bacteria;p_Proteobacteria`, ...)
///
/// Tokens are looked up by rank symbol, so their order in the string does not
/// matter. Tokens without a `rank_` prefix are ignored.
pub fn parse_tax_string(tax_string: &str) -> (Vec<String>, Vec<String>) {
    // Only the last "n_" (no rank) token survives, which is fine: it is never read.
    let tax_dict: AHashMap<&str, &str> = tax_string
        .trim()
        .trim_matches(';')
        .split(';')
        .filter_map(|token| token.split_once('_'))
        .collect();

    // Walk from species to superkingdom.
    let mut tax_list: Vec<String> = Vec::with_capacity(TAXRANKS.len());
    let mut last_rank_found: Option<&str> = None;
    for (i, rank) in TAXRANKS_SHORT.iter().enumerate().rev() {
        if let Some(&name) = tax_dict.get(rank) {
            last_rank_found = Some(name);
            tax_list.push(name.to_string());
        } else if let Some(lower) = last_rank_found {
            // Classified at a lower rank but not at this one (common for eukaryotes in NCBI).
            tax_list.push(format!("{} (no {} in NCBI)", lower, TAXRANKS[i]));
        }
    }

    let unclass_string = match tax_list.first() {
        Some(lowest) => format!("Unclassified {}", lowest),
        None => "Unclassified".to_string(),
    };
    while tax_list.len() < TAXRANKS.len() {
        tax_list.insert(0, unclass_string.clone());
    }
    tax_list.reverse();

    let mut tax_list_wranks: Vec<String> = Vec::with_capacity(TAXRANKS.len());
    for (rank, name) in TAXRANKS_SHORT.iter().zip(&tax_list) {
        let new_str = match tax_list_wranks.last() {
            Some(prev) => format!("{};{}_{}", prev, rank, name),
            None => format!("{}_{}", rank, name),
        };
        tax_list_wranks.push(new_str);
    }

    (tax_list, tax_list_wranks)
}

/// Sum the abundances of all entities that share a taxon at rank `rank_idx`
/// (0 = superkingdom ... 6 = species). Entities with no taxonomy are skipped.
pub fn aggregate_tax_abunds(
    abunds: &EntityVectors,
    tax: &AHashMap<String, Vec<String>>,
    rank_idx: usize,
) -> EntityVectors {
    let mut tax_abunds: EntityVectors = AHashMap::new();
    for (entity, values) in abunds {
        let Some(taxon) = tax.get(entity).and_then(|list| list.get(rank_idx)) else {
            continue;
        };
        let acc = tax_abunds
            .entry(taxon.clone())
            .or_insert_with(|| vec![0.0; values.len()]);
        for (a, v) in acc.iter_mut().zip(values) {
            *a += v;
        }
    }
    tax_abunds
}
