//src/functional.rs

use ahash::AHashMap;
use crate::types::EntityStats;

/// Marker appended by the bestaver algorithm to confidence-confirmed calls.
pub const TRUSTED_MARKER: char = '*';

/// Function ID assigned to ORFs with no annotation.
pub const UNCLASSIFIED_FUN: &str = "Unclassified";

/// One functional annotation scheme: which columns it reads and how its
/// calls are filtered. KEGG, COG, PFAM and custom methods are all described
/// by this same structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionalScheme {
    pub name: String,
    /// Column holding the (possibly multi-valued) function IDs.
    pub id_column: String,
    /// Column with the function name, registered in the info table.
    pub name_column: Option<String>,
    /// Column with the pathway / hierarchy.
    pub hierarchy_column: Option<String>,
    pub enabled: bool,
    /// Only aggregate calls carrying the trusted marker.
    pub trusted_only: bool,
    /// Drop unannotated ORFs instead of pooling them as "Unclassified".
    pub ignore_unclassified: bool,
    /// This scheme supplies the RecA/RadA coverage used for copy numbers.
    pub marker_source: bool,
}

impl FunctionalScheme {
    pub fn kegg(enabled: bool, trusted_only: bool, ignore_unclassified: bool) -> Self {
        Self {
            name: "KEGG".to_string(),
            id_column: "KEGG ID".to_string(),
            name_column: Some("KEGGFUN".to_string()),
            hierarchy_column: Some("KEGGPATH".to_string()),
            enabled,
            trusted_only,
            ignore_unclassified,
            marker_source: false,
        }
    }

    pub fn cog(enabled: bool, trusted_only: bool, ignore_unclassified: bool) -> Self {
        Self {
            name: "COG".to_string(),
            id_column: "COG ID".to_string(),
            name_column: Some("COGFUN".to_string()),
            hierarchy_column: Some("COGPATH".to_string()),
            enabled,
            trusted_only,
            ignore_unclassified,
            marker_source: true,
        }
    }

    /// PFAM calls are not scored by bestaver, so they are never trusted-only.
    pub fn pfam(enabled: bool, ignore_unclassified: bool) -> Self {
        Self {
            name: "PFAM".to_string(),
            id_column: "PFAM".to_string(),
            name_column: None,
            hierarchy_column: None,
            enabled,
            trusted_only: false,
            ignore_unclassified,
            marker_source: false,
        }
    }

    /// A custom annotation method with columns `<METHOD>` and `<METHOD> NAME`.
    pub fn custom(method: &str, trusted_only: bool, ignore_unclassified: bool) -> Self {
        Self {
            name: method.to_string(),
            id_column: method.to_string(),
            name_column: Some(format!("{} NAME", method)),
            hierarchy_column: None,
            enabled: true,
            trusted_only,
            ignore_unclassified,
            marker_source: false,
        }
    }
}

/// The per-sample quantities of one ORF row, handed by value to the
/// aggregation step.
#[derive(Debug, Clone, PartialEq)]
pub struct OrfRow {
    pub abundances: Vec<f64>,
    pub bases: Vec<f64>,
    pub coverages: Vec<f64>,
    /// 1 where the ORF has reads, else 0.
    pub copies: Vec<f64>,
    /// ORF length where the ORF has reads, else 0.
    pub lengths: Vec<f64>,
}

impl OrfRow {
    /// Build the row record from raw counts and the ORF length.
    pub fn new(abundances: Vec<f64>, bases: Vec<f64>, coverages: Vec<f64>, length: u64) -> Self {
        let copies: Vec<f64> = abundances
            .iter()
            .map(|&a| if a > 0.0 { 1.0 } else { 0.0 })
            .collect();
        let lengths = copies.iter().map(|&c| c * length as f64).collect();
        Self {
            abundances,
            bases,
            coverages,
            copies,
            lengths,
        }
    }

    pub fn into_stats(self) -> EntityStats {
        EntityStats {
            abundances: self.abundances,
            bases: self.bases,
            coverages: self.coverages,
            copies: self.copies,
            lengths: self.lengths,
        }
    }
}

/// Remove the trusted marker from an annotation cell.
pub fn strip_marker(cell: &str) -> String {
    cell.replace(TRUSTED_MARKER, "")
}

/// Function IDs an annotation cell contributes to, or `None` when the row
/// must be skipped because it is not a trusted call.
pub fn split_functions(cell: &str, trusted_only: bool) -> Option<Vec<String>> {
    if trusted_only && !cell.is_empty() && !cell.ends_with(TRUSTED_MARKER) {
        return None;
    }
    let stripped = strip_marker(cell);
    let funs: Vec<String> = stripped
        .trim_matches(';')
        .split(';')
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if funs.is_empty() {
        Some(vec![UNCLASSIFIED_FUN.to_string()])
    } else {
        Some(funs)
    }
}

/// Add one ORF row to the running per-function statistics of a scheme.
///
/// `cell` is the raw annotation (marker included). Abundances, bases,
/// coverages and lengths are split evenly among the function IDs in the
/// cell; every ID gets a whole copy, as if each were its own smaller gene.
pub fn accumulate_functions(
    fun_stats: &mut AHashMap<String, EntityStats>,
    cell: &str,
    row: &OrfRow,
    scheme: &FunctionalScheme,
) {
    let Some(funs) = split_functions(cell, scheme.trusted_only) else {
        return;
    };
    let n = funs.len() as f64;
    let n_samples = row.abundances.len();

    for fun in funs {
        if scheme.ignore_unclassified && fun == UNCLASSIFIED_FUN {
            continue;
        }
        let acc = fun_stats
            .entry(fun)
            .or_insert_with(|| EntityStats::zeros(n_samples));
        for s in 0..n_samples {
            acc.abundances[s] += row.abundances[s] / n;
            acc.bases[s] += row.bases[s] / n;
            acc.coverages[s] += row.coverages[s] / n;
            acc.copies[s] += row.copies[s];
            acc.lengths[s] += row.lengths[s] / n;
        }
    }
}
