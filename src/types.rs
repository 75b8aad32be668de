//src/types.rs

use ahash::AHashMap;

/// Entity name -> one value per sample (samples in table order).
pub type EntityVectors = AHashMap<String, Vec<f64>>;

/// The five statistics tracked for every ORF, function or taxon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Abundances,
    Bases,
    Coverages,
    Copies,
    Lengths,
}

impl Statistic {
    pub const ALL: [Statistic; 5] = [
        Statistic::Abundances,
        Statistic::Bases,
        Statistic::Coverages,
        Statistic::Copies,
        Statistic::Lengths,
    ];

    /// Short label used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Abundances => "abund",
            Statistic::Bases => "bases",
            Statistic::Coverages => "cov",
            Statistic::Copies => "copies",
            Statistic::Lengths => "lengths",
        }
    }
}

/// Per-sample statistics of one entity. All vectors have one slot per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityStats {
    /// Reads attributed to the entity (fractional when split).
    pub abundances: Vec<f64>,
    /// Bases attributed to the entity.
    pub bases: Vec<f64>,
    pub coverages: Vec<f64>,
    /// Number of contributing ORFs; never split.
    pub copies: Vec<f64>,
    /// Summed nucleotide length; zero where the entity is absent.
    pub lengths: Vec<f64>,
}

impl EntityStats {
    pub fn zeros(n_samples: usize) -> Self {
        Self {
            abundances: vec![0.0; n_samples],
            bases: vec![0.0; n_samples],
            coverages: vec![0.0; n_samples],
            copies: vec![0.0; n_samples],
            lengths: vec![0.0; n_samples],
        }
    }

    pub fn get(&self, stat: Statistic) -> &[f64] {
        match stat {
            Statistic::Abundances => &self.abundances,
            Statistic::Bases => &self.bases,
            Statistic::Coverages => &self.coverages,
            Statistic::Copies => &self.copies,
            Statistic::Lengths => &self.lengths,
        }
    }
}

/// Descriptive metadata for a function ID, taken from the ORF table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// Pathway / functional hierarchy, when the scheme has one.
    pub hierarchy: Option<String>,
}

/// Statistics for every entity of one level (ORFs, or one functional scheme),
/// plus the metrics derived from them once the table pass is done.
#[derive(Debug, Clone, Default)]
pub struct SchemeAggregate {
    pub stats: AHashMap<String, EntityStats>,
    pub info: AHashMap<String, FunctionInfo>,
    pub tpm: EntityVectors,
    /// `None` when the marker gene was not available.
    pub copy_number: Option<EntityVectors>,
}

impl SchemeAggregate {
    /// Project a single statistic out of the per-entity records.
    pub fn column(&self, stat: Statistic) -> EntityVectors {
        self.stats
            .iter()
            .map(|(entity, stats)| (entity.clone(), stats.get(stat).to_vec()))
            .collect()
    }
}

/// Everything produced by one pass over an ORF table.
#[derive(Debug, Clone)]
pub struct OrfTableOutput {
    pub sample_names: Vec<String>,
    pub orfs: SchemeAggregate,
    /// One entry per enabled scheme, in scheme order (KEGG, COG, PFAM, custom).
    pub schemes: Vec<(String, SchemeAggregate)>,
}

impl OrfTableOutput {
    pub fn scheme(&self, name: &str) -> Option<&SchemeAggregate> {
        self.schemes
            .iter()
            .find(|(scheme, _)| scheme == name)
            .map(|(_, aggregate)| aggregate)
    }
}

/// Taxonomies keyed by entity: plain names and rank-prefixed cumulative strings.
#[derive(Debug, Clone, Default)]
pub struct TaxTable {
    pub tax: AHashMap<String, Vec<String>>,
    pub tax_wranks: AHashMap<String, Vec<String>>,
}
