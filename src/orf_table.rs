//src/orf_table.rs

use std::path::Path;

use ahash::AHashSet;

use crate::error::{AggregateError, Result};
use crate::functional::{accumulate_functions, strip_marker, FunctionalScheme, OrfRow};
use crate::normalize::{safe_div, tpm};
use crate::table::{cell, open_table, parse_count, parse_float, read_record, split_cells, TableHeader};
use crate::types::{EntityVectors, FunctionInfo, OrfTableOutput, SchemeAggregate};

/// RecA/RadA, the universal single-copy gene used for copy numbers.
pub const MARKER_COG: &str = "COG0468";

/// Names of the built-in functional schemes.
pub const BUILTIN_SCHEMES: [&str; 3] = ["KEGG", "COG", "PFAM"];

pub const READ_COUNT_LABEL: &str = "Raw read count";
pub const BASE_COUNT_LABEL: &str = "Raw base count";
pub const COVERAGE_LABEL: &str = "Coverage";

/// Which functional schemes to aggregate and how.
#[derive(Debug, Clone)]
pub struct OrfTableOptions {
    pub kegg: bool,
    pub cog: bool,
    pub pfam: bool,
    pub trusted_only: bool,
    pub ignore_unclassified: bool,
    pub custom_methods: Vec<String>,
    /// When set, only these ORFs are read.
    pub orf_set: Option<AHashSet<String>>,
}

impl Default for OrfTableOptions {
    fn default() -> Self {
        Self {
            kegg: true,
            cog: true,
            pfam: true,
            trusted_only: false,
            ignore_unclassified: false,
            custom_methods: Vec::new(),
            orf_set: None,
        }
    }
}

impl OrfTableOptions {
    pub fn without_kegg(mut self) -> Self {
        self.kegg = false;
        self
    }

    pub fn without_cog(mut self) -> Self {
        self.cog = false;
        self
    }

    pub fn without_pfam(mut self) -> Self {
        self.pfam = false;
        self
    }

    pub fn trusted_only(mut self, trusted_only: bool) -> Self {
        self.trusted_only = trusted_only;
        self
    }

    pub fn ignore_unclassified(mut self, ignore: bool) -> Self {
        self.ignore_unclassified = ignore;
        self
    }

    pub fn with_custom_scheme(mut self, method: &str) -> Self {
        self.custom_methods.push(method.to_string());
        self
    }

    pub fn restrict_to(mut self, orfs: AHashSet<String>) -> Self {
        self.orf_set = Some(orfs);
        self
    }

    /// Custom method names must differ from the built-in schemes and from each other.
    pub fn validate(&self) -> Result<()> {
        let mut seen: AHashSet<&str> = BUILTIN_SCHEMES.iter().copied().collect();
        for method in &self.custom_methods {
            if !seen.insert(method.as_str()) {
                return Err(AggregateError::DuplicateScheme {
                    name: method.clone(),
                });
            }
        }
        Ok(())
    }

    /// Scheme descriptors in output order: KEGG, COG, PFAM, then custom methods.
    pub fn schemes(&self) -> Vec<FunctionalScheme> {
        let mut schemes = vec![
            FunctionalScheme::kegg(self.kegg, self.trusted_only, self.ignore_unclassified),
            FunctionalScheme::cog(self.cog, self.trusted_only, self.ignore_unclassified),
            FunctionalScheme::pfam(self.pfam, self.ignore_unclassified),
        ];
        schemes.extend(
            self.custom_methods
                .iter()
                .map(|m| FunctionalScheme::custom(m, self.trusted_only, self.ignore_unclassified)),
        );
        schemes
    }
}

/// Column positions of one enabled scheme.
struct SchemeColumns {
    scheme: FunctionalScheme,
    id: usize,
    name: Option<usize>,
    hierarchy: Option<usize>,
}

impl SchemeColumns {
    fn resolve(scheme: FunctionalScheme, header: &TableHeader) -> Result<Self> {
        let id = header.require(&scheme.id_column)?;
        let name = scheme
            .name_column
            .as_deref()
            .map(|c| header.require(c))
            .transpose()?;
        let hierarchy = scheme
            .hierarchy_column
            .as_deref()
            .map(|c| header.require(c))
            .transpose()?;
        Ok(Self {
            scheme,
            id,
            name,
            hierarchy,
        })
    }
}

/// Parse an ORF table generated by SqueezeMeta.
///
/// Returns the sample names, per-ORF statistics and, for every enabled
/// scheme, per-function statistics with function info, TPM and (when the
/// RecA/RadA marker is present) copy numbers.
///
/// ORFs without a length (rRNAs) are dropped from every statistic.
pub fn parse_orf_table<P: AsRef<Path>>(
    orf_table: P,
    options: &OrfTableOptions,
) -> Result<OrfTableOutput> {
    let path = orf_table.as_ref();
    let mut reader = open_table(path)?;
    let header = TableHeader::read(&mut *reader, path)?;

    let orf_idx = header.require("ORF ID")?;
    let length_idx = header.require("Length NT")?;
    let samples = header.matching(READ_COUNT_LABEL);
    let n_bases = header.matching(BASE_COUNT_LABEL).len();
    let n_cov = header.matching(COVERAGE_LABEL).len();
    if samples.len() != n_bases || samples.len() != n_cov {
        return Err(AggregateError::SampleMismatch {
            reads: samples.len(),
            bases: n_bases,
            coverages: n_cov,
        });
    }
    let sample_names = header.sample_names(READ_COUNT_LABEL);
    // Base and coverage columns are paired with read counts by sample name, not position.
    let samples_bases = header.sample_columns(BASE_COUNT_LABEL, &sample_names)?;
    let samples_cov = header.sample_columns(COVERAGE_LABEL, &sample_names)?;
    log::debug!("{} samples: {}", sample_names.len(), sample_names.join(", "));

    options.validate()?;
    let columns: Vec<SchemeColumns> = options
        .schemes()
        .into_iter()
        .filter(|s| s.enabled)
        .map(|s| SchemeColumns::resolve(s, &header))
        .collect::<Result<_>>()?;

    let mut orfs = SchemeAggregate::default();
    let mut aggregates: Vec<SchemeAggregate> =
        columns.iter().map(|_| SchemeAggregate::default()).collect();

    let mut line = String::new();
    let mut line_no = 2;
    let mut skipped = 0usize;
    while read_record(&mut *reader, &mut line)? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_cells(&line);
        let orf = cell(&cells, orf_idx);
        if let Some(orf_set) = &options.orf_set {
            if !orf_set.contains(orf) {
                continue;
            }
        }

        let length_cell = cell(&cells, length_idx).trim();
        let length = if length_cell.is_empty() {
            0
        } else {
            length_cell
                .parse::<u64>()
                .map_err(|_| AggregateError::InvalidNumber {
                    column: "Length NT".to_string(),
                    value: length_cell.to_string(),
                    line: line_no,
                })?
        };
        if length == 0 {
            log::warn!("Skipping {} (line {}): no length", orf, line_no);
            skipped += 1;
            continue;
        }

        let row = OrfRow::new(
            sample_values(&cells, &samples, parse_count, line_no)?,
            sample_values(&cells, &samples_bases, parse_count, line_no)?,
            sample_values(&cells, &samples_cov, parse_float, line_no)?,
            length,
        );

        for (cols, aggregate) in columns.iter().zip(aggregates.iter_mut()) {
            let raw = cell(&cells, cols.id);
            if let Some(name_idx) = cols.name {
                let id = strip_marker(raw);
                if !id.is_empty() {
                    aggregate.info.insert(
                        id,
                        FunctionInfo {
                            name: cell(&cells, name_idx).to_string(),
                            hierarchy: cols.hierarchy.map(|h| cell(&cells, h).to_string()),
                        },
                    );
                }
            }
            accumulate_functions(&mut aggregate.stats, raw, &row, &cols.scheme);
        }

        orfs.stats.insert(orf.to_string(), row.into_stats());
    }

    log::info!(
        "Read {} ORFs from {} ({} skipped without length)",
        orfs.stats.len(),
        path.display(),
        skipped
    );

    orfs.tpm = tpm(&orfs.stats);
    for aggregate in aggregates.iter_mut() {
        aggregate.tpm = tpm(&aggregate.stats);
    }

    let marker_coverage = columns
        .iter()
        .zip(&aggregates)
        .find(|(cols, _)| cols.scheme.marker_source)
        .and_then(|(_, cog)| cog.stats.get(MARKER_COG))
        .map(|stats| stats.coverages.clone())
        .filter(|cov| cov.iter().any(|&c| c != 0.0));

    match marker_coverage {
        Some(reca) => {
            for aggregate in aggregates.iter_mut() {
                aggregate.copy_number = Some(copy_numbers(aggregate, &reca));
            }
        }
        None => log::warn!(
            "{} (RecA/RadA) was not present in your data, or had no coverage. RecA should be \
             universal, so you probably just skipped COG annotation. Skipping copy number calculation...",
            MARKER_COG
        ),
    }

    let schemes = columns
        .into_iter()
        .zip(aggregates)
        .map(|(cols, aggregate)| (cols.scheme.name, aggregate))
        .collect();

    Ok(OrfTableOutput {
        sample_names,
        orfs,
        schemes,
    })
}

fn sample_values(
    cells: &[&str],
    columns: &[(usize, &str)],
    parse: fn(&str, &str, usize) -> Result<f64>,
    line: usize,
) -> Result<Vec<f64>> {
    columns
        .iter()
        .map(|&(i, name)| parse(cell(cells, i), name, line))
        .collect()
}

/// Coverage of every entity relative to the marker gene coverage, per sample.
/// Samples where the marker has no coverage get 0.
fn copy_numbers(aggregate: &SchemeAggregate, marker_coverage: &[f64]) -> EntityVectors {
    aggregate
        .stats
        .iter()
        .map(|(entity, stats)| {
            let cn = stats
                .coverages
                .iter()
                .zip(marker_coverage)
                .map(|(&cov, &reca)| safe_div(cov, reca))
                .collect();
            (entity.clone(), cn)
        })
        .collect()
}

/// Names of all ORFs in an ORF table.
pub fn read_orf_names<P: AsRef<Path>>(orf_table: P) -> Result<AHashSet<String>> {
    let path = orf_table.as_ref();
    let mut reader = open_table(path)?;
    TableHeader::read(&mut *reader, path)?;

    let mut names = AHashSet::new();
    let mut line = String::new();
    while read_record(&mut *reader, &mut line)? {
        match line.split('\t').next() {
            Some(orf) if !orf.trim().is_empty() => {
                names.insert(orf.to_string());
            }
            _ => {}
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::UNCLASSIFIED_FUN;
    use approx::assert_relative_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "ORF ID\tLength NT\tKEGG ID\tKEGGFUN\tKEGGPATH\tCOG ID\tCOGFUN\tCOGPATH\tPFAM\t\
                          Coverage S1\tCoverage S2\tRaw read count S1\tRaw read count S2\t\
                          Raw base count S1\tRaw base count S2";

    fn write_table(rows: &[&str]) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.orftable");
        let mut content = format!("# Created by SqueezeMeta\n{}\n", HEADER);
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn fixture() -> (TempDir, PathBuf) {
        write_table(&[
            "orf1\t300\tK00001*;K00002*\tfunA;funB\tpathA\tCOG0468*\tRecA\tRepair\tPF00001\t2.0\t4.0\t10\t0\t1000\t0",
            "orf2\t600\tK00001\tfunA\tpathA\tCOG0001\tcogfun\tcogpath\t\t1.0\t1.0\t6\t6\t600\t600",
            "rrna1\t\t\t\t\t\t\t\t\t0\t0\t5\t5\t500\t500",
            "orf3\t900\t\t\t\tCOG0468\tRecA\tRepair\tPF00002;PF00003\t0.5\t2.0\t3\t9\t300\t900",
        ])
    }

    #[test]
    fn test_orf_level_statistics() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();

        assert_eq!(out.sample_names, vec!["S1", "S2"]);
        assert_eq!(out.orfs.stats.len(), 3);
        assert!(!out.orfs.stats.contains_key("rrna1"));

        let orf1 = &out.orfs.stats["orf1"];
        assert_eq!(orf1.abundances, vec![10.0, 0.0]);
        assert_eq!(orf1.bases, vec![1000.0, 0.0]);
        assert_eq!(orf1.coverages, vec![2.0, 4.0]);
        assert_eq!(orf1.copies, vec![1.0, 0.0]);
        assert_eq!(orf1.lengths, vec![300.0, 0.0]);
    }

    #[test]
    fn test_kegg_split_and_info() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        let kegg = out.scheme("KEGG").unwrap();

        let k2 = &kegg.stats["K00002"];
        assert_eq!(k2.abundances, vec![5.0, 0.0]);
        assert_eq!(k2.copies, vec![1.0, 0.0]);
        assert_eq!(k2.lengths, vec![150.0, 0.0]);

        let k1 = &kegg.stats["K00001"];
        assert_eq!(k1.abundances, vec![11.0, 6.0]);
        assert_eq!(k1.copies, vec![2.0, 1.0]);
        assert_eq!(k1.lengths, vec![750.0, 600.0]);

        assert_eq!(kegg.stats[UNCLASSIFIED_FUN].abundances, vec![3.0, 9.0]);
        assert_eq!(kegg.info["K00001"].name, "funA");
        assert_eq!(kegg.info["K00001"].hierarchy.as_deref(), Some("pathA"));
        assert_eq!(kegg.info["K00001;K00002"].name, "funA;funB");
        assert!(out.scheme("PFAM").unwrap().info.is_empty());
    }

    #[test]
    fn test_trusted_only() {
        let (_dir, path) = fixture();
        let options = OrfTableOptions::default().trusted_only(true);
        let out = parse_orf_table(&path, &options).unwrap();

        let kegg = out.scheme("KEGG").unwrap();
        assert_eq!(kegg.stats["K00001"].abundances, vec![5.0, 0.0]);
        // Untrusted ID is still registered in the info table.
        assert!(kegg.info.contains_key("K00001"));

        let cog = out.scheme("COG").unwrap();
        assert!(!cog.stats.contains_key("COG0001"));
        assert_eq!(cog.stats[MARKER_COG].abundances, vec![10.0, 0.0]);

        // PFAM ignores the trusted-only policy.
        assert!(out.scheme("PFAM").unwrap().stats.contains_key("PF00001"));
    }

    #[test]
    fn test_abundance_conservation_across_schemes() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        for s in 0..2 {
            let orf_total: f64 = out.orfs.stats.values().map(|st| st.abundances[s]).sum();
            for (_, aggregate) in &out.schemes {
                let total: f64 = aggregate.stats.values().map(|st| st.abundances[s]).sum();
                assert_relative_eq!(total, orf_total, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_tpm_sums_to_a_million() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        for tpm in std::iter::once(&out.orfs.tpm).chain(out.schemes.iter().map(|(_, a)| &a.tpm)) {
            for s in 0..2 {
                let total: f64 = tpm.values().map(|v| v[s]).sum();
                assert_relative_eq!(total, 1_000_000.0, max_relative = 1e-9);
            }
        }
        // orf1 has no reads in S2.
        assert_eq!(out.orfs.tpm["orf1"][1], 0.0);
    }

    #[test]
    fn test_copy_numbers_follow_marker() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();

        let cog = out.scheme("COG").unwrap();
        let cn = cog.copy_number.as_ref().unwrap();
        // RecA coverage = 2.0 + 0.5, 4.0 + 2.0
        assert_relative_eq!(cn[MARKER_COG][0], 1.0);
        assert_relative_eq!(cn["COG0001"][0], 1.0 / 2.5);
        assert_relative_eq!(cn["COG0001"][1], 1.0 / 6.0);

        let pfam = out.scheme("PFAM").unwrap();
        assert_relative_eq!(pfam.copy_number.as_ref().unwrap()["PF00002"][0], 0.25 / 2.5);
        assert!(out.orfs.copy_number.is_none());
    }

    #[test]
    fn test_no_copy_numbers_without_cog() {
        let (_dir, path) = fixture();
        let out = parse_orf_table(&path, &OrfTableOptions::default().without_cog()).unwrap();
        assert!(out.scheme("COG").is_none());
        assert!(out.schemes.iter().all(|(_, a)| a.copy_number.is_none()));
    }

    #[test]
    fn test_zero_marker_coverage_skips_copy_numbers() {
        let (_dir, path) = write_table(&[
            "orf1\t300\tK00001\tf\tp\tCOG0468\tRecA\tRepair\t\t0\t0\t10\t2\t1000\t200",
            "orf2\t300\tK00002\tf\tp\tCOG0001\tx\ty\t\t1.0\t1.0\t10\t2\t1000\t200",
        ]);
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        assert!(out.scheme("COG").unwrap().stats.contains_key(MARKER_COG));
        assert!(out.schemes.iter().all(|(_, a)| a.copy_number.is_none()));
    }

    #[test]
    fn test_zero_length_row_contributes_nothing() {
        let (_dir, path) = write_table(&[
            "orf1\t0\tK00001\tf\tp\tCOG0001\tx\ty\tPF1\t1.0\t1.0\t10\t2\t1000\t200",
        ]);
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        assert!(out.orfs.stats.is_empty());
        assert!(out.schemes.iter().all(|(_, a)| a.stats.is_empty()));
    }

    #[test]
    fn test_blank_orf_rows_are_skipped() {
        let (_dir, path) = write_table(&[
            "orf1\t300\tK00001\tf\tp\tCOG0001\tx\ty\tPF1\t1.0\t1.0\t10\t2\t1000\t200",
            "",
        ]);
        let out = parse_orf_table(&path, &OrfTableOptions::default()).unwrap();
        assert_eq!(out.orfs.stats.len(), 1);
        assert!(!out.orfs.stats.contains_key(""));
    }

    #[test]
    fn test_ignore_unclassified_and_orf_set() {
        let (_dir, path) = fixture();
        let orfs: AHashSet<String> = ["orf2", "orf3"].iter().map(|s| s.to_string()).collect();
        let options = OrfTableOptions::default()
            .ignore_unclassified(true)
            .restrict_to(orfs);
        let out = parse_orf_table(&path, &options).unwrap();

        assert_eq!(out.orfs.stats.len(), 2);
        let kegg = out.scheme("KEGG").unwrap();
        assert!(!kegg.stats.contains_key(UNCLASSIFIED_FUN));
        assert_eq!(kegg.stats["K00001"].abundances, vec![6.0, 6.0]);
    }

    #[test]
    fn test_custom_scheme() {
        let header = "ORF ID\tLength NT\tMYDB\tMYDB NAME\tCoverage S1\tRaw read count S1\tRaw base count S1";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.orftable");
        std::fs::write(
            &path,
            format!("#\n{}\norf1\t100\tX1*\tthing one\t1.0\t4\t400\norf2\t100\tX1\tthing one\t1.0\t2\t200\n", header),
        )
        .unwrap();

        let options = OrfTableOptions::default()
            .without_kegg()
            .without_cog()
            .without_pfam()
            .with_custom_scheme("MYDB");
        let out = parse_orf_table(&path, &options).unwrap();
        assert_eq!(out.schemes.len(), 1);
        let mydb = out.scheme("MYDB").unwrap();
        assert_eq!(mydb.stats["X1"].abundances, vec![6.0]);
        assert_eq!(mydb.info["X1"].name, "thing one");
        assert!(mydb.info["X1"].hierarchy.is_none());

        let trusted = parse_orf_table(&path, &options.clone().trusted_only(true)).unwrap();
        assert_eq!(trusted.scheme("MYDB").unwrap().stats["X1"].abundances, vec![4.0]);
    }

    #[test]
    fn test_missing_scheme_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.orftable");
        std::fs::write(
            &path,
            "#\nORF ID\tLength NT\tCoverage S1\tRaw read count S1\tRaw base count S1\norf1\t100\t1\t1\t1\n",
        )
        .unwrap();

        match parse_orf_table(&path, &OrfTableOptions::default()) {
            Err(AggregateError::MissingColumn { column, .. }) => assert_eq!(column, "KEGG ID"),
            other => panic!("expected missing column, got {:?}", other.map(|_| ())),
        }
        let options = OrfTableOptions::default().without_kegg().without_cog().without_pfam();
        assert!(parse_orf_table(&path, &options).is_ok());
    }

    #[test]
    fn test_bad_numbers_are_fatal() {
        let (_dir, path) = write_table(&[
            "orf1\t300\t\t\t\t\t\t\t\t1.0\t1.0\tten\t2\t1000\t200",
        ]);
        assert!(matches!(
            parse_orf_table(&path, &OrfTableOptions::default()),
            Err(AggregateError::InvalidNumber { line: 3, .. })
        ));
    }

    #[test]
    fn test_sample_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.orftable");
        std::fs::write(
            &path,
            "#\nORF ID\tLength NT\tCoverage S1\tRaw read count S1\tRaw read count S2\tRaw base count S1\n",
        )
        .unwrap();
        let options = OrfTableOptions::default().without_kegg().without_cog().without_pfam();
        assert!(matches!(
            parse_orf_table(&path, &options),
            Err(AggregateError::SampleMismatch { reads: 2, bases: 1, coverages: 1 })
        ));
    }

    #[test]
    fn test_base_and_coverage_columns_matched_by_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("permuted.orftable");
        std::fs::write(
            &path,
            "#\nORF ID\tLength NT\tCoverage S2\tCoverage S1\tRaw read count S1\tRaw read count S2\t\
             Raw base count S2\tRaw base count S1\n\
             orf1\t300\t0\t3.5\t10\t0\t0\t1000\n",
        )
        .unwrap();
        let options = OrfTableOptions::default().without_kegg().without_cog().without_pfam();
        let out = parse_orf_table(&path, &options).unwrap();

        assert_eq!(out.sample_names, vec!["S1", "S2"]);
        let orf1 = &out.orfs.stats["orf1"];
        assert_eq!(orf1.abundances, vec![10.0, 0.0]);
        assert_eq!(orf1.bases, vec![1000.0, 0.0]);
        assert_eq!(orf1.coverages, vec![3.5, 0.0]);
        assert_relative_eq!(out.orfs.tpm["orf1"][0], 1_000_000.0);
    }

    #[test]
    fn test_sample_names_must_agree_across_groups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renamed.orftable");
        std::fs::write(
            &path,
            "#\nORF ID\tLength NT\tCoverage S1\tRaw read count S1\tRaw base count S9\n\
             orf1\t300\t1\t10\t1000\n",
        )
        .unwrap();
        let options = OrfTableOptions::default().without_kegg().without_cog().without_pfam();
        match parse_orf_table(&path, &options) {
            Err(AggregateError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Raw base count S1")
            }
            other => panic!("expected missing column, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_custom_scheme_named_cog_is_not_marker_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_cog.orftable");
        std::fs::write(
            &path,
            "#\nORF ID\tLength NT\tMYCOG\tMYCOG NAME\tCoverage S1\tRaw read count S1\tRaw base count S1\n\
             orf1\t100\tCOG0468\tRecA\t2.0\t4\t400\n",
        )
        .unwrap();
        let options = OrfTableOptions::default()
            .without_kegg()
            .without_cog()
            .without_pfam()
            .with_custom_scheme("MYCOG");
        let out = parse_orf_table(&path, &options).unwrap();
        let mycog = out.scheme("MYCOG").unwrap();
        assert!(mycog.stats.contains_key(MARKER_COG));
        assert!(mycog.copy_number.is_none());
    }

    #[test]
    fn test_custom_scheme_name_collisions_rejected() {
        let (_dir, path) = fixture();
        for options in [
            OrfTableOptions::default().without_cog().with_custom_scheme("COG"),
            OrfTableOptions::default().with_custom_scheme("PFAM"),
            OrfTableOptions::default()
                .with_custom_scheme("MYDB")
                .with_custom_scheme("MYDB"),
        ] {
            assert!(matches!(
                parse_orf_table(&path, &options),
                Err(AggregateError::DuplicateScheme { .. })
            ));
        }
        assert!(OrfTableOptions::default().with_custom_scheme("MYDB").validate().is_ok());
    }

    #[test]
    fn test_read_orf_names_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.orftable");
        std::fs::write(&path, "#\nORF ID\tLength NT\norf1\t100\n\norf2\t200\n\n").unwrap();
        let names = read_orf_names(&path).unwrap();
        assert_eq!(names.len(), 2);
        assert!(!names.contains(""));
    }

    #[test]
    fn test_read_orf_names() {
        let (_dir, path) = fixture();
        let names = read_orf_names(&path).unwrap();
        assert_eq!(names.len(), 4);
        assert!(names.contains("rrna1"));
    }
}
