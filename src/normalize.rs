//src/normalize.rs

use ahash::AHashMap;
use crate::types::{EntityStats, EntityVectors};

/// Scale used for TPM.
pub const TPM_SCALE: f64 = 1_000_000.0;

/// `num / den`, or 0 when `den` is zero.
#[inline]
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Normalize a map of per-sample vectors so that every sample sums to `scale`.
///
/// Each sample column is normalized independently. A sample whose total is
/// zero yields NaN for every entity; callers that cannot accept that must
/// clean the result. The input is not modified.
pub fn normalize_abunds(abunds: &EntityVectors, scale: f64) -> EntityVectors {
    let mut per_sample: Vec<f64> = Vec::new();
    for values in abunds.values() {
        if per_sample.len() < values.len() {
            per_sample.resize(values.len(), 0.0);
        }
        for (total, v) in per_sample.iter_mut().zip(values) {
            *total += v;
        }
    }

    abunds
        .iter()
        .map(|(entity, values)| {
            let scaled = values
                .iter()
                .zip(&per_sample)
                .map(|(v, total)| scale * v / total)
                .collect();
            (entity.clone(), scaled)
        })
        .collect()
}

/// Reads per kilobase for one entity: bases / (average length / 1000), with
/// average length = lengths / copies. Samples without copies give 0.
pub fn reads_per_kilobase(stats: &EntityStats) -> Vec<f64> {
    stats
        .bases
        .iter()
        .zip(&stats.lengths)
        .zip(&stats.copies)
        .map(|((&bases, &lengths), &copies)| {
            let avg_length = safe_div(lengths, copies);
            safe_div(bases, avg_length / 1000.0)
        })
        .collect()
}

/// TPM for every entity of a level. Samples with no reads at all get 0.
pub fn tpm(stats: &AHashMap<String, EntityStats>) -> EntityVectors {
    let rpk: EntityVectors = stats
        .iter()
        .map(|(entity, s)| (entity.clone(), reads_per_kilobase(s)))
        .collect();

    let mut tpm = normalize_abunds(&rpk, TPM_SCALE);
    for values in tpm.values_mut() {
        for v in values.iter_mut() {
            if v.is_nan() {
                *v = 0.0;
            }
        }
    }
    tpm
}
