use crate::core::models::structure::Structure;
use tracing::debug;

/// Population mean and population standard deviation (divisor N). `None` for no values.
pub fn population_mean_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Standard score of `value`. A zero deviation yields zero instead of NaN.
pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 { 0.0 } else { (value - mean) / std }
}

/// Sets `mean_b_factor` on every residue, then `norm_mean_b_factor` against the population of
/// all residues across all chains.
pub fn assign_b_factor_statistics(structure: &mut Structure) {
    let Structure {
        atoms, residues, ..
    } = structure;

    for residue in residues.values_mut() {
        let factors: Vec<f64> = residue
            .atoms
            .iter()
            .filter_map(|&id| atoms.get(id))
            .map(|atom| atom.b_factor)
            .collect();
        residue.mean_b_factor = population_mean_std(&factors).map_or(0.0, |(mean, _)| mean);
    }

    let means: Vec<f64> = residues.values().map(|r| r.mean_b_factor).collect();
    let Some((mean, std)) = population_mean_std(&means) else {
        return;
    };
    for residue in residues.values_mut() {
        residue.norm_mean_b_factor = z_score(residue.mean_b_factor, mean, std);
    }
    debug!(residues = means.len(), mean, std, "Assigned B-factor statistics.");
}
