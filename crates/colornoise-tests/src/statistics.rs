//! Helpers for statistical checks over many realizations.

use colornoise::analysis::{periodogram, sample_stats, SampleStats};
use ndarray::{ArrayD, Axis};

/// Sample statistics of every realization (lane along the last axis).
pub fn realization_stats(noise: &ArrayD<f64>) -> Vec<SampleStats> {
    let axis = Axis(noise.ndim() - 1);
    noise
        .lanes(axis)
        .into_iter()
        .filter_map(|lane| {
            let values: Vec<f64> = lane.iter().copied().collect();
            sample_stats(&values)
        })
        .collect()
}

/// Mean of the per-realization population variances.
pub fn mean_variance(noise: &ArrayD<f64>) -> f64 {
    let stats = realization_stats(noise);
    stats.iter().map(|s| s.variance).sum::<f64>() / stats.len() as f64
}

/// Mean of every sample across all realizations.
pub fn ensemble_mean(noise: &ArrayD<f64>) -> f64 {
    noise.iter().sum::<f64>() / noise.len() as f64
}

/// Periodogram averaged over every realization.
pub fn mean_periodogram(noise: &ArrayD<f64>) -> Vec<f64> {
    let axis = Axis(noise.ndim() - 1);
    let mut sum: Vec<f64> = Vec::new();
    let mut count = 0usize;

    for lane in noise.lanes(axis) {
        let values: Vec<f64> = lane.iter().copied().collect();
        let power = periodogram(&values);
        if sum.is_empty() {
            sum = vec![0.0; power.len()];
        }
        for (acc, p) in sum.iter_mut().zip(&power) {
            *acc += p;
        }
        count += 1;
    }

    sum.iter().map(|p| p / count.max(1) as f64).collect()
}
