use crate::errors::{
    DataProcessingError,
    Result,
};

/// Calculates the Pearson correlation between two traces of the same length.
///
/// Returns `f32::NAN` when either trace has zero variance, since the
/// coefficient is undefined there.
///
/// # Example
///
/// ```
/// use isoquery::utils::correlation::pearson_correlation;
///
/// let a = vec![1.0, 2.0, 3.0, 2.0, 1.0];
/// let b = vec![10.0, 20.0, 30.0, 20.0, 10.0];
/// let result = pearson_correlation(&a, &b).unwrap();
/// assert!((result - 1.0).abs() < 1e-6);
/// ```
pub fn pearson_correlation(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(DataProcessingError::ExpectedSlicesSameLength {
            expected: a.len(),
            other: b.len(),
            context: "pearson_correlation",
        }
        .into());
    }
    if a.is_empty() {
        return Err(DataProcessingError::ExpectedNonEmptyData {
            context: "pearson_correlation",
        }
        .into());
    }

    // Accumulate in f64, intensities easily reach 1e9 and their squares
    // lose everything in f32.
    let n = a.len() as f64;
    let mean_a = a.iter().map(|&x| x as f64).sum::<f64>() / n;
    let mean_b = b.iter().map(|&x| x as f64).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Ok(f32::NAN);
    }

    let out = cov / (var_a.sqrt() * var_b.sqrt());
    Ok(out.clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_anticorrelation() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![4.0, 3.0, 2.0, 1.0];
        let result = pearson_correlation(&a, &b).unwrap();
        assert!((result + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shifted_gaussians() {
        let a: Vec<f32> = (0..21)
            .map(|i| (-((i as f32 - 10.0).powi(2)) / 8.0).exp())
            .collect();
        let b: Vec<f32> = (0..21)
            .map(|i| 0.05 * (-((i as f32 - 11.0).powi(2)) / 8.0).exp())
            .collect();
        let result = pearson_correlation(&a, &b).unwrap();
        assert!(result > 0.8 && result < 1.0, "{}", result);
    }

    #[test]
    fn test_empty_vectors() {
        let a: Vec<f32> = vec![];
        assert!(pearson_correlation(&a, &a).is_err());
    }

    #[test]
    fn test_different_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(pearson_correlation(&a, &b).is_err());
    }

    #[test]
    fn test_flat_trace() {
        let a = vec![5.0, 5.0, 5.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(pearson_correlation(&a, &b).unwrap().is_nan());
    }
}
