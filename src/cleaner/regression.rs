//! Ordinary least squares over paired samples.

use crate::types::LinearFit;

/// Fit a straight line `y = slope * x + intercept` by ordinary least squares.
///
/// Returns `None` when fewer than two points are given or when `x` has zero
/// variance, since no line is defined in either case. The returned
/// `r_squared` is the squared Pearson correlation coefficient.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = xs.iter().sum::<f64>() / n_f;
    let mean_y = ys.iter().sum::<f64>() / n_f;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov_xy += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 {
        return None;
    }

    let slope = cov_xy / var_x;
    let intercept = mean_y - slope * mean_x;
    // Degenerate y: the flat line fits exactly.
    let r_squared = if var_y == 0.0 {
        1.0
    } else {
        let r = cov_xy / (var_x.sqrt() * var_y.sqrt());
        r * r
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Pearson correlation coefficient of paired samples.
///
/// Returns `None` for fewer than two points or when either side has zero
/// variance.
pub fn pearson_r(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = xs.iter().sum::<f64>() / n_f;
    let mean_y = ys.iter().sum::<f64>() / n_f;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov_xy += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov_xy / (var_x.sqrt() * var_y.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_fit_exact_line() {
        // y = 2x + 1 exactly
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [3.0, 5.0, 7.0, 9.0];
        let fit = linear_fit(&xs, &ys).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_noisy_data() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.1, 3.9, 6.2, 7.8, 10.1];
        let fit = linear_fit(&xs, &ys).unwrap();

        assert!((fit.slope - 2.0).abs() < 0.1);
        assert!(fit.r_squared > 0.99);
        assert!(fit.r_squared < 1.0);
    }

    #[test]
    fn test_linear_fit_predict_consistency() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 2.0, 3.0];
        let fit = linear_fit(&xs, &ys).unwrap();
        assert!((fit.predict(10.0) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_too_few_points() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none());
        assert!(linear_fit(&[], &[]).is_none());
    }

    #[test]
    fn test_linear_fit_zero_x_variance() {
        let xs = [3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(linear_fit(&xs, &ys).is_none());
    }

    #[test]
    fn test_pearson_r_perfect_negative() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [3.0, 2.0, 1.0];
        let r = pearson_r(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_r_uncorrelated() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, -1.0, 1.0, -1.0];
        let r = pearson_r(&xs, &ys).unwrap();
        assert!(r.abs() < 0.5);
    }

    #[test]
    fn test_pearson_r_zero_variance() {
        assert!(pearson_r(&[1.0, 1.0], &[1.0, 2.0]).is_none());
    }
}
