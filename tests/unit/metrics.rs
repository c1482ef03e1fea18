//! Unit tests for the pure metrics library

use laborlens::metrics::{lift, pearson, slope, spearman, stability, support};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_pearson_perfect_positive() {
    let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_close(pearson(&xs, &xs), 1.0);
}

#[test]
fn test_pearson_perfect_negative() {
    let xs = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let negated: Vec<f64> = xs.iter().map(|x| -x).collect();
    assert_close(pearson(&xs, &negated), -1.0);
}

#[test]
fn test_pearson_stays_in_bounds() {
    let xs = vec![3.0, 7.0, 1.0, 9.0, 4.0, 6.0];
    let ys = vec![10.0, 2.0, 8.0, 5.0, 12.0, 1.0];
    let r = pearson(&xs, &ys);
    assert!((-1.0..=1.0).contains(&r));
}

#[test]
fn test_pearson_zero_variance_is_zero() {
    let flat = vec![5.0; 6];
    let ys = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    assert_eq!(pearson(&flat, &ys), 0.0);
}

#[test]
fn test_pearson_mismatched_input_is_zero() {
    assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    assert_eq!(pearson(&[1.0], &[1.0]), 0.0);
    assert_eq!(pearson(&[], &[]), 0.0);
}

#[test]
fn test_spearman_monotonic_transform_invariance() {
    let xs = vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0];
    let ys = vec![2.0, 9.0, 3.0, 1.0, 6.0, 4.0];
    let base = spearman(&xs, &ys);
    let exp_xs: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
    let cubed_ys: Vec<f64> = ys.iter().map(|y| y * y * y).collect();
    assert_close(spearman(&exp_xs, &ys), base);
    assert_close(spearman(&xs, &cubed_ys), base);
}

#[test]
fn test_spearman_ties_get_mean_rank() {
    // [1, 2, 2, 3] ranks to [1, 2.5, 2.5, 4]; against a strictly
    // increasing partner the correlation stays below 1 but positive.
    let xs = vec![1.0, 2.0, 2.0, 3.0];
    let ys = vec![1.0, 2.0, 3.0, 4.0];
    let rho = spearman(&xs, &ys);
    assert!(rho > 0.9 && rho < 1.0);
}

#[test]
fn test_slope_of_line() {
    let xs = vec![0.0, 1.0, 2.0, 3.0];
    let ys = vec![1.0, 3.0, 5.0, 7.0];
    assert_close(slope(&xs, &ys), 2.0);
}

#[test]
fn test_slope_zero_x_variance() {
    assert_eq!(slope(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn test_lift_percentage_of_means() {
    assert_close(lift(&[110.0, 110.0], &[100.0, 100.0]), 10.0);
    assert_close(lift(&[90.0], &[100.0]), -10.0);
}

#[test]
fn test_lift_clamped_near_zero_baseline() {
    assert_eq!(lift(&[100.0], &[0.001]), 500.0);
    assert_eq!(lift(&[-100.0], &[0.001]), -500.0);
}

#[test]
fn test_lift_zero_baseline_and_empty_input() {
    assert_eq!(lift(&[1.0], &[0.0]), 0.0);
    assert_eq!(lift(&[], &[1.0]), 0.0);
    assert_eq!(lift(&[1.0], &[]), 0.0);
}

#[test]
fn test_stability_constant_series_is_one() {
    let flat = vec![42.0; 12];
    assert_close(stability(&flat), 1.0);
}

#[test]
fn test_stability_linear_series_is_one() {
    let line: Vec<f64> = (0..12).map(|i| 3.0 * i as f64).collect();
    assert_close(stability(&line), 1.0);
}

#[test]
fn test_stability_erratic_series_below_half() {
    let zigzag = vec![
        0.0, 50.0, 0.0, 50.0, 0.0, 50.0, 0.0, 50.0, 0.0, 50.0, 0.0, 50.0,
    ];
    assert!(stability(&zigzag) < 0.5);
}

#[test]
fn test_stability_insufficient_data_is_neutral() {
    assert_eq!(stability(&[1.0, 2.0]), 0.5);
    assert_eq!(stability(&[]), 0.5);
}

#[test]
fn test_support_ramp() {
    assert_eq!(support(0, 10), 0.0);
    assert_close(support(5, 10), 0.5);
    assert_eq!(support(10, 10), 1.0);
    assert_eq!(support(25, 10), 1.0);
    assert_eq!(support(3, 0), 1.0);
}
