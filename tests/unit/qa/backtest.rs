//! Unit tests for backtest error metrics

use laborlens::qa::backtest::{mae, mape, rolling_window_backtest, smape, backtest_forecast};
use laborlens::qa::QaError;

#[test]
fn test_backtest_forecast_documented_example() {
    let actual = vec![100.0, 105.0, 110.0];
    let predicted = vec![98.0, 106.0, 112.0];
    let report = backtest_forecast(&actual, &predicted).unwrap();
    assert!((report.mae - 5.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.n, 3);
    assert!(report.mape > 0.0);
    assert!(report.smape > 0.0);
}

#[test]
fn test_backtest_forecast_rejects_bad_input() {
    assert_eq!(backtest_forecast(&[], &[]), Err(QaError::EmptySeries));
    assert_eq!(
        backtest_forecast(&[1.0, 2.0], &[1.0]),
        Err(QaError::LengthMismatch {
            actual: 2,
            predicted: 1
        })
    );
}

#[test]
fn test_mape_skips_near_zero_actuals() {
    let actual = vec![0.0, 100.0];
    let predicted = vec![50.0, 110.0];
    // Only the second pair counts: |100 - 110| / 100 = 10%.
    assert!((mape(&actual, &predicted) - 10.0).abs() < 1e-9);
}

#[test]
fn test_mape_all_zero_actuals_is_zero() {
    assert_eq!(mape(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn test_smape_jointly_zero_pairs_contribute_nothing() {
    let actual = vec![0.0, 100.0];
    let predicted = vec![0.0, 100.0];
    assert_eq!(smape(&actual, &predicted), 0.0);
}

#[test]
fn test_smape_is_symmetric() {
    let a = vec![100.0, 200.0];
    let b = vec![110.0, 180.0];
    assert!((smape(&a, &b) - smape(&b, &a)).abs() < 1e-12);
}

#[test]
fn test_mae_zero_for_perfect_forecast() {
    let series = vec![10.0, 20.0, 30.0];
    assert_eq!(mae(&series, &series), 0.0);
}

#[test]
fn test_rolling_backtest_pools_origins() {
    let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
    // Naive persistence forecast: repeat the last training value.
    let report = rolling_window_backtest(&series, 5, 1, |train, horizon| {
        Ok::<_, std::convert::Infallible>(vec![*train.last().unwrap(); horizon])
    })
    .unwrap();
    // Origins 5..=9 each predict one step behind reality.
    assert_eq!(report.n, 5);
    assert!((report.mae - 1.0).abs() < 1e-9);
}

#[test]
fn test_rolling_backtest_skips_failing_origins() {
    let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let report = rolling_window_backtest(&series, 5, 1, |train, horizon| {
        if train.len() % 2 == 0 {
            Err("even origins refuse")
        } else {
            Ok(vec![*train.last().unwrap(); horizon])
        }
    })
    .unwrap();
    assert_eq!(report.n, 3);
}

#[test]
fn test_rolling_backtest_all_failures_error() {
    let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let result = rolling_window_backtest(&series, 5, 1, |_, _| Err::<Vec<f64>, _>("no model"));
    assert_eq!(result, Err(QaError::AllOriginsFailed { failed: 5 }));
}

#[test]
fn test_rolling_backtest_rejects_short_series() {
    let series = vec![1.0, 2.0, 3.0];
    let result = rolling_window_backtest(&series, 3, 1, |_, h| {
        Ok::<_, std::convert::Infallible>(vec![0.0; h])
    });
    assert_eq!(
        result,
        Err(QaError::SeriesTooShort {
            len: 3,
            required: 4
        })
    );
}

#[test]
fn test_rolling_backtest_rejects_degenerate_walk() {
    let series = vec![1.0; 10];
    let result = rolling_window_backtest(&series, 0, 1, |_, h| {
        Ok::<_, std::convert::Infallible>(vec![0.0; h])
    });
    assert_eq!(result, Err(QaError::DegenerateWalk));
}
