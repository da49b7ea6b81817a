//! Integration tests for the forecast facade

use forecast_facade::{
    forecast, ForecastConfig, ForecastError, ForecastOutcome, Forecaster, ModelQuality,
    WindowForecaster,
};

fn trend(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

fn strain_like(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 120.0 + 8.0 * (i as f64 * 0.4).sin() + 0.05 * i as f64)
        .collect()
}

#[test]
fn test_six_points_is_not_insufficient() {
    let outcome = forecast(&trend(6), &ForecastConfig::default());
    match outcome {
        ForecastOutcome::Failure(failure) => {
            assert!(failure.min_required.is_none());
            assert!(failure.error.starts_with("Numerical failure"));
        }
        ForecastOutcome::Success(_) => panic!("one window cannot be split for scoring"),
    }
}

#[test]
fn test_five_points_is_insufficient() {
    let outcome = forecast(&trend(5), &ForecastConfig::default());
    match outcome {
        ForecastOutcome::Failure(failure) => {
            assert_eq!(failure.error, "Not enough data points for prediction");
            assert_eq!(failure.min_required, Some(6));
            assert_eq!(failure.current_points, Some(5));
        }
        ForecastOutcome::Success(_) => panic!("expected insufficient data"),
    }
}

#[test]
fn test_future_predictions_length_matches_steps() {
    for steps in [0, 1, 3, 10] {
        let config = ForecastConfig::default().with_future_steps(steps);
        let outcome = forecast(&strain_like(60), &config);
        let report = outcome.report().expect("forecast should succeed");
        assert_eq!(report.future_predictions.len(), steps);
    }
}

#[test]
fn test_chronological_split_sizes() {
    let window_size = 5;
    for n in [12, 20, 33, 57, 100] {
        let report = WindowForecaster::default().forecast(&strain_like(n)).unwrap();
        let windows = n - window_size;
        assert_eq!(report.train_windows, (0.8 * windows as f64).floor() as usize);
        assert_eq!(report.train_windows + report.test_windows, windows);
    }
}

#[test]
fn test_twenty_point_trend_is_good() {
    let outcome = forecast(&trend(20), &ForecastConfig::default());
    let report = outcome.report().unwrap();
    assert!((report.r2_score - 1.0).abs() < 1e-9);
    assert_eq!(report.model_quality, ModelQuality::Good);
}

#[test]
fn test_forecast_is_deterministic() {
    let data = strain_like(80);
    let first = WindowForecaster::default().forecast(&data).unwrap();
    let second = WindowForecaster::default().forecast(&data).unwrap();
    assert_eq!(first.r2_score, second.r2_score);
    assert_eq!(first.rmse, second.rmse);
    assert_eq!(first.future_predictions, second.future_predictions);
}

#[test]
fn test_caller_data_is_untouched() {
    let data = strain_like(40);
    let copy = data.clone();
    let _ = forecast(&data, &ForecastConfig::default());
    assert_eq!(data, copy);
}

#[test]
fn test_custom_window_size() {
    let config = ForecastConfig::new(3, 2);
    let report = WindowForecaster::new(config).forecast(&trend(10)).unwrap();
    assert_eq!(report.coefficients.len(), 3);
    assert!((report.future_predictions[0] - 11.0).abs() < 1e-8);
    assert!((report.future_predictions[1] - 12.0).abs() < 1e-8);
}

#[test]
fn test_min_required_follows_window() {
    let forecaster = WindowForecaster::new(ForecastConfig::default().with_window_size(9));
    assert_eq!(forecaster.min_required(), 10);
    assert_eq!(
        forecaster.forecast(&trend(9)).unwrap_err(),
        ForecastError::InsufficientData {
            required: 10,
            actual: 9
        }
    );
}
