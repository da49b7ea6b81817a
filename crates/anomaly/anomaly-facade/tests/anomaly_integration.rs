//! Integration tests for the anomaly facade

use anomaly_facade::{
    calibration, detect_anomalies, AnomalyDetector, AnomalyError, AnomalyOutcome,
    AutoencoderDetector, DetectorConfig, Timestamp,
};

fn strain(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 250.0 + 12.0 * (i as f64 * 0.25).sin() + 3.0 * (i as f64 * 1.7).cos())
        .collect()
}

fn epochs_from(start: f64, n: usize, step: f64) -> Vec<Timestamp> {
    (0..n).map(|i| Timestamp::Epoch(start + i as f64 * step)).collect()
}

#[test]
fn test_threshold_invariant_holds_for_several_series() {
    for (n, seed) in [(20, 1), (64, 2), (150, 42)] {
        let mut detector = AutoencoderDetector::new(DetectorConfig::default().with_seed(seed));
        let summary = detector.fit(&strain(n)).unwrap();
        let expected = calibration::mean(&summary.training_errors)
            + 2.0 * calibration::std_dev(&summary.training_errors);
        assert_eq!(summary.threshold, expected);
        assert_eq!(summary.training_errors.len(), n - 4);
    }
}

#[test]
fn test_detect_is_idempotent() {
    let data = strain(90);
    let mut detector = AutoencoderDetector::default();
    detector.fit(&data).unwrap();

    let first = detector.detect(&data, None).unwrap();
    let second = detector.detect(&data, None).unwrap();
    assert_eq!(first.reconstruction_error, second.reconstruction_error);
    assert_eq!(first.is_anomaly, second.is_anomaly);
}

#[test]
fn test_alignment_lengths_match() {
    let data = strain(48);
    let stamps = epochs_from(1_700_000_000.0, data.len(), 600.0);
    let mut detector = AutoencoderDetector::default();
    detector.fit(&data).unwrap();

    let result = detector.detect(&data, Some(&stamps)).unwrap();
    let expected = data.len() - 5 + 1;
    assert_eq!(result.is_anomaly.len(), expected);
    assert_eq!(result.reconstruction_error.len(), expected);
    let aligned = result.timestamps.unwrap();
    assert_eq!(aligned.len(), expected);
    assert_eq!(aligned[0], stamps[4]);
    assert_eq!(aligned.last(), stamps.last());
}

#[test]
fn test_longer_timestamp_sequence_keeps_trailing_entries() {
    let data = strain(30);
    let stamps = epochs_from(0.0, 40, 1.0);
    let mut detector = AutoencoderDetector::default();
    detector.fit(&data).unwrap();

    let result = detector.detect(&data, Some(&stamps)).unwrap();
    let aligned = result.timestamps.unwrap();
    assert_eq!(aligned.len(), 26);
    assert_eq!(aligned[0], Timestamp::Epoch(14.0));
}

#[test]
fn test_short_timestamp_sequence_is_rejected() {
    let data = strain(30);
    let stamps = epochs_from(0.0, 10, 1.0);
    let mut detector = AutoencoderDetector::default();
    detector.fit(&data).unwrap();

    let err = detector.detect(&data, Some(&stamps)).unwrap_err();
    assert_eq!(
        err,
        AnomalyError::TimestampMismatch {
            windows: 26,
            timestamps: 10
        }
    );
}

#[test]
fn test_constant_series_flags_nothing() {
    let data = vec![3.3; 25];
    let mut detector = AutoencoderDetector::default();
    let summary = detector.fit(&data).unwrap();

    // every window is identical, so every error is identical and the
    // threshold collapses onto the mean
    let mean = calibration::mean(&summary.training_errors);
    assert!((summary.threshold - mean).abs() < 1e-12);
    assert!(calibration::std_dev(&summary.training_errors) < 1e-12);

    let result = detector.detect(&data, None).unwrap();
    assert!(result.is_anomaly.iter().all(|&a| !a));
    assert_eq!(result.anomaly_count(), 0);
}

#[test]
fn test_detect_without_fit_is_not_fitted() {
    let detector = AutoencoderDetector::default();
    assert_eq!(
        detector.detect(&strain(20), None),
        Err(AnomalyError::NotFitted)
    );
}

#[test]
fn test_window_size_one() {
    let config = DetectorConfig::default().with_window_size(1);
    let data = strain(12);
    let mut detector = AutoencoderDetector::new(config);
    let summary = detector.fit(&data).unwrap();
    assert_eq!(summary.windows, 12);
    let result = detector.detect(&data, None).unwrap();
    assert_eq!(result.is_anomaly.len(), 12);
}

#[test]
fn test_detect_anomalies_folds_errors_into_outcome() {
    let outcome = detect_anomalies(&[1.0, 2.0], None, &DetectorConfig::default());
    match outcome {
        AnomalyOutcome::Failure(failure) => {
            assert_eq!(failure.error, "Insufficient data: required 5, got 2");
            assert!(failure.channel.is_none());
        }
        AnomalyOutcome::Detected(_) => panic!("expected failure"),
    }
}

#[test]
fn test_outcome_json_shape() {
    let data = strain(40);
    let stamps = epochs_from(1_700_000_000.0, data.len(), 3600.0);
    let outcome = detect_anomalies(&data, Some(&stamps), &DetectorConfig::default());
    let json = serde_json::to_value(&outcome).unwrap();

    for key in [
        "reconstruction_error",
        "is_anomaly",
        "threshold",
        "timestamps",
        "anomaly_dates",
    ] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert!(json.get("error").is_none());
    assert_eq!(json["timestamps"].as_array().unwrap().len(), 36);
}
