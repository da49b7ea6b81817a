//! Basic example demonstrating anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly-facade

use anomaly_facade::{
    detect_anomalies, AnomalyDetector, AutoencoderDetector, DetectorConfig, ModelRegistry,
    RegistryConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly-facade Basic Examples ===\n");

    // Strain gauge readings under a regular load cycle
    let training: Vec<f64> = (0..80)
        .map(|i| 250.0 + 4.0 * (i as f64 * 0.4).sin())
        .collect();

    // Same cycle with two spikes
    let mut test_data: Vec<f64> = (0..30)
        .map(|i| 250.0 + 4.0 * (i as f64 * 0.4 + 0.2).sin())
        .collect();
    test_data[12] = 290.0;
    test_data[24] = 205.0;

    println!("Training data (normal): {:?}", &training[..10]);
    println!("Test data (with spikes at 12, 24)\n");

    let config = DetectorConfig::default().with_epochs(200);

    // 1. Single detector
    println!("1. Autoencoder Detector (window=5)");
    let mut detector = AutoencoderDetector::new(config.clone());
    let summary = detector.fit(&training)?;
    println!("   Final loss: {:.5}", summary.final_loss);
    println!("   Threshold: {:.5}", summary.threshold);
    let result = detector.detect(&test_data, None)?;
    println!("   Anomalous windows: {:?}\n", result.anomaly_indices());

    // 2. Registry keyed by channel
    println!("2. Model Registry");
    let registry = ModelRegistry::new(RegistryConfig::new(config.clone()));
    registry.fit("Strain(1)", &training)?;
    registry.fit_with_config("Strain(2)", &training, config.clone().with_window_size(3))?;
    for channel in registry.channels() {
        let result = registry.detect(&channel, &test_data, None)?;
        println!(
            "   {}: {} windows, {} anomalous",
            channel,
            result.is_anomaly.len(),
            result.anomaly_count()
        );
    }

    // 3. One-shot fit and detect on the same series
    println!("\n3. One-shot detection");
    let outcome = detect_anomalies(&test_data, None, &config);
    match outcome.result() {
        Some(result) => println!("   Anomalous windows: {:?}", result.anomaly_indices()),
        None => println!("   Error: {:?}", outcome.error()),
    }

    println!("\n=== Examples Complete ===");
    Ok(())
}
