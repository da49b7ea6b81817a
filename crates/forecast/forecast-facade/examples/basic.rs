//! Basic example demonstrating window forecasting
//!
//! Run with: cargo run --example basic -p forecast-facade

use std::collections::BTreeMap;

use forecast_facade::{forecast, forecast_channels, ForecastConfig, WindowForecaster};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== forecast-facade Basic Examples ===\n");

    // Slowly discharging battery with a small daily ripple
    let battery: Vec<f64> = (0..40)
        .map(|i| 12.6 - i as f64 * 0.01 + 0.02 * (i as f64 * 0.8).sin())
        .collect();

    println!("Battery voltage: {:?}\n", &battery[..10]);

    // 1. Single series
    println!("1. Forecast (window=5, steps=3)");
    let outcome = forecast(&battery, &ForecastConfig::default());
    let report = outcome.report().ok_or("forecast failed")?;
    println!("   R2: {:.4}", report.r2_score);
    println!("   RMSE: {:.5}", report.rmse);
    println!("   Quality: {}", report.model_quality.as_str());
    println!(
        "   Next values: {:?}\n",
        report.future_predictions.iter().map(|v| format!("{:.3}", v)).collect::<Vec<_>>()
    );

    // 2. Longer horizon with a wider window
    println!("2. Forecast (window=8, steps=6)");
    let config = ForecastConfig::new(8, 6);
    let outcome = forecast(&battery, &config);
    match outcome.report() {
        Some(report) => println!(
            "   Next values: {:?}\n",
            report.future_predictions.iter().map(|v| format!("{:.3}", v)).collect::<Vec<_>>()
        ),
        None => println!("   Error: {:?}\n", outcome.error()),
    }

    // 3. Several channels at once; short ones fail on their own
    println!("3. Per-channel batch");
    let mut channels = BTreeMap::new();
    channels.insert("battv".to_string(), battery.clone());
    channels.insert(
        "Strain(1)".to_string(),
        (0..30).map(|i| 250.0 + 5.0 * (i as f64 * 0.3).sin()).collect(),
    );
    channels.insert("Strain(2)".to_string(), vec![251.0, 249.5, 250.2]);

    let forecaster = WindowForecaster::new(ForecastConfig::default());
    for (channel, outcome) in forecast_channels(&forecaster, &channels) {
        match outcome.report() {
            Some(report) => println!("   {}: r2={:.3}", channel, report.r2_score),
            None => println!("   {}: {}", channel, outcome.error().unwrap_or("unknown error")),
        }
    }

    println!("\n=== Examples Complete ===");
    Ok(())
}
