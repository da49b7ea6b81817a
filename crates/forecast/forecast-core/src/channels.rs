//! Per-channel batch forecasting
//!
//! A deployment reports one battery line plus one series per strain gauge.
//! Channels are modeled independently, so they are fanned out across the
//! rayon pool and each gets its own outcome record.

use std::collections::BTreeMap;

use forecast_spi::{ForecastOutcome, Forecaster};
use rayon::prelude::*;
use tracing::warn;

/// Forecast every channel independently, keyed by channel id.
///
/// A failure on one channel is recorded in its outcome and never affects
/// the others.
pub fn forecast_channels<F>(
    forecaster: &F,
    channels: &BTreeMap<String, Vec<f64>>,
) -> BTreeMap<String, ForecastOutcome>
where
    F: Forecaster + ?Sized,
{
    channels
        .par_iter()
        .map(|(channel, values)| {
            let result = forecaster.forecast(values);
            if let Err(err) = &result {
                warn!(channel = %channel, error = %err, "forecast failed");
            }
            (channel.clone(), ForecastOutcome::from(result))
        })
        .collect()
}
