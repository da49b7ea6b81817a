//! Sliding-window forecaster
//!
//! Frames a series as supervised autoregression (each window predicts the
//! sample that follows it), fits on the chronologically first windows,
//! scores on the trailing ones, and rolls the fitted model forward from the
//! end of the series.

use std::collections::VecDeque;
use std::marker::PhantomData;

use forecast_api::ForecastConfig;
use forecast_spi::{
    ForecastError, ForecastReport, Forecaster, ModelQuality, Regressor, Result,
};
use series::supervised_windows;
use tracing::{debug, info};

use crate::metrics::{r_squared, rmse};
use crate::regression::LinearRegression;

/// Forecaster that retrains a fresh `R` on every call.
#[derive(Debug, Clone)]
pub struct WindowForecaster<R = LinearRegression> {
    config: ForecastConfig,
    _regressor: PhantomData<fn() -> R>,
}

impl WindowForecaster<LinearRegression> {
    /// Least-squares forecaster with the given configuration
    pub fn new(config: ForecastConfig) -> Self {
        Self::with_regressor(config)
    }
}

impl Default for WindowForecaster<LinearRegression> {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl<R: Regressor + Default> WindowForecaster<R> {
    /// Forecaster backed by a custom regressor type
    pub fn with_regressor(config: ForecastConfig) -> Self {
        Self {
            config,
            _regressor: PhantomData,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Number of windows used for fitting out of `windows` in total.
    pub fn split_index(&self, windows: usize) -> usize {
        (windows as f64 * self.config.train_fraction()).floor() as usize
    }

    /// Iterate the model `steps` times from the trailing window, feeding each
    /// prediction back in place of the oldest sample.
    fn roll_forward(&self, model: &R, data: &[f64], steps: usize) -> Result<Vec<f64>> {
        let window_size = self.config.window_size;
        let mut window: VecDeque<f64> = data[data.len() - window_size..].iter().copied().collect();
        let mut predictions = Vec::with_capacity(steps);

        for step in 0..steps {
            let next = model.predict_one(window.make_contiguous())?;
            if !next.is_finite() {
                return Err(ForecastError::numeric(format!(
                    "prediction diverged at step {}",
                    step + 1
                )));
            }
            predictions.push(next);
            window.pop_front();
            window.push_back(next);
        }

        Ok(predictions)
    }
}

impl<R: Regressor + Default> Forecaster for WindowForecaster<R> {
    fn forecast(&self, data: &[f64]) -> Result<ForecastReport> {
        self.config.validate()?;

        let required = self.min_required();
        if data.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: data.len(),
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::numeric("series contains non-finite values"));
        }

        let (x, y) = supervised_windows(data, self.config.window_size);
        let split = self.split_index(x.len());
        let test_windows = x.len() - split.min(x.len());
        debug!(windows = x.len(), train = split, test = test_windows, "chronological split");

        if split == 0 {
            return Err(ForecastError::numeric(format!(
                "training split is empty ({} windows)",
                x.len()
            )));
        }
        if test_windows < 2 {
            return Err(ForecastError::numeric(format!(
                "r2 is undefined with {} held-out window(s)",
                test_windows
            )));
        }

        let mut model = R::default();
        model.fit(&x[..split], &y[..split])?;

        let predicted = model.predict(&x[split..])?;
        let actual = &y[split..];
        let r2 = r_squared(actual, &predicted);
        let error = rmse(actual, &predicted);
        if !r2.is_finite() || !error.is_finite() {
            return Err(ForecastError::numeric("held-out metrics are not finite"));
        }

        let future_predictions = self.roll_forward(&model, data, self.config.future_steps)?;
        let model_quality = ModelQuality::from_r2(r2);

        info!(
            points = data.len(),
            r2,
            rmse = error,
            quality = model_quality.as_str(),
            "forecast model fitted"
        );

        Ok(ForecastReport {
            r2_score: r2,
            rmse: error,
            future_predictions,
            model_quality,
            train_windows: split,
            test_windows,
            coefficients: model.coefficients().to_vec(),
            intercept: model.intercept(),
        })
    }

    fn min_required(&self) -> usize {
        self.config.min_required()
    }
}
