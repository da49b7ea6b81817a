//! Autoencoder anomaly detector.

use anomaly_api::DetectorConfig;
use anomaly_spi::{AnomalyDetector, AnomalyError, Result, TrainingSummary};
use series::sliding_windows;
use tracing::{debug, info};

use crate::calibration;
use crate::network::{flatten_gradients, Autoencoder};
use crate::optimizer::Adam;
use crate::scaler::MinMaxScaler;

/// Epoch interval between training-loss log lines
const LOG_EVERY: usize = 10;

/// State that only exists once training has finished.
#[derive(Debug, Clone)]
struct FittedModel {
    scaler: MinMaxScaler,
    network: Autoencoder,
    threshold: f64,
}

/// Reconstruction-error detector over sliding windows.
///
/// Each window of `window_size` consecutive samples is min-max scaled per
/// position, passed through a bottleneck [`Autoencoder`], and scored by its
/// mean squared reconstruction error. Windows scoring above
/// `mean + threshold_sigma * std` of the training errors are anomalous.
#[derive(Debug, Clone)]
pub struct AutoencoderDetector {
    config: DetectorConfig,
    model: Option<FittedModel>,
}

impl AutoencoderDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Fitted scaler, if any.
    pub fn scaler(&self) -> Option<&MinMaxScaler> {
        self.model.as_ref().map(|m| &m.scaler)
    }

    /// Fitted network, if any.
    pub fn network(&self) -> Option<&Autoencoder> {
        self.model.as_ref().map(|m| &m.network)
    }

    fn windows(&self, data: &[f64]) -> Result<Vec<Vec<f64>>> {
        let w = self.config.window_size;
        if data.len() < w {
            return Err(AnomalyError::InsufficientData {
                required: w,
                got: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|x| !x.is_finite()) {
            return Err(AnomalyError::NumericFailure(format!(
                "non-finite value at index {}",
                pos
            )));
        }
        Ok(sliding_windows(data, w))
    }
}

impl Default for AutoencoderDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

fn reconstruction_errors(network: &Autoencoder, scaled: &[Vec<f64>]) -> Vec<f64> {
    scaled
        .iter()
        .map(|row| network.reconstruction_error(row))
        .collect()
}

impl AnomalyDetector for AutoencoderDetector {
    fn fit(&mut self, data: &[f64]) -> Result<TrainingSummary> {
        self.config.validate()?;
        let windows = self.windows(data)?;
        let scaler = MinMaxScaler::fit(&windows)?;
        let scaled = scaler.transform(&windows);

        let mut network = Autoencoder::new(self.config.window_size, self.config.seed);
        let mut adam = Adam::new(self.config.learning_rate);
        for epoch in 1..=self.config.epochs {
            let (loss, grads) = network.loss_and_gradients(&scaled);
            if !loss.is_finite() {
                return Err(AnomalyError::NumericFailure(format!(
                    "training loss is {} at epoch {}",
                    loss, epoch
                )));
            }
            adam.step(network.parameters_mut(), &flatten_gradients(&grads));
            if epoch % LOG_EVERY == 0 {
                debug!(epoch, epochs = self.config.epochs, loss, "Autoencoder training");
            }
        }

        let training_errors = reconstruction_errors(&network, &scaled);
        let final_loss = calibration::mean(&training_errors);
        let threshold = calibration::threshold(&training_errors, self.config.threshold_sigma);
        if !threshold.is_finite() {
            return Err(AnomalyError::NumericFailure(format!(
                "threshold is {}",
                threshold
            )));
        }

        info!(
            windows = windows.len(),
            epochs = adam.steps(),
            final_loss,
            threshold,
            "Fitted autoencoder detector"
        );

        self.model = Some(FittedModel {
            scaler,
            network,
            threshold,
        });

        Ok(TrainingSummary {
            final_loss,
            epochs: self.config.epochs,
            windows: windows.len(),
            threshold,
            training_errors,
        })
    }

    fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
        let model = self.model.as_ref().ok_or(AnomalyError::NotFitted)?;
        let windows = self.windows(data)?;
        let scaled = model.scaler.transform(&windows);
        Ok(reconstruction_errors(&model.network, &scaled))
    }

    fn threshold(&self) -> Option<f64> {
        self.model.as_ref().map(|m| m.threshold)
    }

    fn window_size(&self) -> usize {
        self.config.window_size
    }
}
