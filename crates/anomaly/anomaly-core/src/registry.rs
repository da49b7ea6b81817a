//! Per-channel detector registry.
//!
//! The host owns a [`ModelRegistry`] and passes it to every detection call.
//! Published detectors live in one read-mostly map. Fitting a channel holds
//! that channel's fit lock until the detector is fully trained, so concurrent
//! callers for one channel fit at most once and never observe a half-trained
//! model. Other channels and readers proceed independently.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anomaly_api::{DetectorConfig, MissingModelPolicy, RegistryConfig};
use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyOutcome, AnomalyResult, Result, Timestamp,
    TrainingSummary,
};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::detector::AutoencoderDetector;

type FitLock = Arc<Mutex<()>>;
type Factory<D> = Arc<dyn Fn() -> D + Send + Sync>;

/// Fitted detectors keyed by channel identifier.
pub struct ModelRegistry<D: AnomalyDetector = AutoencoderDetector> {
    models: RwLock<HashMap<String, Arc<D>>>,
    /// Locks for channels with a fit in flight
    fit_locks: Mutex<HashMap<String, FitLock>>,
    factory: Factory<D>,
    policy: MissingModelPolicy,
}

impl ModelRegistry<AutoencoderDetector> {
    /// Registry that creates autoencoder detectors from `config.detector`.
    pub fn new(config: RegistryConfig) -> Self {
        let detector = config.detector;
        Self::with_factory(config.missing_model, move || {
            AutoencoderDetector::new(detector.clone())
        })
    }

    /// [`ModelRegistry::fit`] with a detector built from `config` instead of
    /// the registry default, e.g. a channel-specific window size.
    pub fn fit_with_config(
        &self,
        channel: &str,
        data: &[f64],
        config: DetectorConfig,
    ) -> Result<TrainingSummary> {
        config.validate()?;
        self.fit_detector(channel, data, AutoencoderDetector::new(config))
    }
}

impl Default for ModelRegistry<AutoencoderDetector> {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl<D: AnomalyDetector> ModelRegistry<D> {
    /// Registry that creates unfitted detectors with `factory`.
    pub fn with_factory<F>(policy: MissingModelPolicy, factory: F) -> Self
    where
        F: Fn() -> D + Send + Sync + 'static,
    {
        Self {
            models: RwLock::new(HashMap::new()),
            fit_locks: Mutex::new(HashMap::new()),
            factory: Arc::new(factory),
            policy,
        }
    }

    pub fn policy(&self) -> MissingModelPolicy {
        self.policy
    }

    fn fit_lock(&self, channel: &str) -> FitLock {
        let mut locks = self.fit_locks.lock();
        locks.entry(channel.to_string()).or_default().clone()
    }

    /// End a fit started under `lock`: publish `trained` unless the channel
    /// was invalidated meanwhile, and drop the lock entry once no other
    /// caller holds it. Returns whether `trained` was published.
    fn finish_fit(&self, channel: &str, lock: &FitLock, trained: Option<Arc<D>>) -> bool {
        let mut locks = self.fit_locks.lock();
        let current = locks.get(channel).is_some_and(|l| Arc::ptr_eq(l, lock));
        if !current {
            return false;
        }
        let published = match trained {
            Some(detector) => {
                self.models.write().insert(channel.to_string(), detector);
                true
            }
            None => false,
        };
        // The map entry and the caller's handle.
        if Arc::strong_count(lock) == 2 {
            locks.remove(channel);
        }
        published
    }

    /// Publish an already fitted detector for `channel`, replacing any
    /// previous one.
    pub fn insert(&self, channel: &str, detector: D) -> Result<()> {
        if !detector.is_fitted() {
            return Err(AnomalyError::NotFitted);
        }
        self.models
            .write()
            .insert(channel.to_string(), Arc::new(detector));
        Ok(())
    }

    /// Fitted detector for `channel`. While a refit is in flight this is the
    /// previously published detector.
    pub fn get(&self, channel: &str) -> Option<Arc<D>> {
        self.models.read().get(channel).cloned()
    }

    /// Drop the detector for `channel`, returning it if one was fitted.
    ///
    /// A fit already running for the channel completes but is not published.
    pub fn invalidate(&self, channel: &str) -> Option<Arc<D>> {
        let mut locks = self.fit_locks.lock();
        locks.remove(channel);
        let removed = self.models.write().remove(channel);
        if removed.is_some() {
            info!(channel, "Invalidated anomaly model");
        }
        removed
    }

    /// Drop every detector.
    pub fn clear(&self) {
        let mut locks = self.fit_locks.lock();
        locks.clear();
        self.models.write().clear();
    }

    /// Channels with a fitted detector, sorted.
    pub fn channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.models.read().keys().cloned().collect();
        channels.sort();
        channels
    }

    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Train a fresh detector on `data` and publish it for `channel`.
    ///
    /// The previous detector, if any, stays in place when training fails.
    pub fn fit(&self, channel: &str, data: &[f64]) -> Result<TrainingSummary> {
        self.fit_detector(channel, data, (self.factory)())
    }

    fn fit_detector(
        &self,
        channel: &str,
        data: &[f64],
        mut detector: D,
    ) -> Result<TrainingSummary> {
        let lock = self.fit_lock(channel);
        let _guard = lock.lock();
        match detector.fit(data) {
            Ok(summary) => {
                self.publish(channel, &lock, Arc::new(detector), &summary);
                Ok(summary)
            }
            Err(err) => {
                self.finish_fit(channel, &lock, None);
                Err(err)
            }
        }
    }

    fn publish(
        &self,
        channel: &str,
        lock: &FitLock,
        detector: Arc<D>,
        summary: &TrainingSummary,
    ) {
        if self.finish_fit(channel, lock, Some(detector)) {
            info!(channel, threshold = summary.threshold, "Registered anomaly model");
        } else {
            debug!(channel, "Channel invalidated during fit; model discarded");
        }
    }

    /// Detector for `channel`, fitting one on `data` if the policy allows.
    fn resolve(&self, channel: &str, data: &[f64]) -> Result<Arc<D>> {
        if let Some(detector) = self.get(channel) {
            return Ok(detector);
        }
        if self.policy == MissingModelPolicy::Reject {
            return Err(AnomalyError::ModelNotReady {
                channel: channel.to_string(),
            });
        }

        let lock = self.fit_lock(channel);
        let _guard = lock.lock();
        if let Some(detector) = self.get(channel) {
            self.finish_fit(channel, &lock, None);
            return Ok(detector);
        }
        warn!(
            channel,
            "No anomaly model for channel; fitting on the series being scored"
        );
        let mut detector = (self.factory)();
        match detector.fit(data) {
            Ok(summary) => {
                let detector = Arc::new(detector);
                self.publish(channel, &lock, Arc::clone(&detector), &summary);
                Ok(detector)
            }
            Err(err) => {
                self.finish_fit(channel, &lock, None);
                Err(err)
            }
        }
    }

/// Label `data` for `channel` with its registered detector.
    pub fn detect(
        &self,
        channel: &str,
        data: &[f64],
        timestamps: Option<&[Timestamp]>,
    ) -> Result<AnomalyResult> {
        let detector = self.resolve(channel, data)?;
        detector.detect(data, timestamps)
    }

    /// [`ModelRegistry::detect`] folded into an outcome record.
    pub fn detect_outcome(
        &self,
        channel: &str,
        data: &[f64],
        timestamps: Option<&[Timestamp]>,
    ) -> AnomalyOutcome {
        let result = self.detect(channel, data, timestamps);
        if let Err(err) = &result {
            warn!(channel, error = %err, "Anomaly detection failed");
        }
        AnomalyOutcome::for_channel(channel, result)
    }
}

impl<D: AnomalyDetector> fmt::Debug for ModelRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("channels", &self.channels())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    fn wave(n: usize, phase: f64) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.4 + phase).sin()).collect()
    }

    fn quick_config() -> DetectorConfig {
        DetectorConfig::default().with_epochs(5)
    }

    fn counting_registry(
        policy: MissingModelPolicy,
    ) -> (ModelRegistry<AutoencoderDetector>, Arc<AtomicUsize>) {
        let fits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fits);
        let registry = ModelRegistry::with_factory(policy, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            AutoencoderDetector::new(quick_config())
        });
        (registry, fits)
    }

    #[test]
    fn test_fit_then_get() {
        let registry = ModelRegistry::new(RegistryConfig::new(quick_config()));
        assert!(registry.get("Strain(1)").is_none());
        let summary = registry.fit("Strain(1)", &wave(30, 0.0)).unwrap();
        let detector = registry.get("Strain(1)").unwrap();
        assert_eq!(detector.threshold(), Some(summary.threshold));
        assert_eq!(registry.channels(), vec!["Strain(1)".to_string()]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reject_policy_requires_explicit_fit() {
        let registry = ModelRegistry::new(
            RegistryConfig::new(quick_config()).with_missing_model(MissingModelPolicy::Reject),
        );
        let err = registry.detect("Strain(2)", &wave(30, 0.0), None).unwrap_err();
        assert_eq!(
            err,
            AnomalyError::ModelNotReady {
                channel: "Strain(2)".to_string()
            }
        );
        assert!(registry.is_empty());

        registry.fit("Strain(2)", &wave(30, 0.0)).unwrap();
        assert!(registry.detect("Strain(2)", &wave(30, 1.0), None).is_ok());
    }

    #[test]
    fn test_fit_on_demand_reuses_model() {
        let (registry, fits) = counting_registry(MissingModelPolicy::FitOnDemand);
        let first = registry.detect("Strain(1)", &wave(30, 0.0), None).unwrap();
        let second = registry.detect("Strain(1)", &wave(30, 2.0), None).unwrap();
        assert_eq!(fits.load(Ordering::SeqCst), 1);
        assert_eq!(first.threshold, second.threshold);
    }

    #[test]
    fn test_failed_fit_on_demand_publishes_nothing() {
        let (registry, _) = counting_registry(MissingModelPolicy::FitOnDemand);
        assert!(registry.detect("Strain(1)", &[1.0, 2.0], None).is_err());
        assert!(registry.get("Strain(1)").is_none());
        assert!(registry.channels().is_empty());
    }

    #[test]
    fn test_insert_requires_fitted_detector() {
        let registry = ModelRegistry::default();
        assert_eq!(
            registry.insert("Strain(1)", AutoencoderDetector::default()),
            Err(AnomalyError::NotFitted)
        );

        let mut detector = AutoencoderDetector::new(quick_config());
        detector.fit(&wave(20, 0.0)).unwrap();
        registry.insert("Strain(1)", detector).unwrap();
        assert!(registry.get("Strain(1)").is_some());
    }

    #[test]
    fn test_refit_replaces_model() {
        let (registry, fits) = counting_registry(MissingModelPolicy::FitOnDemand);
        registry.fit("Battery", &wave(30, 0.0)).unwrap();
        let before = registry.get("Battery").unwrap();
        registry.fit("Battery", &wave(30, 1.0)).unwrap();
        let after = registry.get("Battery").unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(fits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let registry = ModelRegistry::new(RegistryConfig::new(quick_config()));
        registry.fit("a", &wave(20, 0.0)).unwrap();
        registry.fit("b", &wave(20, 0.5)).unwrap();

        assert!(registry.invalidate("a").is_some());
        assert!(registry.invalidate("a").is_none());
        assert_eq!(registry.channels(), vec!["b".to_string()]);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_detect_fits_once_per_channel() {
        let (registry, fits) = counting_registry(MissingModelPolicy::FitOnDemand);
        let data = wave(40, 0.0);

        let results: Vec<AnomalyResult> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.detect("Strain(1)", &data, None).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(fits.load(Ordering::SeqCst), 1);
        for result in &results[1..] {
            assert_eq!(result, &results[0]);
        }
    }

    #[test]
    fn test_channels_fit_independently_in_parallel() {
        let (registry, fits) = counting_registry(MissingModelPolicy::FitOnDemand);
        let channels = ["Strain(1)", "Strain(2)", "Strain(3)", "Strain(4)"];

        std::thread::scope(|s| {
            for (i, channel) in channels.iter().enumerate() {
                let registry = &registry;
                s.spawn(move || {
                    registry
                        .detect(channel, &wave(30, i as f64), None)
                        .unwrap();
                });
            }
        });

        assert_eq!(fits.load(Ordering::SeqCst), channels.len());
        assert_eq!(registry.len(), channels.len());
    }

    #[test]
    fn test_fit_with_config_overrides_window_size() {
        let registry = ModelRegistry::new(RegistryConfig::new(quick_config()));
        let summary = registry
            .fit_with_config("Battery", &wave(30, 0.0), quick_config().with_window_size(3))
            .unwrap();
        assert_eq!(summary.windows, 28);

        let detector = registry.get("Battery").unwrap();
        assert_eq!(detector.window_size(), 3);
        let result = registry.detect("Battery", &wave(12, 1.0), None).unwrap();
        assert_eq!(result.reconstruction_error.len(), 10);
    }

    #[test]
    fn test_fit_with_invalid_config_keeps_previous_model() {
        let registry = ModelRegistry::new(RegistryConfig::new(quick_config()));
        registry.fit("Battery", &wave(30, 0.0)).unwrap();
        let before = registry.get("Battery").unwrap();

        let err = registry
            .fit_with_config("Battery", &wave(30, 0.0), quick_config().with_window_size(0))
            .unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidParameter { .. }));
        assert!(Arc::ptr_eq(&before, &registry.get("Battery").unwrap()));
    }

    #[test]
    fn test_failed_fits_leave_no_channel_state() {
        let (registry, _) = counting_registry(MissingModelPolicy::FitOnDemand);
        for i in 0..10 {
            let channel = format!("Strain({})", i);
            assert!(registry.fit(&channel, &[1.0, 2.0]).is_err());
            assert!(registry.detect(&channel, &[1.0], None).is_err());
        }
        assert!(registry.is_empty());
        assert!(registry.fit_locks.lock().is_empty());

        registry.fit("Strain(0)", &wave(30, 0.0)).unwrap();
        assert!(registry.fit_locks.lock().is_empty());
    }

    /// Detector whose `fit` blocks until the test releases it.
    struct GatedDetector {
        gate: Arc<Barrier>,
        threshold: Option<f64>,
    }

    impl AnomalyDetector for GatedDetector {
        fn fit(&mut self, data: &[f64]) -> Result<TrainingSummary> {
            // Once to announce the fit has started, once to wait for release.
            self.gate.wait();
            self.gate.wait();
            self.threshold = Some(1.0);
            Ok(TrainingSummary {
                final_loss: 0.0,
                epochs: 0,
                windows: data.len(),
                threshold: 1.0,
                training_errors: vec![0.0; data.len()],
            })
        }

        fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
            Ok(vec![0.0; data.len()])
        }

        fn threshold(&self) -> Option<f64> {
            self.threshold
        }

        fn window_size(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_readers_do_not_wait_for_inflight_fit() {
        let gate = Arc::new(Barrier::new(2));
        let factory_gate = Arc::clone(&gate);
        let registry = ModelRegistry::with_factory(MissingModelPolicy::Reject, move || {
            GatedDetector {
                gate: Arc::clone(&factory_gate),
                threshold: None,
            }
        });
        registry
            .insert(
                "Battery",
                GatedDetector {
                    gate: Arc::clone(&gate),
                    threshold: Some(1.0),
                },
            )
            .unwrap();

        std::thread::scope(|s| {
            let fitting = s.spawn(|| registry.fit("Battery", &[1.0, 2.0, 3.0]));
            gate.wait();

            // The refit is now blocked inside `fit`.
            assert_eq!(registry.channels(), vec!["Battery".to_string()]);
            assert_eq!(registry.len(), 1);
            assert!(format!("{:?}", registry).contains("Battery"));
            let previous = registry.get("Battery").unwrap();
            assert!(registry.detect("Battery", &[0.5], None).is_ok());

            gate.wait();
            fitting.join().unwrap().unwrap();
            assert!(!Arc::ptr_eq(&previous, &registry.get("Battery").unwrap()));
        });
    }

    #[test]
    fn test_invalidate_during_fit_discards_result() {
        let gate = Arc::new(Barrier::new(2));
        let factory_gate = Arc::clone(&gate);
        let registry = ModelRegistry::with_factory(MissingModelPolicy::Reject, move || {
            GatedDetector {
                gate: Arc::clone(&factory_gate),
                threshold: None,
            }
        });

        std::thread::scope(|s| {
            let fitting = s.spawn(|| registry.fit("Battery", &[1.0, 2.0]));
            gate.wait();
            assert!(registry.invalidate("Battery").is_none());
            gate.wait();
            assert!(fitting.join().unwrap().is_ok());
        });

        assert!(registry.get("Battery").is_none());
        assert!(registry.fit_locks.lock().is_empty());
    }

    #[test]
    fn test_detect_outcome_reports_channel() {
        let registry = ModelRegistry::new(
            RegistryConfig::default().with_missing_model(MissingModelPolicy::Reject),
        );
        let outcome = registry.detect_outcome("Strain(3)", &wave(20, 0.0), None);
        assert_eq!(outcome.error(), Some("No anomaly model for channel 'Strain(3)'"));
    }
}
