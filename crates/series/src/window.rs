//! Sliding-window framing
//!
//! Both analytic components cut a series into overlapping stride-1 windows.
//! The detector reconstructs each window itself; the forecaster pairs each
//! window with the sample that follows it.

/// Overlapping windows of length `window_size`.
///
/// A series of length `N` yields `N - window_size + 1` windows, or none when
/// it is shorter than one window.
pub fn sliding_windows(data: &[f64], window_size: usize) -> Vec<Vec<f64>> {
    if window_size == 0 || data.len() < window_size {
        return Vec::new();
    }
    data.windows(window_size).map(|w| w.to_vec()).collect()
}

/// Supervised autoregressive framing: `x[i] = data[i..i + w]`, `y[i] = data[i + w]`.
///
/// A series of length `N` yields `N - window_size` rows.
pub fn supervised_windows(data: &[f64], window_size: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    if window_size == 0 || data.len() <= window_size {
        return (Vec::new(), Vec::new());
    }
    data.windows(window_size + 1)
        .map(|w| (w[..window_size].to_vec(), w[window_size]))
        .unzip()
}
