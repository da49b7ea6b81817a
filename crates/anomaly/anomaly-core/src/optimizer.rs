//! Adam optimizer.

/// Adam with bias-corrected first and second moment estimates.
///
/// Moment buffers are allocated lazily on the first step and follow the
/// order of the parameter groups passed to [`Adam::step`].
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    steps: i32,
    first_moment: Vec<Vec<f64>>,
    second_moment: Vec<Vec<f64>>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            steps: 0,
            first_moment: Vec::new(),
            second_moment: Vec::new(),
        }
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> usize {
        self.steps as usize
    }

    /// Apply one update. `grads[g]` must have the same length as `params[g]`.
    pub fn step(&mut self, params: Vec<&mut [f64]>, grads: &[&[f64]]) {
        if self.first_moment.is_empty() {
            self.first_moment = grads.iter().map(|g| vec![0.0; g.len()]).collect();
            self.second_moment = self.first_moment.clone();
        }
        self.steps += 1;
        let correction1 = 1.0 - self.beta1.powi(self.steps);
        let correction2 = 1.0 - self.beta2.powi(self.steps);

        for (group, (param, grad)) in params.into_iter().zip(grads).enumerate() {
            let m = &mut self.first_moment[group];
            let v = &mut self.second_moment[group];
            for i in 0..param.len() {
                let g = grad[i];
                m[i] = self.beta1 * m[i] + (1.0 - self.beta1) * g;
                v[i] = self.beta2 * v[i] + (1.0 - self.beta2) * g * g;
                let m_hat = m[i] / correction1;
                let v_hat = v[i] / correction2;
                param[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
            }
        }
    }
}
