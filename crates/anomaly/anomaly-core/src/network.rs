//! Dense layers and the bottleneck autoencoder.
//!
//! The autoencoder maps a window of `W` scaled samples through
//! `W -> 4 -> 2 -> 4 -> W`, with ReLU after every hidden layer and a
//! sigmoid on the output so reconstructions stay in `(0, 1)`.

use rand::prelude::*;

/// Width of the encoder and decoder hidden layers
pub const HIDDEN_DIM: usize = 4;
/// Bottleneck width
pub const LATENT_DIM: usize = 2;

/// Element-wise activation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Relu => x.max(0.0),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed in terms of the activation output `y`.
    pub fn derivative(self, y: f64) -> f64 {
        match self {
            Self::Relu => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Sigmoid => y * (1.0 - y),
        }
    }
}

/// Fully connected layer, `y = f(W x + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    inputs: usize,
    outputs: usize,
    /// Row-major `outputs x inputs`
    weights: Vec<f64>,
    bias: Vec<f64>,
    activation: Activation,
}

impl Dense {
    /// Weights and biases drawn from `U(-1/sqrt(inputs), 1/sqrt(inputs))`.
    pub fn new<R: Rng + ?Sized>(
        inputs: usize,
        outputs: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let bound = 1.0 / (inputs as f64).sqrt();
        let weights = (0..inputs * outputs)
            .map(|_| rng.gen_range(-bound..=bound))
            .collect();
        let bias = (0..outputs).map(|_| rng.gen_range(-bound..=bound)).collect();
        Self {
            inputs,
            outputs,
            weights,
            bias,
            activation,
        }
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .chunks(self.inputs)
            .zip(&self.bias)
            .map(|(row, b)| {
                let z = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b;
                self.activation.apply(z)
            })
            .collect()
    }

    /// Accumulate this layer's gradients for one sample and return the
    /// gradient with respect to its input.
    ///
    /// `grad_output` is `dL/dy`; `output` is the cached activation `y`.
    fn backward(
        &self,
        input: &[f64],
        output: &[f64],
        grad_output: &[f64],
        grads: &mut LayerGradients,
    ) -> Vec<f64> {
        let mut grad_input = vec![0.0; self.inputs];
        for o in 0..self.outputs {
            let delta = grad_output[o] * self.activation.derivative(output[o]);
            if delta == 0.0 {
                continue;
            }
            grads.bias[o] += delta;
            let row = o * self.inputs;
            for i in 0..self.inputs {
                grads.weights[row + i] += delta * input[i];
                grad_input[i] += delta * self.weights[row + i];
            }
        }
        grad_input
    }
}

/// Gradients for one [`Dense`] layer, shaped like its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Vec<f64>,
    pub bias: Vec<f64>,
}

impl LayerGradients {
    fn zeros(layer: &Dense) -> Self {
        Self {
            weights: vec![0.0; layer.weights.len()],
            bias: vec![0.0; layer.bias.len()],
        }
    }
}

/// Bottleneck autoencoder for fixed-width windows.
#[derive(Debug, Clone, PartialEq)]
pub struct Autoencoder {
    layers: Vec<Dense>,
}

impl Autoencoder {
    /// Build a freshly initialised network for windows of `width` samples.
    pub fn new(width: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let shape = [
            (width, HIDDEN_DIM, Activation::Relu),
            (HIDDEN_DIM, LATENT_DIM, Activation::Relu),
            (LATENT_DIM, HIDDEN_DIM, Activation::Relu),
            (HIDDEN_DIM, width, Activation::Sigmoid),
        ];
        let layers = shape
            .iter()
            .map(|&(inputs, outputs, activation)| Dense::new(inputs, outputs, activation, &mut rng))
            .collect();
        Self { layers }
    }

    /// Input and output width.
    pub fn width(&self) -> usize {
        self.layers.first().map_or(0, Dense::inputs)
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub fn reconstruct(&self, input: &[f64]) -> Vec<f64> {
        self.layers
            .iter()
            .fold(input.to_vec(), |x, layer| layer.forward(&x))
    }

    /// Mean squared reconstruction error of one window.
    pub fn reconstruction_error(&self, input: &[f64]) -> f64 {
        let output = self.reconstruct(input);
        let sum: f64 = output.iter().zip(input).map(|(y, x)| (y - x).powi(2)).sum();
        sum / input.len() as f64
    }

    /// Full-batch mean squared error over every element of `batch`, and its
    /// gradient with respect to every layer.
    pub fn loss_and_gradients(&self, batch: &[Vec<f64>]) -> (f64, Vec<LayerGradients>) {
        let mut grads: Vec<LayerGradients> = self.layers.iter().map(LayerGradients::zeros).collect();
        let elements = (batch.len() * self.width()) as f64;
        let mut loss = 0.0;

        for sample in batch {
            // activations[k] is the input to layer k; the last entry is the output
            let mut activations = Vec::with_capacity(self.layers.len() + 1);
            activations.push(sample.clone());
            for layer in &self.layers {
                let next = layer.forward(&activations[activations.len() - 1]);
                activations.push(next);
            }

            let output = &activations[self.layers.len()];
            let mut grad: Vec<f64> = output
                .iter()
                .zip(sample)
                .map(|(y, x)| {
                    loss += (y - x).powi(2);
                    2.0 * (y - x) / elements
                })
                .collect();

            for (k, layer) in self.layers.iter().enumerate().rev() {
                grad = layer.backward(&activations[k], &activations[k + 1], &grad, &mut grads[k]);
            }
        }

        (loss / elements, grads)
    }

    /// Mutable parameter groups in a fixed order: each layer's weights then bias.
    pub fn parameters_mut(&mut self) -> Vec<&mut [f64]> {
        self.layers
            .iter_mut()
            .flat_map(|layer| [layer.weights.as_mut_slice(), layer.bias.as_mut_slice()])
            .collect()
    }
}

/// Flatten per-layer gradients into the order of [`Autoencoder::parameters_mut`].
pub fn flatten_gradients(grads: &[LayerGradients]) -> Vec<&[f64]> {
    grads
        .iter()
        .flat_map(|g| [g.weights.as_slice(), g.bias.as_slice()])
        .collect()
}
