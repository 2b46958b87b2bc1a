use crate::config::ClassifierConfig;
use crate::error::{Result, TopologyError};
use crate::types::Topology;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rulinalg::matrix::{BaseMatrix, BaseMatrixMut, Matrix};

/// Largest mini-batch used when no batch size is configured
const DEFAULT_MAX_BATCH: usize = 200;

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Epochs actually run
    pub n_iter: usize,
    pub final_loss: f64,
    /// False when `max_iter` was reached before the loss stopped improving
    pub converged: bool,
}

/// Multilayer perceptron classifier: ReLU hidden layers, softmax output,
/// cross-entropy loss with an L2 penalty, trained by Adam on mini-batches.
pub struct MlpClassifier {
    hidden_layer_sizes: Vec<usize>,
    config: ClassifierConfig,
    seed: u64,
    /// `fan_in x fan_out` per layer
    coefs: Vec<Matrix<f64>>,
    intercepts: Vec<Vec<f64>>,
    n_features: usize,
    n_classes: usize,
}

impl MlpClassifier {
    /// Build an untrained classifier; every hidden layer must have at least one unit.
    pub fn new(topology: &Topology, config: ClassifierConfig, seed: u64) -> Result<Self> {
        if topology.layers().is_empty() {
            return Err(TopologyError::InvalidTopology {
                topology: topology.to_string(),
                reason: "at least one hidden layer is required".to_string(),
            });
        }

        let hidden_layer_sizes = topology
            .layers()
            .iter()
            .map(|&size| {
                if size <= 0 {
                    Err(TopologyError::InvalidTopology {
                        topology: topology.to_string(),
                        reason: format!("hidden layer sizes must be > 0, got {}", size),
                    })
                } else {
                    Ok(size as usize)
                }
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(Self {
            hidden_layer_sizes,
            config,
            seed,
            coefs: Vec::new(),
            intercepts: Vec::new(),
            n_features: 0,
            n_classes: 0,
        })
    }

    pub fn is_fitted(&self) -> bool {
        !self.coefs.is_empty()
    }

    /// Train from scratch on `x` (one row per sample) and class indices `y`.
    ///
    /// `n_classes` sizes the output layer, so a training fold that happens to
    /// miss a class still yields a classifier over all classes. Hitting
    /// `max_iter` is not an error; it is reported through `FitReport::converged`.
    pub fn fit(&mut self, x: &Matrix<f64>, y: &[usize], n_classes: usize) -> Result<FitReport> {
        let n_samples = x.rows();
        if n_samples == 0 || x.cols() == 0 {
            return Err(TopologyError::TrainingFailure("empty training data".to_string()));
        }
        if n_samples != y.len() {
            return Err(TopologyError::TrainingFailure(format!(
                "{} samples but {} labels",
                n_samples,
                y.len()
            )));
        }
        if n_classes < 2 {
            return Err(TopologyError::TrainingFailure(format!(
                "at least 2 classes are required, got {}",
                n_classes
            )));
        }
        if let Some(&bad) = y.iter().find(|&&label| label >= n_classes) {
            return Err(TopologyError::TrainingFailure(format!(
                "label {} out of range for {} classes",
                bad, n_classes
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.n_features = x.cols();
        self.n_classes = n_classes;
        self.initialize(&mut rng);

        let batch_size = self
            .config
            .batch_size
            .unwrap_or(DEFAULT_MAX_BATCH)
            .clamp(1, n_samples);

        let mut adam = Adam::new(&self.parameter_lengths(), &self.config);
        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut best_loss = f64::INFINITY;
        let mut no_improvement_count = 0;
        let mut report = FitReport {
            n_iter: 0,
            final_loss: f64::INFINITY,
            converged: false,
        };

        for epoch in 0..self.config.max_iter {
            if self.config.shuffle {
                indices.shuffle(&mut rng);
            }

            let mut accumulated_loss = 0.0;
            for batch in indices.chunks(batch_size) {
                let xb = x.select_rows(batch);
                let yb: Vec<usize> = batch.iter().map(|&i| y[i]).collect();
                accumulated_loss += self.train_batch(&xb, &yb, &mut adam) * batch.len() as f64;
            }

            let loss = accumulated_loss / n_samples as f64;
            if !loss.is_finite() {
                return Err(TopologyError::TrainingFailure(format!(
                    "loss diverged at epoch {}",
                    epoch + 1
                )));
            }
            report.n_iter = epoch + 1;
            report.final_loss = loss;

            if loss > best_loss - self.config.tol {
                no_improvement_count += 1;
            } else {
                no_improvement_count = 0;
            }
            if loss < best_loss {
                best_loss = loss;
            }

            if no_improvement_count > self.config.n_iter_no_change {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            log::debug!(
                "Optimizer did not converge for {:?}: maximum iterations ({}) reached, loss {:.6}",
                self.hidden_layer_sizes,
                self.config.max_iter,
                report.final_loss
            );
        }

        Ok(report)
    }

    /// Most probable class per row
    pub fn predict(&self, x: &Matrix<f64>) -> Result<Vec<usize>> {
        if !self.is_fitted() {
            return Err(TopologyError::TrainingFailure(
                "classifier has not been fitted".to_string(),
            ));
        }
        if x.cols() != self.n_features {
            return Err(TopologyError::TrainingFailure(format!(
                "expected {} features, got {}",
                self.n_features,
                x.cols()
            )));
        }
        if x.rows() == 0 {
            return Ok(Vec::new());
        }

        let activations = self.forward(x);
        let output = activations.last().ok_or_else(|| {
            TopologyError::TrainingFailure("network has no layers".to_string())
        })?;

        Ok(output
            .data()
            .chunks(self.n_classes)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (class, &p)| {
                        if p > best.1 {
                            (class, p)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }

    /// Fraction of rows classified correctly
    pub fn score(&self, x: &Matrix<f64>, y: &[usize]) -> Result<f64> {
        if x.rows() != y.len() {
            return Err(TopologyError::TrainingFailure(format!(
                "{} samples but {} labels",
                x.rows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(TopologyError::TrainingFailure("empty test data".to_string()));
        }

        let predictions = self.predict(x)?;
        let correct = predictions.iter().zip(y).filter(|(p, t)| p == t).count();
        Ok(correct as f64 / y.len() as f64)
    }

    /// Glorot-uniform weights and biases
    fn initialize(&mut self, rng: &mut StdRng) {
        let mut layer_units = Vec::with_capacity(self.hidden_layer_sizes.len() + 2);
        layer_units.push(self.n_features);
        layer_units.extend_from_slice(&self.hidden_layer_sizes);
        layer_units.push(self.n_classes);

        self.coefs.clear();
        self.intercepts.clear();
        for units in layer_units.windows(2) {
            let (fan_in, fan_out) = (units[0], units[1]);
            let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();

            let weights: Vec<f64> = (0..fan_in * fan_out)
                .map(|_| rng.gen_range(-bound..bound))
                .collect();
            self.coefs.push(Matrix::new(fan_in, fan_out, weights));
            self.intercepts
                .push((0..fan_out).map(|_| rng.gen_range(-bound..bound)).collect());
        }
    }

    /// Flat lengths of coefs followed by intercepts, the order Adam sees them in
    fn parameter_lengths(&self) -> Vec<usize> {
        self.coefs
            .iter()
            .map(|c| c.rows() * c.cols())
            .chain(self.intercepts.iter().map(Vec::len))
            .collect()
    }

    /// Activations of every layer, input first, softmax probabilities last
    fn forward(&self, x: &Matrix<f64>) -> Vec<Matrix<f64>> {
        let last = self.coefs.len() - 1;
        let mut activations = Vec::with_capacity(self.coefs.len() + 1);
        activations.push(x.clone());

        for (layer, (coef, intercept)) in self.coefs.iter().zip(&self.intercepts).enumerate() {
            let mut z = &activations[layer] * coef;
            add_row_vector(&mut z, intercept);
            let activation = if layer == last {
                softmax_rows(z)
            } else {
                z.apply(&relu)
            };
            activations.push(activation);
        }

        activations
    }

    /// One forward/backward pass and Adam step; returns the batch loss
    fn train_batch(&mut self, xb: &Matrix<f64>, yb: &[usize], adam: &mut Adam) -> f64 {
        let n = yb.len() as f64;
        let alpha = self.config.alpha;
        let activations = self.forward(xb);
        let n_layers = self.coefs.len();

        let probabilities = &activations[n_layers];
        let cross_entropy: f64 = probabilities
            .data()
            .chunks(self.n_classes)
            .zip(yb)
            .map(|(row, &label)| -row[label].clamp(f64::EPSILON, 1.0 - f64::EPSILON).ln())
            .sum::<f64>()
            / n;
        let squared_weights: f64 = self
            .coefs
            .iter()
            .map(|c| c.data().iter().map(|w| w * w).sum::<f64>())
            .sum();
        let loss = cross_entropy + 0.5 * alpha * squared_weights / n;

        // Softmax with cross-entropy: output delta is p - onehot(y)
        let mut delta = probabilities.clone();
        for (row, &label) in yb.iter().enumerate() {
            delta[[row, label]] -= 1.0;
        }

        let mut coef_grads = vec![Vec::new(); n_layers];
        let mut intercept_grads = vec![Vec::new(); n_layers];
        for layer in (0..n_layers).rev() {
            let penalty = self.coefs[layer].clone().apply(&|w| w * alpha);
            let coef_grad = (activations[layer].transpose() * &delta + penalty).apply(&|g| g / n);
            coef_grads[layer] = coef_grad.into_vec();
            intercept_grads[layer] = column_means(&delta);

            if layer > 0 {
                let mut next = &delta * self.coefs[layer].transpose();
                // ReLU derivative
                for (d, a) in next.mut_data().iter_mut().zip(activations[layer].data()) {
                    if *a <= 0.0 {
                        *d = 0.0;
                    }
                }
                delta = next;
            }
        }

        let grads: Vec<Vec<f64>> = coef_grads.into_iter().chain(intercept_grads).collect();
        let params: Vec<&mut [f64]> = self
            .coefs
            .iter_mut()
            .map(|c| c.mut_data())
            .chain(self.intercepts.iter_mut().map(|b| b.as_mut_slice()))
            .collect();
        adam.step(params, &grads);

        loss
    }
}

/// Adam optimizer state, one moment pair per parameter array
struct Adam {
    learning_rate: f64,
    beta_1: f64,
    beta_2: f64,
    epsilon: f64,
    t: i32,
    ms: Vec<Vec<f64>>,
    vs: Vec<Vec<f64>>,
}

impl Adam {
    fn new(lengths: &[usize], config: &ClassifierConfig) -> Self {
        Self {
            learning_rate: config.learning_rate_init,
            beta_1: config.beta_1,
            beta_2: config.beta_2,
            epsilon: config.epsilon,
            t: 0,
            ms: lengths.iter().map(|&len| vec![0.0; len]).collect(),
            vs: lengths.iter().map(|&len| vec![0.0; len]).collect(),
        }
    }

    fn step(&mut self, params: Vec<&mut [f64]>, grads: &[Vec<f64>]) {
        self.t += 1;
        let lr_t = self.learning_rate * (1.0 - self.beta_2.powi(self.t)).sqrt()
            / (1.0 - self.beta_1.powi(self.t));

        for (k, (param, grad)) in params.into_iter().zip(grads).enumerate() {
            let (m, v) = (&mut self.ms[k], &mut self.vs[k]);
            for i in 0..param.len() {
                m[i] = self.beta_1 * m[i] + (1.0 - self.beta_1) * grad[i];
                v[i] = self.beta_2 * v[i] + (1.0 - self.beta_2) * grad[i] * grad[i];
                param[i] -= lr_t * m[i] / (v[i].sqrt() + self.epsilon);
            }
        }
    }
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn add_row_vector(m: &mut Matrix<f64>, v: &[f64]) {
    let cols = m.cols();
    for row in m.mut_data().chunks_mut(cols) {
        for (x, b) in row.iter_mut().zip(v) {
            *x += b;
        }
    }
}

fn softmax_rows(mut z: Matrix<f64>) -> Matrix<f64> {
    let cols = z.cols();
    for row in z.mut_data().chunks_mut(cols) {
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut sum = 0.0;
        for x in row.iter_mut() {
            *x = (*x - max).exp();
            sum += *x;
        }
        for x in row.iter_mut() {
            *x /= sum;
        }
    }
    z
}

fn column_means(m: &Matrix<f64>) -> Vec<f64> {
    let cols = m.cols();
    let rows = m.rows() as f64;
    let mut sums = vec![0.0; cols];
    for row in m.data().chunks(cols) {
        for (s, x) in sums.iter_mut().zip(row) {
            *s += x;
        }
    }
    sums.into_iter().map(|s| s / rows).collect()
}
