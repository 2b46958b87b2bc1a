use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of positions in a chromosome, i.e. the maximum number of hidden layers.
pub const CHROMOSOME_LEN: usize = 4;

/// Fixed-length encoding of a hidden-layer topology.
pub type Chromosome = [f64; CHROMOSOME_LEN];

/// Inclusive sampling/variation range for one chromosome position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneBounds {
    pub low: f64,
    pub high: f64,
}

impl GeneBounds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.low).min(self.high)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Hidden-layer sizes, one entry per hidden layer.
///
/// Sizes are signed: the first layer is taken from the chromosome as-is and
/// may round to zero or below. Such a topology is rejected when a classifier
/// is built from it, not when it is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology(pub Vec<i64>);

impl Topology {
    pub fn layers(&self) -> &[i64] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// Renders like a tuple literal: `(10,)`, `(10, 20)`.
impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "({},)", single),
            layers => {
                let joined: Vec<String> = layers.iter().map(|l| l.to_string()).collect();
                write!(f, "({})", joined.join(", "))
            }
        }
    }
}

/// A chromosome together with its fitness, if it has been evaluated since
/// the last time it was varied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Fitness for ranking purposes; unevaluated individuals rank last.
    pub fn fitness_or_min(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}
