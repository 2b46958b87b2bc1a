use crate::error::{Result, TopologyError};
use crate::types::Individual;
use serde::{Deserialize, Serialize};

/// Fitness statistics of one generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub gen: usize,
    pub nevals: usize,
    pub max: f64,
    pub avg: f64,
    pub min: f64,
    pub std: f64,
}

impl GenerationRecord {
    /// Compile statistics over a fully evaluated population.
    pub fn compile(gen: usize, nevals: usize, population: &[Individual]) -> Result<Self> {
        let fitnesses = population
            .iter()
            .map(|ind| match ind.fitness {
                Some(f) if f.is_finite() => Ok(f),
                Some(f) => Err(TopologyError::Generation(format!(
                    "non-finite fitness {} in generation {}",
                    f, gen
                ))),
                None => Err(TopologyError::Generation(format!(
                    "unevaluated individual in generation {}",
                    gen
                ))),
            })
            .collect::<Result<Vec<f64>>>()?;

        if fitnesses.is_empty() {
            return Err(TopologyError::Generation(format!(
                "empty population in generation {}",
                gen
            )));
        }

        let n = fitnesses.len() as f64;
        let avg = fitnesses.iter().sum::<f64>() / n;
        let variance = fitnesses.iter().map(|f| (f - avg).powi(2)).sum::<f64>() / n;

        Ok(Self {
            gen,
            nevals,
            max: fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            avg,
            min: fitnesses.iter().cloned().fold(f64::INFINITY, f64::min),
            std: variance.sqrt(),
        })
    }
}

/// Per-generation statistics of a run, in generation order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn max_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.max).collect()
    }

    pub fn avg_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.avg).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(fitness: f64) -> Individual {
        Individual {
            chromosome: [5.0, 0.0, 0.0, 0.0],
            fitness: Some(fitness),
        }
    }

    #[test]
    fn test_compile_statistics() {
        let population = vec![evaluated(0.2), evaluated(0.4), evaluated(0.6)];
        let record = GenerationRecord::compile(3, 2, &population).unwrap();

        assert_eq!(record.gen, 3);
        assert_eq!(record.nevals, 2);
        assert!((record.max - 0.6).abs() < 1e-12);
        assert!((record.min - 0.2).abs() < 1e-12);
        assert!((record.avg - 0.4).abs() < 1e-12);
        assert!((record.std - (0.08f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_compile_rejects_unevaluated() {
        let population = vec![evaluated(0.2), Individual::new([5.0, 0.0, 0.0, 0.0])];
        assert!(GenerationRecord::compile(0, 1, &population).is_err());
    }

    #[test]
    fn test_compile_rejects_nan() {
        let population = vec![evaluated(f64::NAN)];
        assert!(GenerationRecord::compile(0, 1, &population).is_err());
    }
}
