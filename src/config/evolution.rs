use super::traits::{check_probability, invalid, ConfigSection};
use crate::error::TopologyError;
use crate::types::{GeneBounds, CHROMOSOME_LEN};
use serde::{Deserialize, Serialize};

/// Default per-position ranges: `[layer_1, layer_2, layer_3, layer_4]`.
///
/// The first layer is always expressed; the lower bounds of the others reach
/// below zero so the search can switch layers off.
pub const DEFAULT_BOUNDS: [GeneBounds; CHROMOSOME_LEN] = [
    GeneBounds::new(5.0, 15.0),
    GeneBounds::new(-5.0, 10.0),
    GeneBounds::new(-10.0, 10.0),
    GeneBounds::new(-20.0, 10.0),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub bounds: [GeneBounds; CHROMOSOME_LEN],
    pub population_size: usize,
    pub generations: usize,
    pub crossover_prob: f64,
    pub mutation_prob: f64,
    pub tournament_size: usize,
    pub hall_of_fame_size: usize,
    /// Sharpness of the SBX crossover and polynomial mutation
    pub crowding_factor: f64,
    pub seed: u64,
    pub parallel_evaluation: bool,
}

impl EvolutionConfig {
    /// Chance that polynomial mutation touches any single gene
    pub fn gene_mutation_prob(&self) -> f64 {
        1.0 / CHROMOSOME_LEN as f64
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_BOUNDS,
            population_size: 20,
            generations: 10,
            crossover_prob: 0.9,
            mutation_prob: 0.5,
            tournament_size: 2,
            hall_of_fame_size: 3,
            crowding_factor: 10.0,
            seed: 42,
            parallel_evaluation: false,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), TopologyError> {
        if self.population_size < 2 {
            return Err(invalid::<Self>("population_size must be at least 2"));
        }
        if self.hall_of_fame_size >= self.population_size {
            return Err(invalid::<Self>(format!(
                "hall_of_fame_size ({}) must be smaller than population_size ({})",
                self.hall_of_fame_size, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(invalid::<Self>("tournament_size must be at least 1"));
        }
        check_probability::<Self>("crossover_prob", self.crossover_prob)?;
        check_probability::<Self>("mutation_prob", self.mutation_prob)?;
        if !(self.crowding_factor >= 0.0) {
            return Err(invalid::<Self>("crowding_factor must be non-negative"));
        }
        for (i, b) in self.bounds.iter().enumerate() {
            if !b.low.is_finite() || !b.high.is_finite() || b.low > b.high {
                return Err(invalid::<Self>(format!(
                    "bounds[{}] must be finite with low <= high, got [{}, {}]",
                    i, b.low, b.high
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let config = EvolutionConfig {
            mutation_prob: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut config = EvolutionConfig::default();
        config.bounds[2] = GeneBounds::new(3.0, -3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_hall_of_fame() {
        let config = EvolutionConfig {
            population_size: 4,
            hall_of_fame_size: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
