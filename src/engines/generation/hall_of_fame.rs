use crate::engines::generation::genome::decode;
use crate::types::{Chromosome, Individual, Topology};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Best-ever individual kept across generations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EliteIndividual {
    pub chromosome: Chromosome,
    pub topology: Topology,
    pub fitness: f64,
}

impl EliteIndividual {
    pub fn to_individual(&self) -> Individual {
        Individual {
            chromosome: self.chromosome,
            fitness: Some(self.fitness),
        }
    }
}

pub struct HallOfFame {
    members: Vec<EliteIndividual>,
    max_size: usize,
    seen_signatures: HashSet<[u64; 4]>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            members: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Offer every evaluated individual of a population
    pub fn update(&mut self, population: &[Individual]) {
        for individual in population {
            if let Some(fitness) = individual.fitness {
                self.try_add(individual.chromosome, fitness);
            }
        }
    }

    /// Attempt to add a chromosome to the Hall of Fame
    pub fn try_add(&mut self, chromosome: Chromosome, fitness: f64) -> bool {
        if self.max_size == 0 {
            return false;
        }

        let full = self.members.len() >= self.max_size;
        if full {
            let worst = self.members.last().map(|m| m.fitness).unwrap_or(f64::NEG_INFINITY);
            if fitness <= worst {
                return false;
            }
        }

        // Deduplication check
        let signature = get_chromosome_signature(&chromosome);
        if self.seen_signatures.contains(&signature) {
            return false;
        }

        if full {
            if let Some(removed) = self.members.pop() {
                self.seen_signatures.remove(&get_chromosome_signature(&removed.chromosome));
            }
        }

        // Newcomers go ahead of members with equal fitness
        let position = self.members.partition_point(|m| m.fitness > fitness);
        self.members.insert(
            position,
            EliteIndividual {
                chromosome,
                topology: decode(&chromosome),
                fitness,
            },
        );
        self.seen_signatures.insert(signature);

        true
    }

    /// Get all elite individuals, best first
    pub fn get_all(&self) -> &[EliteIndividual] {
        &self.members
    }

    pub fn best(&self) -> Option<&EliteIndividual> {
        self.members.first()
    }

    /// Members as population entries, for re-injection (elitism)
    pub fn individuals(&self) -> Vec<Individual> {
        self.members.iter().map(EliteIndividual::to_individual).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Exact bit pattern of the genes, used for deduplication
pub fn get_chromosome_signature(chromosome: &Chromosome) -> [u64; 4] {
    chromosome.map(f64::to_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_best_sorted_and_bounded() {
        let mut hof = HallOfFame::new(3);
        hof.try_add([5.0, 1.0, 1.0, 1.0], 0.5);
        hof.try_add([6.0, 1.0, 1.0, 1.0], 0.9);
        hof.try_add([7.0, 1.0, 1.0, 1.0], 0.7);
        hof.try_add([8.0, 1.0, 1.0, 1.0], 0.8);

        let fitnesses: Vec<f64> = hof.get_all().iter().map(|m| m.fitness).collect();
        assert_eq!(fitnesses, vec![0.9, 0.8, 0.7]);
        assert_eq!(hof.best().map(|m| m.chromosome[0]), Some(6.0));
    }

    #[test]
    fn test_rejects_duplicates() {
        let mut hof = HallOfFame::new(3);
        assert!(hof.try_add([5.0, 1.0, 1.0, 1.0], 0.5));
        assert!(!hof.try_add([5.0, 1.0, 1.0, 1.0], 0.5));
        assert_eq!(hof.len(), 1);
    }

    #[test]
    fn test_rejects_worse_when_full() {
        let mut hof = HallOfFame::new(2);
        hof.try_add([5.0, 1.0, 1.0, 1.0], 0.5);
        hof.try_add([6.0, 1.0, 1.0, 1.0], 0.6);
        assert!(!hof.try_add([7.0, 1.0, 1.0, 1.0], 0.4));
        assert!(!hof.try_add([8.0, 1.0, 1.0, 1.0], 0.5));
        assert_eq!(hof.len(), 2);
    }

    #[test]
    fn test_evicted_member_can_return() {
        let mut hof = HallOfFame::new(1);
        hof.try_add([5.0, 1.0, 1.0, 1.0], 0.5);
        hof.try_add([6.0, 1.0, 1.0, 1.0], 0.6);
        assert!(hof.try_add([5.0, 1.0, 1.0, 1.0], 0.7));
        assert_eq!(hof.best().map(|m| m.fitness), Some(0.7));
    }

    #[test]
    fn test_update_skips_unevaluated() {
        let mut hof = HallOfFame::new(3);
        hof.update(&[
            Individual::new([5.0, 1.0, 1.0, 1.0]),
            Individual {
                chromosome: [9.6, -1.0, 0.0, 0.0],
                fitness: Some(0.3),
            },
        ]);
        assert_eq!(hof.len(), 1);
        assert_eq!(hof.get_all()[0].topology, Topology(vec![10]));
    }

    #[test]
    fn test_zero_size_keeps_nothing() {
        let mut hof = HallOfFame::new(0);
        assert!(!hof.try_add([5.0, 1.0, 1.0, 1.0], 1.0));
        assert!(hof.is_empty());
    }
}
