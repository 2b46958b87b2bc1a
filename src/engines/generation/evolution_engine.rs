use crate::config::EvolutionConfig;
use crate::config::ConfigSection;
use crate::engines::evaluation::FitnessFunction;
use crate::engines::generation::{
    hall_of_fame::{EliteIndividual, HallOfFame},
    logbook::{GenerationRecord, Logbook},
    operators::{polynomial_mutation_bounded, random_chromosome, sbx_crossover_bounded, select_tournament},
};
use crate::error::Result;
use crate::types::{Chromosome, Individual};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Everything a finished run produces
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    pub population: Vec<Individual>,
    pub logbook: Logbook,
    /// Best individuals ever seen, best first
    pub hall_of_fame: Vec<EliteIndividual>,
}

impl EvolutionOutcome {
    pub fn best(&self) -> Option<&EliteIndividual> {
        self.hall_of_fame.first()
    }

    /// Best hall-of-fame member, or the fittest of the final population when
    /// the hall of fame is disabled
    pub fn best_overall(&self) -> Option<(Chromosome, f64)> {
        if let Some(best) = self.best() {
            return Some((best.chromosome, best.fitness));
        }

        self.population
            .iter()
            .filter_map(|ind| ind.fitness.map(|f| (ind.chromosome, f)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

/// Elitist generational GA over fixed-length real chromosomes.
///
/// Each generation replaces the population with tournament-selected,
/// crossed and mutated offspring, plus the hall-of-fame members, so the
/// best individuals found so far are never lost.
pub struct EvolutionEngine<F: FitnessFunction> {
    config: EvolutionConfig,
    fitness: F,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, record: &GenerationRecord, hall_of_fame_size: usize);
    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize);
}

impl<F: FitnessFunction> EvolutionEngine<F> {
    pub fn new(config: EvolutionConfig, fitness: F) -> Result<Self> {
        config.validate()?;

        let rng = StdRng::seed_from_u64(config.seed);
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            fitness,
            hall_of_fame,
            rng,
        })
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<EvolutionOutcome> {
        log::info!(
            "Starting search: population {}, {} generations, seed {}",
            self.config.population_size,
            self.config.generations,
            self.config.seed
        );

        let mut logbook = Logbook::new();

        // Generation 0: random population, everything evaluated
        callback.on_generation_start(0);
        let mut population = self.initialize_population();
        let nevals = self.evaluate_invalid(&mut population, callback)?;
        self.hall_of_fame.update(&population);
        self.record(&mut logbook, 0, nevals, &population, callback)?;

        for generation in 1..=self.config.generations {
            callback.on_generation_start(generation);

            // Room is left for the hall of fame, which re-enters unchanged
            let offspring_count = self.config.population_size - self.hall_of_fame.len();
            let selected = select_tournament(
                &population,
                offspring_count,
                self.config.tournament_size,
                &mut self.rng,
            );
            let mut offspring = self.vary(selected);

            let nevals = self.evaluate_invalid(&mut offspring, callback)?;

            offspring.extend(self.hall_of_fame.individuals());
            self.hall_of_fame.update(&offspring);
            population = offspring;

            self.record(&mut logbook, generation, nevals, &population, callback)?;
        }

        if let Some(best) = self.hall_of_fame.best() {
            log::info!(
                "Search finished: best {} with fitness {:.4}",
                best.topology,
                best.fitness
            );
        }

        Ok(EvolutionOutcome {
            population,
            logbook,
            hall_of_fame: self.hall_of_fame.get_all().to_vec(),
        })
    }

    fn initialize_population(&mut self) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| Individual::new(random_chromosome(&self.config.bounds, &mut self.rng)))
            .collect()
    }

    /// Crossover on consecutive pairs, then mutation; touched individuals lose their fitness.
    fn vary(&mut self, mut offspring: Vec<Individual>) -> Vec<Individual> {
        for i in (1..offspring.len()).step_by(2) {
            if self.rng.gen::<f64>() < self.config.crossover_prob {
                let (left, right) = offspring.split_at_mut(i);
                let (first, second) = (&mut left[i - 1], &mut right[0]);
                sbx_crossover_bounded(
                    &mut first.chromosome,
                    &mut second.chromosome,
                    &self.config.bounds,
                    self.config.crowding_factor,
                    &mut self.rng,
                );
                first.invalidate();
                second.invalidate();
            }
        }

        let gene_prob = self.config.gene_mutation_prob();
        for individual in offspring.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_prob {
                polynomial_mutation_bounded(
                    &mut individual.chromosome,
                    &self.config.bounds,
                    self.config.crowding_factor,
                    gene_prob,
                    &mut self.rng,
                );
                individual.invalidate();
            }
        }

        offspring
    }

    /// Evaluate individuals without a fitness; returns how many were evaluated.
    fn evaluate_invalid<C: ProgressCallback>(
        &self,
        population: &mut [Individual],
        callback: &mut C,
    ) -> Result<usize> {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.is_evaluated())
            .map(|(i, _)| i)
            .collect();
        let chromosomes: Vec<Chromosome> = pending.iter().map(|&i| population[i].chromosome).collect();
        let total = chromosomes.len();

        let scores: Vec<f64> = if self.config.parallel_evaluation {
            let scores = chromosomes
                .par_iter()
                .map(|c| self.fitness.evaluate(c))
                .collect::<Result<Vec<f64>>>()?;
            for n in 1..=total {
                callback.on_individual_evaluated(n, total);
            }
            scores
        } else {
            let mut scores = Vec::with_capacity(total);
            for (n, chromosome) in chromosomes.iter().enumerate() {
                scores.push(self.fitness.evaluate(chromosome)?);
                callback.on_individual_evaluated(n + 1, total);
            }
            scores
        };

        for (&i, score) in pending.iter().zip(scores) {
            population[i].fitness = Some(score);
        }

        Ok(total)
    }

    fn record<C: ProgressCallback>(
        &self,
        logbook: &mut Logbook,
        generation: usize,
        nevals: usize,
        population: &[Individual],
        callback: &mut C,
    ) -> Result<()> {
        let record = GenerationRecord::compile(generation, nevals, population)?;
        callback.on_generation_complete(&record, self.hall_of_fame.len());
        logbook.record(record);
        Ok(())
    }
}
