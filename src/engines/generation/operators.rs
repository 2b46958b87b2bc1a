use crate::types::{Chromosome, GeneBounds, Individual, CHROMOSOME_LEN};
use rand::Rng;

/// Genes closer than this are treated as identical by the crossover.
const SBX_MIN_GAP: f64 = 1e-14;

/// Tournament selection: pick best of K random candidates (drawn with replacement)
pub fn tournament_selection<R: Rng>(
    population: &[Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Individual {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].fitness_or_min();

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].fitness_or_min() > best_fitness {
            best_idx = idx;
            best_fitness = population[idx].fitness_or_min();
        }
    }

    population[best_idx].clone()
}

/// Run `count` independent tournaments.
pub fn select_tournament<R: Rng>(
    population: &[Individual],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..count)
        .map(|_| tournament_selection(population, tournament_size, rng))
        .collect()
}

/// Spread factor for one side of the simulated-binary crossover.
fn sbx_beta_q(beta: f64, rand: f64, eta: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    if rand <= 1.0 / alpha {
        (rand * alpha).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 - rand * alpha)).powf(1.0 / (eta + 1.0))
    }
}

/// Bounded simulated-binary crossover, applied in place to both parents.
///
/// Each position is crossed with probability 0.5. `eta` is the crowding
/// factor: large values keep children close to their parents.
pub fn sbx_crossover_bounded<R: Rng>(
    parent1: &mut Chromosome,
    parent2: &mut Chromosome,
    bounds: &[GeneBounds; CHROMOSOME_LEN],
    eta: f64,
    rng: &mut R,
) {
    for (i, gene_bounds) in bounds.iter().enumerate() {
        if rng.gen::<f64>() > 0.5 {
            continue;
        }
        if (parent1[i] - parent2[i]).abs() <= SBX_MIN_GAP {
            continue;
        }

        let x1 = parent1[i].min(parent2[i]);
        let x2 = parent1[i].max(parent2[i]);
        let gap = x2 - x1;
        let rand = rng.gen::<f64>();

        let beta = 1.0 + 2.0 * (x1 - gene_bounds.low) / gap;
        let c1 = 0.5 * (x1 + x2 - sbx_beta_q(beta, rand, eta) * gap);

        let beta = 1.0 + 2.0 * (gene_bounds.high - x2) / gap;
        let c2 = 0.5 * (x1 + x2 + sbx_beta_q(beta, rand, eta) * gap);

        let c1 = gene_bounds.clamp(c1);
        let c2 = gene_bounds.clamp(c2);

        if rng.gen::<f64>() <= 0.5 {
            parent1[i] = c2;
            parent2[i] = c1;
        } else {
            parent1[i] = c1;
            parent2[i] = c2;
        }
    }
}

/// Bounded polynomial mutation: each gene mutates with probability `gene_prob`.
pub fn polynomial_mutation_bounded<R: Rng>(
    chromosome: &mut Chromosome,
    bounds: &[GeneBounds; CHROMOSOME_LEN],
    eta: f64,
    gene_prob: f64,
    rng: &mut R,
) {
    for (gene, gene_bounds) in chromosome.iter_mut().zip(bounds.iter()) {
        if rng.gen::<f64>() > gene_prob {
            continue;
        }

        let width = gene_bounds.width();
        if width <= 0.0 {
            // Degenerate range, only one legal value
            *gene = gene_bounds.low;
            continue;
        }

        let x = *gene;
        let delta_1 = (x - gene_bounds.low) / width;
        let delta_2 = (gene_bounds.high - x) / width;
        let rand = rng.gen::<f64>();
        let mut_pow = 1.0 / (eta + 1.0);

        let delta_q = if rand < 0.5 {
            let xy = 1.0 - delta_1;
            let val = 2.0 * rand + (1.0 - 2.0 * rand) * xy.powf(eta + 1.0);
            val.powf(mut_pow) - 1.0
        } else {
            let xy = 1.0 - delta_2;
            let val = 2.0 * (1.0 - rand) + 2.0 * (rand - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(mut_pow)
        };

        *gene = gene_bounds.clamp(x + delta_q * width);
    }
}

/// Generate random chromosome, each gene uniform within its own bounds
pub fn random_chromosome<R: Rng>(
    bounds: &[GeneBounds; CHROMOSOME_LEN],
    rng: &mut R,
) -> Chromosome {
    bounds.map(|b| {
        if b.width() > 0.0 {
            rng.gen_range(b.low..=b.high)
        } else {
            b.low
        }
    })
}
