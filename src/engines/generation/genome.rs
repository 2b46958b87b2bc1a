//! Topology codec for the fixed-length chromosome
//!
//! A chromosome is always four reals `[n1, n2, n3, n4]`, but the network it
//! describes has between one and four hidden layers. Every position is
//! rounded to an integer; the first non-positive value among positions
//! 1..=3 terminates the layer list.
//!
//! The bounded crossover and mutation operators work gene by gene against a
//! per-position range, so every individual carries all four positions even
//! when only some are expressed. A gene that drifts across zero switches its
//! layer, and the ones after it, off.
//!
//! # Example
//!
//! ```
//! use mlptopo::engines::generation::genome::decode;
//!
//! // -5 terminates the layer count
//! let topology = decode(&[10.4, 20.2, -5.0, 15.0]);
//! assert_eq!(topology.layers(), &[10, 20]);
//! ```

use crate::types::{Chromosome, Topology};

/// Round half to even, so `2.5` gives 2 and `3.5` gives 4.
fn round_gene(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Decode a chromosome into its hidden-layer sizes.
///
/// Position 0 is never checked, so a network always has at least one hidden
/// layer even when that layer's size is not positive.
pub fn decode(chromosome: &Chromosome) -> Topology {
    let rounded = chromosome.map(round_gene);

    let depth = if rounded[1] <= 0 {
        1
    } else if rounded[2] <= 0 {
        2
    } else if rounded[3] <= 0 {
        3
    } else {
        4
    };

    Topology(rounded[..depth].to_vec())
}

/// Display string used when reporting a candidate.
pub fn format_chromosome(chromosome: &Chromosome) -> String {
    format!("hidden_layer_sizes={}", decode(chromosome))
}
