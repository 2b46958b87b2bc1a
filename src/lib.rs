pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod report;
pub mod runner;
pub mod types;

pub use error::{Result, TopologyError};
pub use types::{Chromosome, GeneBounds, Individual, Topology, CHROMOSOME_LEN};
