use crate::config::AppConfig;
use crate::data::Dataset;
use crate::engines::generation::{format_chromosome, EliteIndividual, Logbook};
use crate::error::Result;
use crate::types::Chromosome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_samples: usize,
    pub n_features: usize,
    pub class_names: Vec<String>,
}

impl From<&Dataset> for DatasetSummary {
    fn from(dataset: &Dataset) -> Self {
        Self {
            n_samples: dataset.n_samples(),
            n_features: dataset.n_features(),
            class_names: dataset.class_names().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HallOfFameEntry {
    pub rank: usize,
    pub chromosome: Chromosome,
    pub topology: String,
    pub accuracy: f64,
    /// Percentage of the summed hall-of-fame accuracy
    pub share_pct: f64,
}

/// Each value as a percentage of the total. A non-positive total yields zeros.
pub fn fitness_shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();

    if total <= 0.0 {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| v / total * 100.0).collect()
}

/// Closing console line naming the winning chromosome
pub fn best_solution_line(chromosome: &Chromosome, accuracy: f64) -> String {
    format!(
        "- Best solution is: {} , accuracy = {}",
        format_chromosome(chromosome),
        accuracy
    )
}

/// Hall-of-fame members with their share of the total fitness, best first
pub fn hall_of_fame_entries(members: &[EliteIndividual]) -> Vec<HallOfFameEntry> {
    let fitnesses: Vec<f64> = members.iter().map(|m| m.fitness).collect();

    members
        .iter()
        .zip(fitness_shares(&fitnesses))
        .enumerate()
        .map(|(i, (member, share_pct))| HallOfFameEntry {
            rank: i + 1,
            chromosome: member.chromosome,
            topology: member.topology.to_string(),
            accuracy: member.fitness,
            share_pct,
        })
        .collect()
}

/// Machine-readable record of one search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: AppConfig,
    pub dataset: DatasetSummary,
    pub logbook: Logbook,
    pub hall_of_fame: Vec<HallOfFameEntry>,
}

impl RunReport {
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        log::info!("Run report written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Topology;

    #[test]
    fn test_entries_carry_rank_and_share() {
        let members = vec![
            EliteIndividual {
                chromosome: [10.0, -1.0, 0.0, 0.0],
                topology: Topology(vec![10]),
                fitness: 0.75,
            },
            EliteIndividual {
                chromosome: [12.0, 3.0, -4.0, 0.0],
                topology: Topology(vec![12, 3]),
                fitness: 0.25,
            },
        ];

        let entries = hall_of_fame_entries(&members);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].topology, "(10,)");
        assert!((entries[0].share_pct - 75.0).abs() < 1e-9);
        assert_eq!(entries[1].topology, "(12, 3)");
    }

    #[test]
    fn test_fitness_shares() {
        let shares = fitness_shares(&[8.0, 12.0, 27.0, 4.0, 45.0, 17.0]);
        let rounded: Vec<String> = shares.iter().map(|s| format!("{:.2}", s)).collect();
        assert_eq!(rounded, vec!["7.08", "10.62", "23.89", "3.54", "39.82", "15.04"]);
        assert_eq!(fitness_shares(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_best_solution_line() {
        assert_eq!(
            best_solution_line(&[10.4, 20.2, -5.0, 15.0], 0.96),
            "- Best solution is: hidden_layer_sizes=(10, 20) , accuracy = 0.96"
        );
        assert_eq!(
            best_solution_line(&[12.0, 0.0, 3.0, 3.0], 1.0),
            "- Best solution is: hidden_layer_sizes=(12,) , accuracy = 1"
        );
    }
}
