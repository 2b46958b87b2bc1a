use super::evolution_engine::ProgressCallback;
use super::logbook::GenerationRecord;

/// Prints the logbook as a table, one row per generation.
pub struct ConsoleProgressCallback;

impl ConsoleProgressCallback {
    pub fn header() -> String {
        "gen\tnevals\tmax     \tavg     ".to_string()
    }

    pub fn row(record: &GenerationRecord) -> String {
        format!(
            "{}\t{}\t{:.6}\t{:.6}",
            record.gen, record.nevals, record.max, record.avg
        )
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        if generation == 0 {
            println!("{}", Self::header());
        }
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord, hof_size: usize) {
        println!("{}", Self::row(record));
        log::debug!(
            "Generation {} complete. Best fitness: {:.4}, Hall of Fame size: {}",
            record.gen,
            record.max,
            hof_size
        );
    }

    fn on_individual_evaluated(&mut self, individual_num: usize, total: usize) {
        if individual_num % 10 == 0 || individual_num == total {
            log::trace!("  Evaluated {}/{} individuals", individual_num, total);
        }
    }
}

/// Collects records in memory; handy when the caller wants to drive its own output.
#[derive(Default)]
pub struct RecordingProgressCallback {
    pub started: Vec<usize>,
    pub completed: Vec<GenerationRecord>,
    pub evaluations: usize,
}

impl ProgressCallback for RecordingProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord, _hof_size: usize) {
        self.completed.push(record.clone());
    }

    fn on_individual_evaluated(&mut self, _individual_num: usize, _total: usize) {
        self.evaluations += 1;
    }
}
