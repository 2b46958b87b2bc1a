pub mod genome;
pub mod operators;
pub mod hall_of_fame;
pub mod logbook;
pub mod evolution_engine;
pub mod progress;

pub use genome::{decode, format_chromosome};
pub use hall_of_fame::{HallOfFame, EliteIndividual};
pub use logbook::{GenerationRecord, Logbook};
pub use evolution_engine::{EvolutionEngine, EvolutionOutcome, ProgressCallback};
pub use progress::{ConsoleProgressCallback, RecordingProgressCallback};
