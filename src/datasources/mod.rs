pub mod prediction;

pub use prediction::PredictionClient;
