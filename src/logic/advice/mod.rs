pub mod conclusions;
pub mod engine;
pub mod fertilizer;
pub mod pest;

pub use conclusions::{build_conclusions, ConclusionInputs};
pub use engine::AdviceEngine;
pub use fertilizer::{build_fertilizer_advice, FertilizerInputs};
pub use pest::{build_pest_advice, PestInputs};

/// One step of an advice heuristic.
///
/// Rules are evaluated in registration order and each contributes at most
/// one line.
pub trait AdviceRule<I>: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Return an advice line if the rule has something to say
    fn evaluate(&self, input: &I) -> Option<String>;
}
