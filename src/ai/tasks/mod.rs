// Task templates
//
// One module per tutoring use case. Each builds a GenerationRequest from its
// parameters and knows how to turn the provider's raw reply into its result
// type. Conversational tasks (doubt, classify) degrade gracefully on bad
// model output; structured-content tasks (teaching, quiz) fail loudly.

pub mod classify;
pub mod doubt;
pub mod quiz;
pub mod teaching;

pub use classify::{ChatMode, ClassifyParams};
pub use doubt::{DoubtParams, DoubtResolution};
pub use quiz::{Quiz, QuizParams, QuizQuestion};
pub use teaching::{TeachingContent, TeachingParams, TeachingSection};
