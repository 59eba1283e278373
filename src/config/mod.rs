// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::load_config;
pub use settings::{AppEnv, Config, LlamaConfig, MistralConfig};
