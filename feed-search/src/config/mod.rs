//! Configuration and dependency wiring for feed search.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::SearchSettings;
