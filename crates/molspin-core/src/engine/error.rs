use super::config::ConfigError;
use crate::core::models::error::MoleculeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to reserve storage for a batch of {requested} molecules")]
    BatchAllocation { requested: usize },

    #[error("Molecule operation failed: {source}")]
    Molecule {
        #[from]
        source: MoleculeError,
    },
}
