use thiserror::Error;

/// Errors that can occur while loading a catalog or driving the controller
#[derive(Error, Debug)]
pub enum FinderError {
    /// Failed to read a catalog file
    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog file is not valid JSON or has the wrong shape
    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Catalog parsed but breaks one of the record invariants
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// No recipe with the requested id exists in the catalog
    #[error("Unknown recipe id: {0}")]
    UnknownRecipe(String),

    /// The controller needs an async runtime to schedule work
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, FinderError>;
