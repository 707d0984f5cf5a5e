use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The map file is missing, truncated or malformed
    #[error("Map error: {0}")]
    Map(String),

    /// Settings are missing or out of range
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generated instance breaks a placement invariant
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// No connected group of free nodes could be placed
    #[error(
        "Insufficient connectivity: no connected group of {group_size} free nodes found after {attempts} attempts"
    )]
    InsufficientConnectivity { group_size: usize, attempts: u64 },

    #[error("Source and sink are the same vertex ({0})")]
    SourceIsSink(usize),

    #[error("Vertex {vertex} is out of range for a network of {num_vertices} vertices")]
    VertexOutOfRange { vertex: usize, num_vertices: usize },
}
