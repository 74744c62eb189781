use thiserror::Error;

/// Everything that can go wrong before the simulation starts.
///
/// Once a `Coordinator` has been built the simulation itself cannot fail.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{what} must be at least 1, got {got}")]
    InvalidCount { what: &'static str, got: u64 },

    #[error("passenger {index} has {field} floor {floor} outside 1..={n_floors}")]
    FloorOutOfRange {
        index: usize,
        field: &'static str,
        floor: u32,
        n_floors: u32,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
