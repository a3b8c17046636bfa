use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid {param} filter")]
    Invalid { param: &'static str },
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid recipe JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Expected a recipe object or an array of recipe objects")]
    UnexpectedShape,
}
