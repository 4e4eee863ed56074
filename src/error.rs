use thiserror::Error;

/// Top-level error type for the curve sampling core.
#[derive(Debug, Error)]
pub enum LociError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors related to catalog lookup and construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("curve not found: {0}")]
    NotFound(String),

    #[error("duplicate curve id: {0}")]
    DuplicateId(String),
}

/// Errors raised while sampling a curve.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    #[error("non-finite point ({x}, {y}) at parameter {parameter}")]
    Evaluation { parameter: f64, x: f64, y: f64 },

    #[error("invalid sampling parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised while serializing a projected path.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`LociError`].
pub type Result<T> = std::result::Result<T, LociError>;
