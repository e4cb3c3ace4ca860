//! Error types and result alias for the crate.
//!
//! [`enum@crate::error::Error`] covers problems the caller has to fix before a
//! scatter can run: invalid configuration, missing inputs, and an empty outcome.
//! Failures at individual grid nodes never surface here; the sampler skips them
//! and counts them in [`crate::sampling::SampleStats`].
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("at least one density range is required")]
    EmptyRanges,

    #[error("invalid density range #{index}: {reason}")]
    InvalidRange { index: usize, reason: String },

    #[error("polygon source contains no polygons")]
    NoPolygons,

    #[error("raster '{name}' has no pixels")]
    EmptyRaster { name: String },

    #[error("no coordinate transform from '{from}' to '{to}' configured")]
    MissingTransform { from: String, to: String },

    #[error("no points were generated; check that the polygon and raster overlap")]
    NoPointsGenerated,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
