//! Crate-level error type and `Result` alias for stable, structured error
//! handling. Converts the subsystem errors (decode, render, geolocation) and
//! provides semantic variants for argument validation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] crate::io::geotiff::DecodeError),

    #[error("Render error: {0}")]
    Render(#[from] crate::core::rasterize::RenderError),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] crate::view::geolocate::GeolocationError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
