use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("mesh file {path:?} contains no usable faces")]
    EmptyMesh { path: PathBuf },
}

pub type RenderResult<T> = Result<T, RenderError>;
