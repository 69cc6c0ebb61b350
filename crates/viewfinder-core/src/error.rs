use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewfinderError {
    #[error("no image loaded")]
    NoImage,

    #[error("view transform is singular (determinant {determinant})")]
    SingularTransform { determinant: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ViewfinderError>;
