#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Empty image")]
    EmptyImage { which: &'static str },

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}
