use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("XML error: {0}")]
    Xml(#[from] std::fmt::Error),
    #[error("unrecognized picture format")]
    UnknownPictureFormat,
    #[error("no slide at index {0}")]
    NoSuchSlide(usize),
}

pub type Result<T> = std::result::Result<T, DeckError>;
