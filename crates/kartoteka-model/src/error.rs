use thiserror::Error;

#[derive(Debug, Error)]
pub enum KartotekaError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("name dictionary is empty; nothing to match against")]
    EmptyDictionary,
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, KartotekaError>;
