#[derive(Debug, thiserror::Error)]
pub enum ConsultationError {
    #[error("consultation {0} not found")]
    NotFound(i64),
    #[error("failed to read consultation store: {0}")]
    StoreRead(std::io::Error),
    #[error("failed to write consultation store: {0}")]
    StoreWrite(std::io::Error),
    #[error("failed to replace consultation store: {0}")]
    StoreReplace(std::io::Error),
    #[error("failed to serialize consultations: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize consultations: {0}")]
    Deserialization(serde_json::Error),
    #[error("consultation store lock poisoned by an earlier panic")]
    LockPoisoned,
}

pub type ConsultationResult<T> = std::result::Result<T, ConsultationError>;
