use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No eligible participants remaining")]
    NoEligibleParticipants,

    #[error("No prizes remaining")]
    NoPrizesRemaining,

    #[error("A draw session is already in progress")]
    DrawInProgress,

    #[error("Persistence error: {0}")]
    PersistenceError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// 供展示层做用户提示与弹窗分类的稳定错误码
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NoEligibleParticipants => "NO_ELIGIBLE_PARTICIPANTS",
            AppError::NoPrizesRemaining => "NO_PRIZES_REMAINING",
            AppError::DrawInProgress => "DRAW_IN_PROGRESS",
            AppError::PersistenceError(_) => "PERSISTENCE_ERROR",
            AppError::SerdeJsonError(_) => "PERSISTENCE_ERROR",
            AppError::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}
