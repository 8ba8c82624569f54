use axum::http::StatusCode;
use thiserror::Error;

/// Failures of the checklist state machine and its persistence.
#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("unknown person '{0}'; expected one of: male, female")]
    UnknownPerson(String),
    #[error("unknown exercise '{0}'; expected one of: squats, situps, pushups")]
    UnknownExercise(String),
    #[error("checklist for day {day} is not complete")]
    IncompleteChecklist { day: u32 },
    #[error("day must be at least 1 (got {0})")]
    InvalidDay(u32),
    #[error("cannot advance past day {0}")]
    DayOverflow(u32),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("state update task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ChecklistError> for AppError {
    fn from(err: ChecklistError) -> Self {
        match err {
            ChecklistError::UnknownPerson(_)
            | ChecklistError::UnknownExercise(_)
            | ChecklistError::InvalidDay(_) => Self::bad_request(err.to_string()),
            ChecklistError::IncompleteChecklist { .. } | ChecklistError::DayOverflow(_) => {
                Self::conflict(err.to_string())
            }
            ChecklistError::Storage(inner) => Self::internal(inner),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
