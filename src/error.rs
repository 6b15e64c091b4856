use thiserror::Error;

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const NOT_FOUND: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const UNAVAILABLE: i32 = 3;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn task_not_found(id: u64) -> Self {
        StoreError::NotFound {
            kind: "Task",
            id: id.to_string(),
        }
    }

    pub fn category_not_found(id: &str) -> Self {
        StoreError::NotFound {
            kind: "Category",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::NotFound { .. } => exit_codes::NOT_FOUND,
            StoreError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            StoreError::Unavailable(_) | StoreError::Io(_) | StoreError::Json(_) => {
                exit_codes::UNAVAILABLE
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Exit code for an error surfaced from `app::run`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(store) = err.downcast_ref::<StoreError>() {
        return store.exit_code();
    }
    if err.downcast_ref::<csv::Error>().is_some() || err.downcast_ref::<std::io::Error>().is_some()
    {
        return exit_codes::UNAVAILABLE;
    }
    exit_codes::INVALID_INPUT
}
