use thiserror::Error;

#[derive(Error, Debug)]
pub enum KrishiMitraError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input error: {0}")]
    Input(#[from] dialoguer::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Prediction service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The service answered with a non-success status. The message is
    /// whatever the error body said, shown to the user as-is.
    #[error("{message}")]
    Prediction { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("A prediction is already in progress")]
    Busy,
}

impl KrishiMitraError {
    /// Process exit status for a command that stops on this error.
    ///
    /// An incomplete form is a usage problem (2); everything else is a
    /// failure (1).
    pub fn exit_code(&self) -> i32 {
        match self {
            KrishiMitraError::Validation(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, KrishiMitraError>;
