use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignCodeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid token file {path}: {message}")]
    FormatError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("{command} failed: {message}")]
    ExternalToolError { command: String, message: String },
}

impl DesignCodeError {
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FormatError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::SerializationError(e) => format!("Could not write JSON: {}", e),
            Self::FormatError { path, message } => {
                format!("Token file '{}' is not in the expected shape: {}", path, message)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            Self::InputError { message } => format!("No commit count was given: {}", message),
            Self::ExternalToolError { command, message } => {
                format!("Could not run '{}': {}", command, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that design_tokens/ exists in the repository directory",
            Self::SerializationError(_) | Self::FormatError { .. } => {
                "Restore the token file from git (git checkout -- design_tokens/)"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix design-code.toml or the command-line flags and try again"
            }
            Self::InputError { .. } => "Run the tool again and enter a positive number",
            Self::ExternalToolError { .. } => "Make sure git is installed and on your PATH",
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignCodeError>;
