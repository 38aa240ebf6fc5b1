use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Input problems the user must correct; reported before any
    // randomization runs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // The attempt budget ran out without finding a valid assignment.
    #[error(
        "No valid team assignment found after {attempts} attempts. \
         Try relaxing forbidden-pair rules or disabling repeat-avoidance."
    )]
    ConstraintsExhausted { attempts: u32 },

    // Dealer state from which no valid pair can ever be dealt.
    #[error("No valid pairing is possible with the current groups and forbidden pairs: {0}")]
    Infeasible(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// Create an invalid-input error with context
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a constraint-exhaustion error for the given attempt budget
    pub fn constraints_exhausted(attempts: u32) -> Self {
        Self::ConstraintsExhausted { attempts }
    }

    /// Create an infeasible-state error with context
    pub fn infeasible(msg: impl Into<String>) -> Self {
        Self::Infeasible(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a server error with context
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Check if the error is something the user fixes by editing their
    /// input rather than their configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }

    /// Check if the error is a constraint problem (exhaustion or an
    /// infeasible dealer state) rather than a technical failure.
    pub fn is_constraint_error(&self) -> bool {
        matches!(
            self,
            AppError::ConstraintsExhausted { .. } | AppError::Infeasible(_)
        )
    }
}
