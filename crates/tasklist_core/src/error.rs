use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Input the user typed could not be understood.
    InvalidInput(String),
    /// Stored or configured content is malformed.
    InvalidData(String),
    /// The storage backend failed to read or write.
    Io(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::InvalidData(message) | Self::Io(message) => {
                message
            }
        }
    }

    /// Storage failures end an interactive session; everything else is reported and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_data(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_joins_code_and_message() {
        let err = AppError::io("disk full");
        assert_eq!(err.to_string(), "io_error - disk full");
        assert!(err.is_fatal());
    }

    #[test]
    fn json_errors_become_invalid_data() {
        let err: AppError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert_eq!(err.code(), "invalid_data");
        assert!(!err.is_fatal());
    }
}
