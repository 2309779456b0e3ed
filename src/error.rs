//! Application-level error type.
//!
//! The engine itself never fails for business reasons (see `engine`). Errors
//! only arise at the edges: reading snapshot files, loading a rate table, or
//! writing exports. Each carries the process exit code the binary should use.

use std::path::Path;

use crate::config::ConfigError;

/// Exit code for bad input files, bad rate tables, and I/O failures.
pub const EXIT_INPUT: u8 = 2;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input/output failure tied to a specific file.
    pub fn io(action: &str, path: &Path, err: impl std::fmt::Display) -> Self {
        Self::new(
            EXIT_INPUT,
            format!("Failed to {action} '{}': {err}", path.display()),
        )
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::new(EXIT_INPUT, format!("Pricing config error: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_input_exit_code() {
        let err: AppError = ConfigError::InvalidRoundingStep(0.0).into();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("rounding step"));
    }
}
