//! Application error type.
//!
//! Every fallible operation returns `Result<_, AppError>`. The error carries the
//! process exit code so `main` can report and exit without matching on kinds.

/// I/O failures and invalid input (bad size, unreadable or malformed tables).
pub const EXIT_IO: u8 = 2;
/// A written table does not match the regenerated curve.
pub const EXIT_MISMATCH: u8 = 3;
/// Terminal setup or drawing failed.
pub const EXIT_TERMINAL: u8 = 4;

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

    /// Shorthand for an [`EXIT_IO`] error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(EXIT_IO, message)
    }

    /// Shorthand for an [`EXIT_TERMINAL`] error.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(EXIT_TERMINAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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
