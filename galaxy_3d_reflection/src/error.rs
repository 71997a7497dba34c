//! Error types for the Galaxy3D shader reflection
//!
//! This module defines the error types returned by the reflection compactor
//! and by raw reflector backends.

use std::fmt;

/// Result type for Galaxy3D reflection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D reflection errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid caller input (empty bytecode, misaligned length, etc.)
    InvalidInput(String),

    /// The raw reflector could not parse the shader (propagated unchanged)
    ReflectorError(String),

    /// Internal invariant broken between the size-accounting and compaction passes
    InvariantViolation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::ReflectorError(msg) => write!(f, "Reflector error: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build a `ReflectorError` and log it at ERROR severity
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_reflection::engine_err;
///
/// let err = engine_err!("galaxy3d::spirq", "SPIR-V reflection failed: {}", "bad magic");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::ReflectorError(message)
    }};
}

/// Log and return a `ReflectorError` from the enclosing function
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_reflection::engine_bail;
///
/// fn parse(words: &[u32]) -> galaxy_3d_reflection::galaxy3d::Result<()> {
///     if words.is_empty() {
///         engine_bail!("galaxy3d::spirq", "Empty module");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
