//! Exit codes for the mock server CLI.
//!
//! Distinct codes per failure class so scripts and CI systems can tell
//! configuration problems apart from schema or resolution failures.

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no errors
    Success = 0,
    /// A document failed validation or a field could not be resolved
    ResolutionError = 1,
    /// Configuration error (missing or invalid config file)
    ConfigError = 2,
    /// Schema load error (no files matched, invalid SDL)
    SchemaError = 3,
    /// I/O error (file read/write failure)
    IoError = 4,
    /// Parse error (invalid GraphQL syntax in a document)
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ResolutionError => write!(f, "resolution error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ExitCode::Success,
            ExitCode::ResolutionError,
            ExitCode::ConfigError,
            ExitCode::SchemaError,
            ExitCode::IoError,
            ExitCode::ParseError,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn test_success_is_zero() {
        assert_eq!(ExitCode::Success.code(), 0);
    }
}
