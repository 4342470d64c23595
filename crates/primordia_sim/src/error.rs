//! Simulation error types

use std::fmt;

/// Error type for simulation setup
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value is out of range
    InvalidConfig(String),
    /// The stepping thread pool could not be created
    ThreadPool(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig(msg) => write!(f, "Invalid simulation config: {}", msg),
            SimError::ThreadPool(msg) => write!(f, "Failed to build thread pool: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidConfig("react_radius must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid simulation config: react_radius must be positive"
        );

        let err = SimError::ThreadPool("out of threads".to_string());
        assert!(err.to_string().contains("out of threads"));
    }
}
