/// Errors that can occur when validating controller configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' must be a finite number")]
    NonFinite { field: &'static str },

    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("'{field}' must be greater than zero")]
    ZeroCapacity { field: &'static str },

    #[error("gravity must be negative (got {0})")]
    GravityNotNegative(f32),
}
