use thiserror::Error;

/// Why a signature could not be constructed.
///
/// Each variant corresponds to one construction check, in the order they run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Invalid signature: {0}")]
    InvalidOptions(String),

    #[error("Invalid signature command: {0}")]
    InvalidCommand(String),

    #[error("Invalid signature parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid signature parameters: required parameter after an optional parameter")]
    RequiredAfterOptional,

    #[error("Invalid signature parameters: parameter after a variadic parameter")]
    ParameterAfterVariadic,
}

pub type SignatureResult<T> = Result<T, SignatureError>;
