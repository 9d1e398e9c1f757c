use thiserror::Error;

/// Errors raised while parsing an ABI interface or packing call data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("malformed abi interface: {0}")]
    InvalidInterface(String),
    #[error("method {0} not found in abi interface")]
    MethodNotFound(String),
    #[error("unsupported abi type: {0}")]
    UnsupportedType(String),
    #[error("argument count mismatch: expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },
    #[error("argument {index} does not match abi type {expected}")]
    TypeMismatch { index: usize, expected: String },
    #[error("argument {index} overflows abi type {expected}")]
    Overflow { index: usize, expected: String },
    #[error("call data selector does not match method {0}")]
    InvalidSelector(String),
    #[error("invalid call data length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        AbiError::InvalidInterface(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("sanity check failed: {0}")]
    SanityCheck(String),
    #[error("negative gas price")]
    NegativeGasPrice,
    #[error("failed to decode action: {0}")]
    Decode(String),
    #[error("abi encoding error")]
    Abi(#[from] AbiError),
}
