use std::fmt;

// === EvalError ===

/// Errors produced while parsing or evaluating an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The expression contained no tokens.
    Empty,
    /// A character that is neither a digit, a decimal point, nor an operator.
    UnexpectedChar(char, usize),
    /// A token appeared where an operand or operator was expected.
    UnexpectedToken(String, usize),
    /// The expression ended while an operand was still expected.
    UnexpectedEnd,
    /// A numeric literal could not be parsed.
    InvalidNumber(String),
    /// The result is infinite or NaN (e.g. division by zero).
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty => write!(f, "Empty expression"),
            EvalError::UnexpectedChar(c, pos) => {
                write!(f, "Unexpected character '{}' at position {}", c, pos)
            }
            EvalError::UnexpectedToken(tok, pos) => {
                write!(f, "Unexpected token '{}' at position {}", tok, pos)
            }
            EvalError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            EvalError::InvalidNumber(lit) => write!(f, "Invalid number: {}", lit),
            EvalError::NonFinite => write!(f, "Result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

// === StorageError ===

/// Errors raised by a key-value storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// An I/O error occurred while reading or writing the backing file.
    IoError(String),
    /// The backing data could not be serialized or deserialized.
    SerializationError(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === HistoryError ===

/// Errors related to calculation history persistence.
#[derive(Debug)]
pub enum HistoryError {
    /// Failed to serialize or deserialize the history list.
    SerializationError(String),
    /// The underlying key-value store failed.
    StorageError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::SerializationError(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
            HistoryError::StorageError(msg) => write!(f, "History storage error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::StorageError(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
