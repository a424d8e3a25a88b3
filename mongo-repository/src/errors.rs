use backtrace::Backtrace;
use mongodb::bson;
use mongodb::error::{ErrorKind as DriverErrorKind, WriteFailure};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Server error code reported when a write violates a unique index.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Error kinds for repository operations.
///
/// Failures reported by the MongoDB driver are never reclassified: they all
/// carry [`ErrorKind::DriverError`] and keep the original driver error, which is
/// reachable through [`RepositoryError::driver_error`] and `source()`.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::errors::{ErrorKind, RepositoryError, RepositoryResult};
///
/// fn example() -> RepositoryResult<()> {
///     Err(RepositoryError::new("Database name is required", ErrorKind::InvalidConfiguration))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Error raised by the MongoDB driver (connectivity, constraint violation, bad filter, ...)
    DriverError,
    /// Error mapping an entity to or from BSON
    ObjectMappingError,
    /// The provided document id is invalid
    InvalidId,
    /// The repository configuration is incomplete
    InvalidConfiguration,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DriverError => write!(f, "Driver error"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidConfiguration => write!(f, "Invalid configuration"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Repository error type.
///
/// `RepositoryError` carries a message, an [`ErrorKind`], an optional cause and a
/// backtrace captured at construction. Errors converted from the driver also keep
/// the untouched `mongodb::error::Error`.
///
/// # Examples
///
/// ```rust,ignore
/// use mongo_repository::errors::{RepositoryError, ErrorKind};
///
/// let cause = RepositoryError::new("bad hex", ErrorKind::InvalidId);
/// let err = RepositoryError::new_with_cause("Cannot load document", ErrorKind::InvalidOperation, cause);
/// ```
#[derive(Clone)]
pub struct RepositoryError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RepositoryError>>,
    driver_error: Option<mongodb::error::Error>,
    backtrace: Arc<Backtrace>,
}

impl RepositoryError {
    /// Creates a new `RepositoryError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RepositoryError {
            message: message.to_string(),
            error_kind,
            cause: None,
            driver_error: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `RepositoryError` chained to a cause error.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RepositoryError) -> Self {
        RepositoryError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            driver_error: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&RepositoryError> {
        self.cause.as_deref()
    }

    /// Returns the driver error this error was created from, if any.
    pub fn driver_error(&self) -> Option<&mongodb::error::Error> {
        self.driver_error.as_ref()
    }

    /// Returns `true` if the wrapped driver error reports a duplicate key,
    /// i.e. a write rejected by a unique index (including `_id`).
    pub fn is_duplicate_key(&self) -> bool {
        let Some(err) = &self.driver_error else {
            return false;
        };

        match err.kind.as_ref() {
            DriverErrorKind::Write(WriteFailure::WriteError(write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            DriverErrorKind::InsertMany(insert_error) => insert_error
                .write_errors
                .as_ref()
                .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
            DriverErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        }
    }
}

impl Display for RepositoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RepositoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Some(driver_error) = &self.driver_error {
            return Some(driver_error);
        }
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        RepositoryError {
            message: err.to_string(),
            error_kind: ErrorKind::DriverError,
            cause: None,
            driver_error: Some(err),
            backtrace: Arc::new(Backtrace::new()),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::new(
            &format!("BSON serialization error: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::new(
            &format!("BSON deserialization error: {}", err),
            ErrorKind::ObjectMappingError,
        )
    }
}

impl From<bson::oid::Error> for RepositoryError {
    fn from(err: bson::oid::Error) -> Self {
        RepositoryError::new(&format!("Invalid document id: {}", err), ErrorKind::InvalidId)
    }
}
