use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by the record store and the schema installer.
///
/// Storage failures are never absorbed inside the store; they reach
/// whoever called the operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no table configured for this store")]
    NoTable,

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("unknown column `{column}` for table `{table}`")]
    UnknownColumn { table: &'static str, column: String },

    #[error("unsupported operator `{0}`")]
    UnknownOperator(String),

    #[error("no attributes to insert")]
    EmptyAttributes,

    #[error("inserted row {0} could not be read back")]
    MissingInsert(i64),

    #[error("failed to open database at {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: diesel::ConnectionError,
    },

    #[error("failed to run migrations: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Query(#[from] DieselError),
}

impl StoreError {
    /// True when the statement violated a UNIQUE constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        self.constraint_failed(DatabaseErrorKind::UniqueViolation, "UNIQUE constraint failed")
    }

    /// True when the statement violated a FOREIGN KEY constraint.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        self.constraint_failed(
            DatabaseErrorKind::ForeignKeyViolation,
            "FOREIGN KEY constraint failed",
        )
    }

    fn constraint_failed(&self, kind: DatabaseErrorKind, message: &str) -> bool {
        match self {
            Self::Query(DieselError::DatabaseError(actual, info)) => {
                std::mem::discriminant(actual) == std::mem::discriminant(&kind)
                    || info.message().contains(message)
            }
            _ => false,
        }
    }
}

/// Failure to turn a registry name into a runnable handler.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("`{0}` is not registered in the container")]
    NotFound(String),

    #[error("`{0}` is registered but is not a command handler")]
    NotAHandler(String),

    #[error("failed to construct `{name}`: {source}")]
    Construction {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// Failure of a full dispatch: either resolution or the handler itself.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("command `{command}` failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: StoreError,
    },
}

impl DispatchError {
    /// True when the command name is simply not registered.
    #[must_use]
    pub fn is_unknown_command(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::NotFound(_)))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("telegram error: {0}")]
    Telegram(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "logging.format",
            reason: "expected pretty or json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for logging.format: expected pretty or json"
        );
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::UnknownColumn {
            table: "offenders",
            column: "nme".to_string(),
        };
        assert_eq!(err.to_string(), "unknown column `nme` for table `offenders`");
        assert_eq!(StoreError::NoTable.to_string(), "no table configured for this store");
    }

    #[test]
    fn not_found_is_unknown_command() {
        let err = DispatchError::from(ResolveError::NotFound("Nope".to_string()));
        assert!(err.is_unknown_command());

        let err = DispatchError::from(ResolveError::NotAHandler("Bot".to_string()));
        assert!(!err.is_unknown_command());
    }

    #[test]
    fn plain_errors_are_not_constraint_violations() {
        assert!(!StoreError::EmptyAttributes.is_unique_violation());
        assert!(!StoreError::EmptyAttributes.is_foreign_key_violation());
        assert!(!StoreError::Query(DieselError::NotFound).is_unique_violation());
    }
}
