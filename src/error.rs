//! Error types and the backend error classifier.
//!
//! Backend failures are always caught at the point of execution, mapped to a
//! small stable category taxonomy with a short German user-facing message,
//! and returned as data. The raw driver text stays attached as detail so the
//! UI can disclose it on demand without showing it by default.

use thiserror::Error;

/// Stable categories for classified backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DuplicateKey,
    ForeignKeyViolation,
    ForeignKeyBlocksDelete,
    CheckConstraintViolation,
    PermissionDenied,
    NotNullViolation,
    Unknown,
}

impl ErrorCategory {
    /// Map a MySQL error number to its category. Unlisted numbers fall back
    /// to [`ErrorCategory::Unknown`]; classification never fails.
    pub fn from_code(code: u32) -> Self {
        match code {
            1062 | 1586 => Self::DuplicateKey,
            1452 => Self::ForeignKeyViolation,
            1451 => Self::ForeignKeyBlocksDelete,
            3819 => Self::CheckConstraintViolation,
            1044 | 1045 | 1142 | 1143 | 1227 => Self::PermissionDenied,
            1048 | 1364 => Self::NotNullViolation,
            _ => Self::Unknown,
        }
    }

    /// Stable identifier for logs and the UI layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateKey => "DUPLICATE_KEY",
            Self::ForeignKeyViolation => "FOREIGN_KEY_VIOLATION",
            Self::ForeignKeyBlocksDelete => "FOREIGN_KEY_BLOCKS_DELETE",
            Self::CheckConstraintViolation => "CHECK_CONSTRAINT_VIOLATION",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotNullViolation => "NOT_NULL_VIOLATION",
            Self::Unknown => "UNKNOWN_DATABASE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A backend failure mapped to its category, with a short German message and
/// the raw driver diagnostics preserved as detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    /// Short user-facing message (German)
    pub message: String,
    /// Native backend error number, when the driver reported one
    pub code: Option<u32>,
    /// Raw driver diagnostic text (not shown by default)
    pub detail: String,
}

impl ClassifiedError {
    /// Classify a backend error by its native number and raw message.
    /// Always returns a classification; never panics.
    pub fn classify(code: Option<u32>, raw_message: &str) -> Self {
        let category = code.map_or(ErrorCategory::Unknown, ErrorCategory::from_code);
        let message = match category {
            ErrorCategory::DuplicateKey => {
                "Eintrag existiert bereits (doppelter Schlüssel).".to_string()
            }
            ErrorCategory::ForeignKeyViolation => {
                "Verweis auf einen nicht vorhandenen Datensatz (Fremdschlüssel).".to_string()
            }
            ErrorCategory::ForeignKeyBlocksDelete => {
                "Datensatz wird noch von anderen Einträgen referenziert und kann nicht gelöscht werden."
                    .to_string()
            }
            ErrorCategory::CheckConstraintViolation => {
                "Ein Wert verletzt eine CHECK-Bedingung.".to_string()
            }
            ErrorCategory::PermissionDenied => {
                "Keine Berechtigung für diese Datenbankoperation.".to_string()
            }
            ErrorCategory::NotNullViolation => {
                "Ein Pflichtfeld wurde nicht ausgefüllt.".to_string()
            }
            ErrorCategory::Unknown => match code {
                Some(n) => format!("Unbekannter Datenbankfehler (Code {n})."),
                None => "Unbekannter Datenbankfehler.".to_string(),
            },
        };
        Self {
            category,
            message,
            code,
            detail: raw_message.to_string(),
        }
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Schemafehler für Tabelle '{table}': {message}")]
    Schema { message: String, table: String },

    #[error("Ungültige Eingabe: {message}")]
    Validation { message: String },

    #[error("Keine Berechtigung: {operation}")]
    Permission { operation: String },

    #[error("Verbindungsfehler: {message}")]
    Connection { message: String },

    #[error("Konfigurationsfehler: {message}")]
    Config { message: String },

    #[error("Zeitüberschreitung: {operation} nach {elapsed_secs}s abgebrochen")]
    Timeout { operation: String, elapsed_secs: u64 },

    #[error("{0}")]
    Backend(ClassifiedError),
}

impl AdminError {
    /// Create a schema error.
    pub fn schema(message: impl Into<String>, table: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            table: table.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a permission error.
    pub fn permission(operation: impl Into<String>) -> Self {
        Self::Permission {
            operation: operation.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, elapsed_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            elapsed_secs,
        }
    }

    /// The backend classification, when this error carries one.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Backend(c) => Some(c),
            _ => None,
        }
    }
}

/// Convert sqlx errors, classifying database-level failures by their MySQL
/// error number.
impl From<sqlx::Error> for AdminError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err
                    .try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>()
                    .map(|e| e.number() as u32);
                AdminError::Backend(ClassifiedError::classify(code, db_err.message()))
            }
            sqlx::Error::Configuration(msg) => AdminError::connection(msg.to_string()),
            sqlx::Error::Io(io_err) => {
                AdminError::connection(format!("E/A-Fehler: {io_err}"))
            }
            sqlx::Error::Tls(tls_err) => {
                AdminError::connection(format!("TLS-Fehler: {tls_err}"))
            }
            sqlx::Error::Protocol(msg) => {
                AdminError::connection(format!("Protokollfehler: {msg}"))
            }
            sqlx::Error::ColumnNotFound(col) => {
                AdminError::schema(format!("Spalte '{col}' nicht gefunden"), col.to_string())
            }
            other => AdminError::Backend(ClassifiedError::classify(None, &other.to_string())),
        }
    }
}

/// Result type alias for all fallible operations in this crate.
pub type AdminResult<T> = Result<T, AdminError>;
