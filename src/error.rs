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

    #[error("{0}")]
    Other(String),
}

/// Errors raised while importing spreadsheet exports.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to open import file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unreadable workbook: {0}")]
    Workbook(#[source] calamine::XlsxError),

    #[error("workbook has no sheets")]
    NoSheet,

    #[error("import file has no data rows")]
    Empty,

    #[error("{kind} {name:?} is soft-deleted; restore or rename it before importing")]
    DeletedReference { kind: &'static str, name: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_name_the_field() {
        let err = ConfigError::InvalidValue {
            field: "max_connections",
            reason: "must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for max_connections: must be greater than 0"
        );

        let err: Error = ConfigError::MissingField {
            field: "AUTH_TOKEN_SECRET",
        }
        .into();
        assert_eq!(err.to_string(), "missing required field: AUTH_TOKEN_SECRET");
    }

    #[test]
    fn diesel_errors_map_to_database_variant() {
        let err: Error = diesel::result::Error::NotFound.into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn import_errors_are_transparent() {
        let err: Error = ImportError::Empty.into();
        assert_eq!(err.to_string(), "import file has no data rows");

        let err: Error = ImportError::DeletedReference {
            kind: "species",
            name: "Hake".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "species \"Hake\" is soft-deleted; restore or rename it before importing"
        );
    }
}
