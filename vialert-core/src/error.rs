use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Recommendation error: {0}")]
    Recommendation(#[from] RecommendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Malformed row {row} in {table}: {reason}")]
    MalformedRow {
        table: String,
        row: u64,
        reason: String,
    },

    #[error("Table {table} has no usable rows")]
    Empty { table: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid location pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone)]
pub enum RecommendError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Point-of-interest registry is empty")]
    EmptyPoiRegistry,

    #[error("No incident records with usable locations available")]
    NoLocatedIncidents,
}
