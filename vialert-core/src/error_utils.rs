use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for EngineError {
    fn log_error(&self) -> &Self {
        error!("EngineError: {}", self);
        match self {
            EngineError::Table(e) => {
                error!("Table error details: {:?}", e);
            }
            EngineError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            EngineError::Recommendation(e) => {
                error!("Recommendation error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("EngineError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            EngineError::Table(e) => e.user_friendly_message(),
            EngineError::Config(e) => e.user_friendly_message(),
            EngineError::Recommendation(e) => e.user_friendly_message(),
            EngineError::Io(_) => {
                "No se pudo acceder al archivo. Verifica la ruta y los permisos.".to_string()
            }
            EngineError::Serialization(_) => {
                "No se pudo serializar el resultado. Intenta de nuevo.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            EngineError::Table(_) => "TABLE".to_string(),
            EngineError::Config(_) => "CONFIG".to_string(),
            EngineError::Recommendation(_) => "RECOMMEND".to_string(),
            EngineError::Io(_) => "IO".to_string(),
            EngineError::Serialization(_) => "SERIALIZATION".to_string(),
        }
    }
}

impl ErrorExt for TableError {
    fn log_error(&self) -> &Self {
        error!("TableError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("TableError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            TableError::FileNotFound { path } => {
                format!("No se encontró el archivo de datos '{}'.", path)
            }
            TableError::MissingColumn { table, column } => {
                format!("A la tabla {} le falta la columna '{}'.", table, column)
            }
            TableError::MalformedRow { table, row, .. } => {
                format!("La fila {} de la tabla {} no se pudo leer.", row, table)
            }
            TableError::Empty { table } => {
                format!("La tabla {} no contiene filas utilizables.", table)
            }
            TableError::Csv(_) => "El archivo CSV no se pudo procesar.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            TableError::FileNotFound { .. } => "TABLE_FILE_NOT_FOUND".to_string(),
            TableError::MissingColumn { .. } => "TABLE_MISSING_COLUMN".to_string(),
            TableError::MalformedRow { .. } => "TABLE_MALFORMED_ROW".to_string(),
            TableError::Empty { .. } => "TABLE_EMPTY".to_string(),
            TableError::Csv(_) => "TABLE_CSV_ERROR".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidPattern { pattern, .. } => {
                format!("El patrón de ubicación '{}' no es válido.", pattern)
            }
            ConfigError::FileNotFound { path } => {
                format!("No se encontró el archivo de configuración '{}'.", path)
            }
            ConfigError::MissingField { field } => {
                format!("Falta el campo de configuración '{}'.", field)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("El valor del campo de configuración '{}' no es válido.", field)
            }
            ConfigError::Parse(_) => {
                "El archivo de configuración no se pudo interpretar.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN".to_string(),
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

impl ErrorExt for RecommendError {
    fn log_error(&self) -> &Self {
        error!("RecommendError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("RecommendError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RecommendError::UserNotFound { user_id } => {
                format!("No se encontró el usuario '{}' en el registro.", user_id)
            }
            RecommendError::EmptyPoiRegistry => {
                "No hay puntos de interés cargados para recomendar.".to_string()
            }
            RecommendError::NoLocatedIncidents => {
                "No hay accidentes con ubicaciones válidas disponibles.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            RecommendError::UserNotFound { .. } => "RECOMMEND_USER_NOT_FOUND".to_string(),
            RecommendError::EmptyPoiRegistry => "RECOMMEND_EMPTY_POI_REGISTRY".to_string(),
            RecommendError::NoLocatedIncidents => "RECOMMEND_NO_LOCATED_INCIDENTS".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &EngineError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &EngineError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
