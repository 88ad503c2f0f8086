use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum ClinileadError {
    Validation(String),
    Duplicate(String),
    NotFound(String),
    Unauthorized(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    PasswordHash(String),
    TokenGeneration(String),
}

impl ClinileadError {
    /// Stable error code for logs and client-side mapping
    pub fn code(&self) -> &'static str {
        match self {
            ClinileadError::Validation(_) => "E001",
            ClinileadError::Duplicate(_) => "E002",
            ClinileadError::NotFound(_) => "E003",
            ClinileadError::Unauthorized(_) => "E004",
            ClinileadError::DatabaseConfig(_) => "E005",
            ClinileadError::DatabaseConnection(_) => "E006",
            ClinileadError::DatabaseOperation(_) => "E007",
            ClinileadError::Serialization(_) => "E008",
            ClinileadError::PasswordHash(_) => "E009",
            ClinileadError::TokenGeneration(_) => "E010",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ClinileadError::Validation(_) => "Validation Error",
            ClinileadError::Duplicate(_) => "Duplicate Lead",
            ClinileadError::NotFound(_) => "Resource Not Found",
            ClinileadError::Unauthorized(_) => "Unauthorized",
            ClinileadError::DatabaseConfig(_) => "Database Configuration Error",
            ClinileadError::DatabaseConnection(_) => "Database Connection Error",
            ClinileadError::DatabaseOperation(_) => "Database Operation Error",
            ClinileadError::Serialization(_) => "Serialization Error",
            ClinileadError::PasswordHash(_) => "Password Hash Error",
            ClinileadError::TokenGeneration(_) => "Token Generation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClinileadError::Validation(msg)
            | ClinileadError::Duplicate(msg)
            | ClinileadError::NotFound(msg)
            | ClinileadError::Unauthorized(msg)
            | ClinileadError::DatabaseConfig(msg)
            | ClinileadError::DatabaseConnection(msg)
            | ClinileadError::DatabaseOperation(msg)
            | ClinileadError::Serialization(msg)
            | ClinileadError::PasswordHash(msg)
            | ClinileadError::TokenGeneration(msg) => msg,
        }
    }

    /// HTTP status the error maps to at the API boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            ClinileadError::Validation(_) | ClinileadError::Duplicate(_) => {
                StatusCode::BAD_REQUEST
            }
            ClinileadError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinileadError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Colored output for server mode startup failures
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClinileadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClinileadError {}

impl ClinileadError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClinileadError::Validation(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        ClinileadError::Duplicate(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClinileadError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ClinileadError::Unauthorized(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ClinileadError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ClinileadError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ClinileadError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ClinileadError::Serialization(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        ClinileadError::PasswordHash(msg.into())
    }

    pub fn token_generation<T: Into<String>>(msg: T) -> Self {
        ClinileadError::TokenGeneration(msg.into())
    }
}

impl From<sea_orm::DbErr> for ClinileadError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClinileadError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClinileadError {
    fn from(err: std::io::Error) -> Self {
        ClinileadError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for ClinileadError {
    fn from(err: serde_json::Error) -> Self {
        ClinileadError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ClinileadError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ClinileadError::TokenGeneration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClinileadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ClinileadError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClinileadError::duplicate("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ClinileadError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ClinileadError::unauthorized("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ClinileadError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_code_and_display() {
        let err = ClinileadError::duplicate("already submitted");
        assert_eq!(err.code(), "E002");
        assert_eq!(err.to_string(), "Duplicate Lead: already submitted");
    }

    #[test]
    fn test_from_db_err() {
        let err: ClinileadError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, ClinileadError::DatabaseOperation(_)));
    }
}
