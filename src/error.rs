//! Error Types
//!
//! 크레이트 전역 에러 타입 정의

use crate::secrets::{FieldPathError, MigrationError, StoreError};
use serde::Serialize;
use thiserror::Error;

/// 애플리케이션 에러
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Secret store error: {0}")]
    Store(#[from] StoreError),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    #[error("Field table error: {0}")]
    FieldTable(#[from] FieldPathError),

    #[error("Settings file not found: {0}")]
    SettingsNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Store(_) => "SECRET_STORE_ERROR",
            AppError::Migration(_) => "MIGRATION_FAILED",
            AppError::FieldTable(_) => "FIELD_TABLE_INVALID",
            AppError::SettingsNotFound(_) => "SETTINGS_NOT_FOUND",
            AppError::Config(_) => "INVALID_CONFIG",
        }
    }
}

/// CLI 출력용 직렬화 가능한 에러
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<AppError> for ErrorReport {
    fn from(error: AppError) -> Self {
        let details = match &error {
            AppError::Migration(MigrationError::StoreWrite { migrated, .. }) => Some(format!(
                "{} field(s) already moved; settings keep their references. Re-run to continue.",
                migrated
            )),
            _ => None,
        };

        ErrorReport {
            code: error.code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::SettingsNotFound("data.json".into());
        assert_eq!(err.code(), "SETTINGS_NOT_FOUND");
        assert_eq!(err.to_string(), "Settings file not found: data.json");

        let err = AppError::from(FieldPathError::TooDeep("a.b.c".into()));
        assert_eq!(err.code(), "FIELD_TABLE_INVALID");
    }

    #[test]
    fn test_report_for_partial_migration() {
        let err = AppError::from(MigrationError::StoreWrite {
            path: "password",
            secret_name: "remotely-save-e2e-password",
            migrated: 3,
            source: StoreError::WriteRejected("remotely-save-e2e-password".into()),
        });
        let report = ErrorReport::from(err);

        assert_eq!(report.code, "MIGRATION_FAILED");
        assert!(report.message.contains("password"));
        assert!(report.details.unwrap().starts_with("3 field(s)"));
    }
}
