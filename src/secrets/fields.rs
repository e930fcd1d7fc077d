//! 민감 필드 테이블
//!
//! 필드 경로(`provider.field` 또는 `field`)와 고정된 시크릿 이름의 매핑.
//! 시크릿 이름은 이미 마이그레이션된 설치본과의 호환을 위해 리터럴로 고정합니다.
//! `naming::derive_secret_name` 은 새 항목을 추가할 때 이름을 만드는 용도로만 씁니다.

use crate::models::Settings;
use crate::secrets::naming::is_valid_secret_name;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// 필드 경로 오류
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldPathError {
    #[error("Empty field path")]
    Empty,

    #[error("Field path nested too deep: {0}")]
    TooDeep(String),

    #[error("Empty segment in field path: {0}")]
    EmptySegment(String),

    #[error("Invalid secret name for {path}: {name}")]
    InvalidSecretName { path: String, name: String },

    #[error("Duplicate field path: {0}")]
    DuplicatePath(String),

    #[error("Secret name used twice: {0}")]
    DuplicateSecretName(String),
}

/// 파싱된 필드 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath<'a> {
    /// `provider.field`
    Provider { provider: &'a str, field: &'a str },
    /// 최상위 `field`
    TopLevel(&'a str),
}

impl<'a> FieldPath<'a> {
    /// 점(`.`)이 0개 또는 1개인 경로만 허용
    pub fn parse(path: &'a str) -> Result<Self, FieldPathError> {
        if path.is_empty() {
            return Err(FieldPathError::Empty);
        }

        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(FieldPathError::TooDeep(path.to_string()));
        }

        match second {
            None => Ok(FieldPath::TopLevel(first)),
            Some(field) if first.is_empty() || field.is_empty() => {
                Err(FieldPathError::EmptySegment(path.to_string()))
            }
            Some(field) => Ok(FieldPath::Provider {
                provider: first,
                field,
            }),
        }
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Provider { provider, field } => write!(f, "{}.{}", provider, field),
            FieldPath::TopLevel(field) => write!(f, "{}", field),
        }
    }
}

/// 민감 필드 하나: 경로, 고정 시크릿 이름, 그리고 Settings 접근자
#[derive(Clone, Copy)]
pub struct SecretField {
    pub path: &'static str,
    pub secret_name: &'static str,
    get: fn(&Settings) -> &str,
    set: fn(&mut Settings, String),
}

impl SecretField {
    pub const fn new(
        path: &'static str,
        secret_name: &'static str,
        get: fn(&Settings) -> &str,
        set: fn(&mut Settings, String),
    ) -> Self {
        Self {
            path,
            secret_name,
            get,
            set,
        }
    }

    /// 현재 필드 값 (섹션/필드가 없으면 빈 문자열)
    pub fn read<'s>(&self, settings: &'s Settings) -> &'s str {
        (self.get)(settings)
    }

    /// 필드 값을 덮어쓰기
    pub fn write(&self, settings: &mut Settings, value: String) {
        (self.set)(settings, value)
    }
}

impl fmt::Debug for SecretField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretField")
            .field("path", &self.path)
            .field("secret_name", &self.secret_name)
            .finish()
    }
}

/// 알려진 모든 민감 필드 (순서 고정)
pub static FIELD_TABLE: [SecretField; 8] = [
    SecretField::new(
        "s3.s3AccessKeyID",
        "remotely-save-s3-access-key-id",
        |s| &s.s3.s3_access_key_id,
        |s, v| s.s3.s3_access_key_id = v,
    ),
    SecretField::new(
        "s3.s3SecretAccessKey",
        "remotely-save-s3-secret-access-key",
        |s| &s.s3.s3_secret_access_key,
        |s, v| s.s3.s3_secret_access_key = v,
    ),
    SecretField::new(
        "webdav.username",
        "remotely-save-webdav-username",
        |s| &s.webdav.username,
        |s, v| s.webdav.username = v,
    ),
    SecretField::new(
        "webdav.password",
        "remotely-save-webdav-password",
        |s| &s.webdav.password,
        |s, v| s.webdav.password = v,
    ),
    SecretField::new(
        "webdis.username",
        "remotely-save-webdis-username",
        |s| &s.webdis.username,
        |s, v| s.webdis.username = v,
    ),
    SecretField::new(
        "webdis.password",
        "remotely-save-webdis-password",
        |s| &s.webdis.password,
        |s, v| s.webdis.password = v,
    ),
    SecretField::new(
        "azureblobstorage.containerSasUrl",
        "remotely-save-azure-container-sas-url",
        |s| &s.azureblobstorage.container_sas_url,
        |s, v| s.azureblobstorage.container_sas_url = v,
    ),
    SecretField::new(
        "password",
        "remotely-save-e2e-password",
        |s| &s.password,
        |s, v| s.password = v,
    ),
];

static FIELD_INDEX: Lazy<HashMap<&'static str, &'static SecretField>> =
    Lazy::new(|| FIELD_TABLE.iter().map(|f| (f.path, f)).collect());

/// 필드 경로로 테이블 항목 조회
pub fn lookup_field(path: &str) -> Option<&'static SecretField> {
    FIELD_INDEX.get(path).copied()
}

/// 필드 경로에 고정된 시크릿 이름
pub fn secret_name_for(path: &str) -> Option<&'static str> {
    lookup_field(path).map(|f| f.secret_name)
}

/// 테이블 검증: 경로 문법, 시크릿 이름 문자셋, 경로/이름 중복
pub fn validate_table(table: &[SecretField]) -> Result<(), FieldPathError> {
    let mut paths = HashSet::new();
    let mut names = HashSet::new();

    for field in table {
        FieldPath::parse(field.path)?;

        if !is_valid_secret_name(field.secret_name) {
            return Err(FieldPathError::InvalidSecretName {
                path: field.path.to_string(),
                name: field.secret_name.to_string(),
            });
        }
        if !paths.insert(field.path) {
            return Err(FieldPathError::DuplicatePath(field.path.to_string()));
        }
        if !names.insert(field.secret_name) {
            return Err(FieldPathError::DuplicateSecretName(
                field.secret_name.to_string(),
            ));
        }
    }

    Ok(())
}
