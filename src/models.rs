//! Settings 데이터 모델
//!
//! 호스트 앱의 `data.json` 과 매핑되는 Rust 데이터 모델.
//! 마이그레이션이 다루는 필드만 타입으로 선언하고, 나머지 키는 `extra` 에 그대로 보존합니다.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 플러그인 설정 전체 구조
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub s3: S3Config,
    #[serde(default)]
    pub webdav: WebdavConfig,
    #[serde(default)]
    pub webdis: WebdisConfig,
    #[serde(default)]
    pub azureblobstorage: AzureBlobStorageConfig,
    /// E2E 암호화 비밀번호
    #[serde(default)]
    pub password: String,
    /// 1회성 시크릿 마이그레이션 완료 여부
    #[serde(default)]
    pub secrets_migrated: bool,
    /// 마이그레이션과 무관한 나머지 설정
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// S3 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    #[serde(rename = "s3AccessKeyID", default)]
    pub s3_access_key_id: String,
    #[serde(rename = "s3SecretAccessKey", default)]
    pub s3_secret_access_key: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// WebDAV 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebdavConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Webdis 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebdisConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Azure Blob Storage 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AzureBlobStorageConfig {
    #[serde(rename = "containerSasUrl", default)]
    pub container_sas_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
