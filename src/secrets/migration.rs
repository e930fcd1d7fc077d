//! 평문 시크릿 마이그레이션
//!
//! 1. `scan`: Settings 에서 아직 평문으로 남아 있는 민감 필드를 찾는다
//! 2. `migrate` / `apply`: 평문을 시크릿 스토어로 옮기고 필드를 시크릿 이름(참조)으로 바꾼다
//! 3. 모든 필드가 성공하면 `secrets_migrated` 플래그를 켠다
//!
//! 스토어 쓰기가 중간에 실패하면 즉시 중단하고 플래그는 건드리지 않습니다.
//! 이미 옮긴 필드는 참조로 남고, 나머지는 평문 그대로이므로 다시 실행해도 안전합니다.

use crate::models::Settings;
use crate::secrets::fields::{lookup_field, SecretField, FIELD_TABLE};
use crate::secrets::store::{SecretStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

/// 마이그레이션이 필요한 필드 하나
pub struct MigrationEntry<'t> {
    field: &'t SecretField,
    pub raw_value: String,
}

impl MigrationEntry<'_> {
    pub fn path(&self) -> &'static str {
        self.field.path
    }

    pub fn secret_name(&self) -> &'static str {
        self.field.secret_name
    }

    /// 필드 값을 시크릿 이름(참조)으로 교체
    fn write_reference(&self, settings: &mut Settings) {
        self.field.write(settings, self.field.secret_name.to_string());
    }
}

impl Drop for MigrationEntry<'_> {
    fn drop(&mut self) {
        self.raw_value.zeroize();
    }
}

impl fmt::Debug for MigrationEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationEntry")
            .field("path", &self.path())
            .field("secret_name", &self.secret_name())
            .field("raw_value", &"<redacted>")
            .finish()
    }
}

/// 마이그레이션 오류
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Failed to store {path} as {secret_name} after {migrated} field(s) migrated: {source}")]
    StoreWrite {
        path: &'static str,
        secret_name: &'static str,
        migrated: usize,
        #[source]
        source: StoreError,
    },
}

/// 옮겨진 필드 하나
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigratedField {
    pub path: String,
    pub secret_name: String,
}

/// 마이그레이션 결과
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub migrated: Vec<MigratedField>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MigrationReport {
    /// 하나라도 옮겼는지
    pub fn any(&self) -> bool {
        !self.migrated.is_empty()
    }
}

/// 기본 필드 테이블로 스캔
pub fn scan(settings: &Settings) -> Vec<MigrationEntry<'static>> {
    scan_with(&FIELD_TABLE, settings)
}

/// 주어진 테이블 순서대로 마이그레이션 대상 수집
///
/// `secrets_migrated` 가 켜져 있으면 필드 내용과 무관하게 빈 목록을 반환합니다.
/// 비어 있는 필드, 이미 자기 시크릿 이름을 담고 있는 필드는 제외합니다.
pub fn scan_with<'t>(table: &'t [SecretField], settings: &Settings) -> Vec<MigrationEntry<'t>> {
    if settings.secrets_migrated {
        return Vec::new();
    }

    table
        .iter()
        .filter_map(|field| {
            let raw = field.read(settings);
            if raw.is_empty() || raw == field.secret_name {
                return None;
            }
            Some(MigrationEntry {
                field,
                raw_value: raw.to_string(),
            })
        })
        .collect()
}

/// 마이그레이션 수행 후 하나라도 옮겼으면 `true`
pub async fn apply<S: SecretStore>(
    store: &S,
    settings: &mut Settings,
) -> Result<bool, MigrationError> {
    Ok(migrate(store, settings).await?.any())
}

/// 기본 필드 테이블로 마이그레이션
pub async fn migrate<S: SecretStore>(
    store: &S,
    settings: &mut Settings,
) -> Result<MigrationReport, MigrationError> {
    migrate_with(&FIELD_TABLE, store, settings).await
}

/// 마이그레이션 수행
///
/// 항목마다 스토어 쓰기를 기다린 뒤 다음으로 진행합니다 (병렬 쓰기 없음).
/// 대상이 없으면 스토어 호출도, Settings 변경도 하지 않습니다.
pub async fn migrate_with<S: SecretStore>(
    table: &[SecretField],
    store: &S,
    settings: &mut Settings,
) -> Result<MigrationReport, MigrationError> {
    let entries = scan_with(table, settings);
    if entries.is_empty() {
        debug!(target: "secret_migration::migration", "Nothing to migrate");
        return Ok(MigrationReport {
            migrated: Vec::new(),
            completed_at: None,
        });
    }

    info!(
        target: "secret_migration::migration",
        "Migrating {} plaintext secret(s)",
        entries.len()
    );

    let mut migrated = Vec::with_capacity(entries.len());
    for entry in &entries {
        if let Err(source) = store.set(entry.secret_name(), &entry.raw_value).await {
            warn!(
                target: "secret_migration::migration",
                "Failed to store {} ({}): {}",
                entry.path(),
                entry.secret_name(),
                source
            );
            return Err(MigrationError::StoreWrite {
                path: entry.path(),
                secret_name: entry.secret_name(),
                migrated: migrated.len(),
                source,
            });
        }

        entry.write_reference(settings);
        debug!(
            target: "secret_migration::migration",
            "✓ {} → {}",
            entry.path(),
            entry.secret_name()
        );
        migrated.push(MigratedField {
            path: entry.path().to_string(),
            secret_name: entry.secret_name().to_string(),
        });
    }

    settings.secrets_migrated = true;
    info!(
        target: "secret_migration::migration",
        "Secret migration complete, {} field(s) moved",
        migrated.len()
    );

    Ok(MigrationReport {
        migrated,
        completed_at: Some(Utc::now()),
    })
}

/// 시크릿 이름으로 실제 값 조회 (이름이 비어 있으면 `None`)
pub async fn resolve_secret<S: SecretStore>(
    store: &S,
    secret_name: &str,
) -> Result<Option<String>, StoreError> {
    if secret_name.is_empty() {
        return Ok(None);
    }
    store.get(secret_name).await
}

/// 필드 경로의 현재 참조를 따라 실제 값 조회
///
/// 알 수 없는 경로이거나 필드가 비어 있으면 `None`.
pub async fn resolve_field<S: SecretStore>(
    store: &S,
    settings: &Settings,
    path: &str,
) -> Result<Option<String>, StoreError> {
    match lookup_field(path) {
        Some(field) => resolve_secret(store, field.read(settings)).await,
        None => Ok(None),
    }
}
