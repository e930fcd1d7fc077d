//! Secret Migration - 설정 파일 평문 시크릿 마이그레이션
//!
//! 설정 JSON 에 평문으로 저장된 민감 값을 시크릿 스토어로 옮기고,
//! 설정에는 시크릿 이름(참조)만 남기는 1회성 마이그레이션 라이브러리입니다.

pub mod config;
pub mod error;
pub mod models;
pub mod secrets;
pub mod settings_file;

use crate::config::MigrationConfig;
use crate::error::AppResult;
use crate::secrets::migration::MigratedField;
use crate::secrets::{
    migrate, scan, validate_table, KeyringStore, MemoryStore, MigrationError, MigrationReport,
    SecretStore, FIELD_TABLE,
};
use crate::settings_file::{load_settings, save_settings};
use tracing::{info, warn};

/// 실행 결과
#[derive(Debug)]
pub enum RunOutcome {
    /// dry-run: 옮길 대상 목록 (평문 제외)
    Pending(Vec<MigratedField>),
    /// 실제 마이그레이션 결과
    Migrated(MigrationReport),
}

/// 설정에 따라 스토어를 골라 마이그레이션 실행
///
/// 메모리 스토어는 프로세스 종료와 함께 사라지므로 dry-run 에서만 허용합니다.
pub async fn run(config: &MigrationConfig) -> AppResult<RunOutcome> {
    config.validate()?;
    if config.memory_store {
        run_with_store(config, &MemoryStore::new()).await
    } else {
        run_with_store(config, &KeyringStore::new(config.keyring_service.clone())).await
    }
}

/// 설정 파일 로드 → 마이그레이션 → 저장
///
/// 스토어 쓰기가 중간에 실패해도, 이미 옮긴 필드가 있으면 설정을 저장한 뒤 에러를 반환합니다.
/// 저장된 참조는 스토어에 값이 있으므로 유효하고, 다시 실행하면 남은 필드만 옮깁니다.
pub async fn run_with_store<S: SecretStore>(
    config: &MigrationConfig,
    store: &S,
) -> AppResult<RunOutcome> {
    validate_table(&FIELD_TABLE)?;

    let path = config.settings_path.as_path();
    let mut settings = load_settings(path)?;
    info!(target: "secret_migration", "Settings loaded from {}", path.display());

    if config.dry_run {
        let pending = scan(&settings)
            .iter()
            .map(|entry| MigratedField {
                path: entry.path().to_string(),
                secret_name: entry.secret_name().to_string(),
            })
            .collect();
        return Ok(RunOutcome::Pending(pending));
    }

    match migrate(store, &mut settings).await {
        Ok(report) => {
            if report.any() {
                save_settings(path, &settings)?;
                info!(target: "secret_migration", "Settings saved to {}", path.display());
            }
            Ok(RunOutcome::Migrated(report))
        }
        Err(err) => {
            let MigrationError::StoreWrite { migrated, .. } = &err;
            if *migrated > 0 {
                // 저장 실패로 마이그레이션 에러를 덮어쓰지 않음
                match save_settings(path, &settings) {
                    Ok(()) => warn!(
                        target: "secret_migration",
                        "Partial migration saved to {} ({} field(s) moved)",
                        path.display(),
                        migrated
                    ),
                    Err(save_err) => warn!(
                        target: "secret_migration",
                        "Failed to save partial migration to {}: {}",
                        path.display(),
                        save_err
                    ),
                }
            }
            Err(err.into())
        }
    }
}
