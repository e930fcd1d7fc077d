//! 실행 설정
//!
//! 환경 변수(`.env` 포함)를 먼저 읽고, 명령줄 인자로 덮어씁니다.

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

pub const ENV_SETTINGS_PATH: &str = "SECRET_MIGRATION_SETTINGS";
pub const ENV_KEYRING_SERVICE: &str = "SECRET_MIGRATION_KEYRING_SERVICE";
pub const ENV_DRY_RUN: &str = "SECRET_MIGRATION_DRY_RUN";

const DEFAULT_SETTINGS_PATH: &str = "data.json";
const DEFAULT_KEYRING_SERVICE: &str = "remotely-save";

/// 마이그레이션 실행 설정
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationConfig {
    /// 설정 JSON 경로
    pub settings_path: PathBuf,
    /// 키체인 서비스 이름
    pub keyring_service: String,
    /// 대상만 출력하고 아무것도 쓰지 않음
    pub dry_run: bool,
    /// 키체인 대신 메모리 스토어 사용
    pub memory_store: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            dry_run: false,
            memory_store: false,
        }
    }
}

/// 명령줄 해석 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(MigrationConfig),
    Help,
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl MigrationConfig {
    /// 프로세스 환경 변수에서 설정 읽기
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 읽기 (비어 있는 값은 무시)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_SETTINGS_PATH) {
            config.settings_path = PathBuf::from(path);
        }
        if let Some(service) = lookup(ENV_KEYRING_SERVICE) {
            config.keyring_service = service;
        }
        if let Some(flag) = lookup(ENV_DRY_RUN) {
            config.dry_run = is_truthy(&flag);
        }

        config
    }

    /// 설정 조합 검증
    ///
    /// 메모리 스토어로 실제 마이그레이션을 하면 평문이 설정에서 지워진 채 스토어와 함께 사라집니다.
    pub fn validate(&self) -> AppResult<()> {
        if self.memory_store && !self.dry_run {
            return Err(AppError::Config(
                "--memory is only allowed together with --dry-run".into(),
            ));
        }
        Ok(())
    }

    /// 명령줄 인자 적용
    pub fn apply_args<I>(mut self, args: I) -> AppResult<CliAction>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Config("--settings requires a path".into()))?;
                    self.settings_path = PathBuf::from(path);
                }
                "--service" => {
                    let service = args
                        .next()
                        .ok_or_else(|| AppError::Config("--service requires a name".into()))?;
                    self.keyring_service = service;
                }
                "--dry-run" => self.dry_run = true,
                "--memory" => self.memory_store = true,
                "-h" | "--help" => return Ok(CliAction::Help),
                other => {
                    return Err(AppError::Config(format!("Unknown argument: {}", other)));
                }
            }
        }
        self.validate()?;
        Ok(CliAction::Run(self))
    }
}

fn find_upwards(start: PathBuf, filename: &str, max_hops: usize) -> Option<PathBuf> {
    let mut cur = start;
    for _ in 0..=max_hops {
        let candidate = cur.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        if !cur.pop() {
            break;
        }
    }
    None
}

/// `.env` 로드 (CWD 기준, 없으면 상위 디렉토리 탐색). 실패해도 무시합니다.
pub fn load_env() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let cwd = std::env::current_dir().ok()?;
    let path = find_upwards(cwd, ".env", 4)?;
    dotenvy::from_path(&path).ok()?;
    Some(path)
}

/// 주어진 파일에서 `.env` 로드
pub fn load_env_from(path: &Path) -> AppResult<()> {
    dotenvy::from_path(path).map_err(|e| AppError::Config(e.to_string()))
}
