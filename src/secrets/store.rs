//! 시크릿 스토어 인터페이스 및 구현
//!
//! - `SecretStore`: 마이그레이션이 의존하는 최소 인터페이스 (`get` / `set`)
//! - `MemoryStore`: 메모리 캐시 (dry-run, 테스트용)
//! - `KeyringStore`: OS 키체인/키링

use keyring::{Entry, Error as KeyringError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 시크릿 스토어 오류
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Invalid secret name: {0:?}")]
    InvalidName(String),

    #[error("Write rejected for {0}")]
    WriteRejected(String),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 외부 시크릿 스토어
///
/// 재시도 정책은 스토어 책임입니다. 마이그레이션은 실패를 그대로 호출자에게 전달합니다.
#[allow(async_fn_in_trait)]
pub trait SecretStore {
    /// 시크릿 조회 (없으면 `None`)
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// 시크릿 저장 (이미 있으면 덮어씀)
    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError>;
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// 메모리 기반 시크릿 스토어
#[derive(Clone, Default)]
pub struct MemoryStore {
    secrets: Arc<RwLock<HashMap<String, String>>>,
    /// 이 이름으로 `set` 하면 실패 (실패 시나리오 재현용)
    reject: Arc<RwLock<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정한 시크릿 이름의 쓰기를 거부하도록 설정
    pub async fn reject_writes_to(&self, name: impl Into<String>) {
        *self.reject.write().await = Some(name.into());
    }

    /// 쓰기 거부 해제
    pub async fn accept_all_writes(&self) {
        *self.reject.write().await = None;
    }

    /// 현재 저장된 시크릿 복사본
    pub async fn snapshot(&self) -> HashMap<String, String> {
        self.secrets.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.secrets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.secrets.read().await.is_empty()
    }
}

impl SecretStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }
        Ok(self.secrets.read().await.get(name).cloned())
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        if self.reject.read().await.as_deref() == Some(name) {
            return Err(StoreError::WriteRejected(name.to_string()));
        }

        self.secrets
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// OS 키체인 기반 시크릿 스토어
///
/// 시크릿 이름을 키체인 account 로, `service` 를 서비스 이름으로 사용합니다.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

fn map_keyring_error(err: KeyringError) -> StoreError {
    StoreError::Keychain(err.to_string())
}

impl SecretStore for KeyringStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        if name.is_empty() {
            return Ok(None);
        }

        let service = self.service.clone();
        let name = name.to_string();
        // 키체인 호출은 블로킹이므로 별도 스레드에서 실행
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &name).map_err(map_keyring_error)?;
            match entry.get_password() {
                Ok(value) => Ok(Some(value)),
                Err(KeyringError::NoEntry) => Ok(None),
                Err(err) => Err(map_keyring_error(err)),
            }
        })
        .await?
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        validate_name(name)?;

        let service = self.service.clone();
        let name = name.to_string();
        let value = zeroize::Zeroizing::new(value.to_string());
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &name).map_err(map_keyring_error)?;
            entry.set_password(&value).map_err(map_keyring_error)
        })
        .await?
    }
}
