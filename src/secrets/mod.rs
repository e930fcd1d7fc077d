//! 시크릿 마이그레이션 모듈
//!
//! 설정 파일에 평문으로 저장돼 있던 민감 값을 외부 시크릿 스토어로 옮기고,
//! 설정에는 시크릿 이름(참조)만 남깁니다.
//!
//! - `naming`: `(owner, field)` → 시크릿 이름 변환
//! - `fields`: 필드 경로 ↔ 고정 시크릿 이름 테이블
//! - `migration`: 스캔 및 1회성 마이그레이션
//! - `store`: 시크릿 스토어 인터페이스와 구현

pub mod fields;
pub mod migration;
pub mod naming;
pub mod store;

pub use fields::{secret_name_for, validate_table, FieldPath, FieldPathError, SecretField, FIELD_TABLE};
pub use migration::{
    apply, migrate, resolve_field, resolve_secret, scan, MigrationEntry, MigrationError,
    MigrationReport,
};
pub use naming::{derive_secret_name, is_valid_secret_name, SECRET_NAMESPACE};
pub use store::{KeyringStore, MemoryStore, SecretStore, StoreError};
