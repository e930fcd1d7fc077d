//! 시크릿 이름 생성기
//!
//! `(owner, field)` 쌍을 시크릿 스토어에 저장 가능한 이름으로 변환합니다.
//! 시크릿 이름은 `[a-z0-9-]` 문자만 허용됩니다.
//!
//! 예: `("s3", "s3AccessKeyID")` → `remotely-save-s3-access-key-id`

use once_cell::sync::Lazy;
use regex::Regex;

/// 모든 시크릿 이름 앞에 붙는 네임스페이스
pub const SECRET_NAMESPACE: &str = "remotely-save";

/// 소문자/숫자 다음에 대문자가 오는 경계 (`keyI` → `key-I`)
static LOWER_UPPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid lower/upper boundary regex"));

/// 약어 다음에 단어가 시작되는 경계 (`URLPath` → `URL-Path`)
static ACRONYM_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid acronym boundary regex"));

/// camelCase 필드 이름을 시크릿 이름으로 변환
///
/// 1. 필드 이름이 owner로 시작하면(대소문자 무시) 그 접두사를 제거하고,
///    남은 첫 글자가 대문자면 소문자로 바꿉니다.
/// 2. camelCase 경계와 약어 경계에 `-`를 넣습니다.
/// 3. 전부 소문자로 바꾸고 `remotely-save-<owner>-` 를 붙입니다.
///
/// 필드 이름이 owner와 같으면 결과는 `remotely-save-<owner>-` 로 끝납니다.
/// 이 경우도 오류로 취급하지 않습니다.
pub fn derive_secret_name(owner: &str, field: &str) -> String {
    let stripped = strip_owner_prefix(owner, field);
    let dashed = LOWER_UPPER.replace_all(&stripped, "${1}-${2}");
    let dashed = ACRONYM_WORD.replace_all(&dashed, "${1}-${2}");

    format!(
        "{}-{}-{}",
        SECRET_NAMESPACE,
        owner.to_lowercase(),
        dashed.to_lowercase()
    )
}

fn strip_owner_prefix(owner: &str, field: &str) -> String {
    let has_prefix = field
        .get(..owner.len())
        .map(|head| head.eq_ignore_ascii_case(owner))
        .unwrap_or(false);
    if !has_prefix {
        return field.to_string();
    }

    let rest = &field[owner.len()..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            first.to_lowercase().chain(chars).collect()
        }
        _ => rest.to_string(),
    }
}

/// 시크릿 이름이 `^[a-z0-9-]+$` 를 만족하는지 확인
pub fn is_valid_secret_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
