//! Settings 파일 I/O
//!
//! 호스트 앱의 설정 JSON 을 읽고 씁니다. 저장은 임시 파일에 쓴 뒤 rename 합니다.

use crate::error::{AppError, AppResult};
use crate::models::Settings;
use std::fs;
use std::io::Write;
use std::path::Path;

/// 설정 파일 읽기
pub fn load_settings(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        return Err(AppError::SettingsNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&text)?;
    Ok(settings)
}

/// 설정 파일 저장 (atomic write)
pub fn save_settings(path: &Path, settings: &Settings) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(settings)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // 임시 파일에 쓰고 rename
    let tmp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(&json)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    Ok(())
}
