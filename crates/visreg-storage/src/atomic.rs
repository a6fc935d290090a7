//! 원자적 파일 쓰기.
//!
//! 같은 디렉토리의 고유 임시 파일에 쓴 뒤 rename 한다.
//! 읽는 쪽은 완성된 파일 또는 이전 파일만 본다.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use visreg_core::error::CoreError;

/// `dest`에 `data`를 원자적으로 기록
pub async fn write_atomic(dest: &Path, data: &[u8]) -> Result<(), CoreError> {
    let tmp = tmp_path(dest);

    if let Err(e) = fs::write(&tmp, data).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&tmp, dest).await {
        let _ = fs::remove_file(&tmp).await;
        // 동시 작성자가 먼저 같은 이름을 만들었으면 성공으로 본다 (Windows rename)
        if fs::try_exists(dest).await.unwrap_or(false) {
            warn!("rename 실패, 대상이 이미 존재: {} ({e})", dest.display());
            return Ok(());
        }
        return Err(e.into());
    }

    Ok(())
}

fn tmp_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
}
